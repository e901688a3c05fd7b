use jobber_core::Task;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

use super::{
  DueBadgeView,
  PLACEHOLDER_IMAGE
};
use crate::app::ui_debug;
use crate::state::{
  SelectionAction,
  use_selection,
  use_task_store
};

#[derive(Properties, PartialEq)]
pub struct JobCardProps {
  pub task: Task
}

#[function_component(JobCard)]
pub fn job_card(
  props: &JobCardProps
) -> Html {
  let store = use_task_store();
  let selection = use_selection();
  let task = &props.task;
  let task_id = task.id;

  let onclick = {
    let verbose = store.config.verbose();
    Callback::from(
      move |_: MouseEvent| {
        ui_debug(
          verbose,
          "card.open",
          &task_id.to_string()
        );
        selection.dispatch(
          SelectionAction::Open(task_id)
        );
      }
    )
  };

  let image = task
    .image_url()
    .unwrap_or(PLACEHOLDER_IMAGE)
    .to_string();

  html! {
    <article class="job-card" {onclick}>
      <img class="job-card-image" src={image} alt={task.title.clone()} />
      <div class="job-card-body">
        <h3 class="job-card-title">{ task.title.clone() }</h3>
        <p class="job-card-description">{ task.description.clone() }</p>
      </div>
      <footer class="job-card-footer">
        <span class="muted">{ task.created_label() }</span>
        <DueBadgeView due_date={task.due_date} />
      </footer>
    </article>
  }
}
