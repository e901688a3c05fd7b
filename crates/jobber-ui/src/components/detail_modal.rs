use jobber_core::{
  DetailState,
  FormKind,
  RequestScope
};
use web_sys::MouseEvent;
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_effect_with
};

use super::{
  DeleteTask,
  PLACEHOLDER_IMAGE,
  PriorityBadge,
  StatusBadge,
  TaskFormDialog
};
use crate::state::{
  SelectionAction,
  use_selection,
  use_task_store
};

/// Shows whichever task is selected, and nothing until its fetch lands.
#[function_component(DetailModal)]
pub fn detail_modal() -> Html {
  let store = use_task_store();
  let selection = use_selection();
  let active = selection.selection.active();
  let revision =
    selection.selection.revision;

  {
    let store = store.clone();
    use_effect_with(
      (active, revision, store.epoch()),
      move |(active, _, _)| {
        let scope = RequestScope::new();
        if let Some(id) = *active {
          store.fetch_task(id, &scope);
        }
        move || scope.cancel()
      }
    );
  }

  let state = store.with_cache(|cache| {
    DetailState::derive(
      &selection.selection,
      cache
    )
  });
  let DetailState::Open(task) = state
  else {
    return html! {};
  };

  let on_close = {
    let selection = selection.clone();
    Callback::from(
      move |_: MouseEvent| {
        selection
          .dispatch(SelectionAction::Close)
      }
    )
  };
  let stop = Callback::from(
    |event: MouseEvent| {
      event.stop_propagation()
    }
  );

  let image = task
    .image_url()
    .unwrap_or(PLACEHOLDER_IMAGE)
    .to_string();

  html! {
    <div class="overlay" onclick={on_close.clone()}>
      <div class="dialog detail" role="dialog" onclick={stop}>
        <button
          type="button"
          class="btn ghost icon close"
          aria-label="Fechar"
          onclick={on_close}
        >
          { "✕" }
        </button>
        <img class="detail-image" src={image} alt={task.title.clone()} />
        <div class="detail-badges">
          <PriorityBadge priority={task.priority} />
          <StatusBadge status={task.status} />
        </div>
        <h2 class="detail-title">{ task.title.clone() }</h2>
        <p class="muted">
          { format!("Data de Lançamento: {}", task.created_label()) }
        </p>
        <p class="detail-description">{ task.description.clone() }</p>
        <footer class="detail-footer">
          <span>
            { format!("Prazo de entrega: {}", task.due_label()) }
          </span>
          <div class="detail-actions">
            <TaskFormDialog
              key={format!("edit-{}", task.id)}
              kind={FormKind::Edit}
              task_id={Some(task.id)}
              show_icon=true
              variant="ghost"
            />
            <DeleteTask
              key={format!("delete-{}", task.id)}
              id={task.id}
              show_icon=true
            />
          </div>
        </footer>
      </div>
    </div>
  }
}
