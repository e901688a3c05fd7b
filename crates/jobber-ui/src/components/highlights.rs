use jobber_core::{
  FormKind,
  HighlightContent,
  RequestScope
};
use yew::{
  Html,
  function_component,
  html,
  use_effect_with
};

use super::{
  JobCard,
  TaskFormDialog
};
use crate::state::use_task_store;

/// Carousel of task cards above the table.
#[function_component(Highlights)]
pub fn highlights() -> Html {
  let store = use_task_store();

  {
    let store = store.clone();
    use_effect_with(
      store.epoch(),
      move |_| {
        let scope = RequestScope::new();
        store.ensure_list(&scope);
        move || scope.cancel()
      }
    );
  }

  match store.with_cache(
    HighlightContent::derive
  ) {
    | HighlightContent::Loading => html! {
      <p class="muted">{ "Carregando..." }</p>
    },
    | HighlightContent::Failed => html! {
      <p class="muted error-text">{ "Falha ao carregar os jobs." }</p>
    },
    | HighlightContent::Empty => html! {
      <div class="empty-state">
        <p class="muted">{ "Nenhum job em destaque." }</p>
        <TaskFormDialog
          kind={FormKind::Create}
          show_label=true
          label="Destacar Job"
        />
      </div>
    },
    | HighlightContent::Cards(tasks) => html! {
      <div class="carousel">
        {
          for tasks.into_iter().map(|task| html! {
            <JobCard key={task.id.to_string()} task={task.clone()} />
          })
        }
      </div>
    }
  }
}
