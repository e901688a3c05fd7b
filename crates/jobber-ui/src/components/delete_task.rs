use jobber_core::{
  DeleteConfirmation,
  DeletePhase,
  Mutation,
  TaskId
};
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html,
  use_effect_with,
  use_state
};
use yew_router::hooks::use_navigator;

use crate::app::Route;
use crate::state::{
  SelectionAction,
  use_notifier,
  use_selection,
  use_task_store
};

#[derive(Properties, PartialEq)]
pub struct DeleteTaskProps {
  pub id:         TaskId,
  #[prop_or_default]
  pub show_icon:  bool,
  #[prop_or_default]
  pub show_label: bool
}

#[function_component(DeleteTask)]
pub fn delete_task(
  props: &DeleteTaskProps
) -> Html {
  let store = use_task_store();
  let selection = use_selection();
  let notifier = use_notifier();
  let navigator = use_navigator();
  let dialog = {
    let id = props.id;
    use_state(move || {
      DeleteConfirmation::new(id)
    })
  };

  {
    let dialog = dialog.clone();
    use_effect_with(props.id, move |id| {
      if dialog.task_id() != *id {
        dialog
          .set(DeleteConfirmation::new(*id));
      }
    });
  }

  let on_request = {
    let dialog = dialog.clone();
    Callback::from(
      move |event: MouseEvent| {
        event.stop_propagation();
        let mut next = *dialog;
        next.request();
        dialog.set(next);
      }
    )
  };

  let on_cancel = {
    let dialog = dialog.clone();
    Callback::from(
      move |event: MouseEvent| {
        event.stop_propagation();
        let mut next = *dialog;
        next.cancel();
        dialog.set(next);
      }
    )
  };

  let on_confirm = {
    let dialog = dialog.clone();
    Callback::from(
      move |event: MouseEvent| {
        event.stop_propagation();
        let mut pending = *dialog;
        let mut shown = pending;
        if shown.confirm().is_none() {
          return;
        }
        dialog.set(shown);

        let id = pending.task_id();
        let dialog = dialog.clone();
        let store = store.clone();
        let selection = selection.clone();
        let notifier = notifier.clone();
        let navigator = navigator.clone();
        spawn_local(async move {
          let outcome = pending
            .confirm_and_delete(
              &*store.gateway
            )
            .await;
          dialog.set(pending);

          match outcome {
            | Some(Ok(())) => {
              let mutation =
                Mutation::Delete(id);
              notifier.success(
                mutation.success_message()
              );
              selection.dispatch(
                SelectionAction::Close
              );
              if let Some(navigator) =
                navigator
              {
                navigator.push(&Route::Home);
              }
              store.settle(mutation);
            }
            | Some(Err(_)) => {
              notifier.error(
                Mutation::Delete(id)
                  .failure_message()
              );
            }
            | None => {}
          }
        });
      }
    )
  };

  let stop = Callback::from(
    |event: MouseEvent| {
      event.stop_propagation()
    }
  );

  let deleting =
    dialog.phase() == DeletePhase::Deleting;

  html! {
    <>
      <button
        type="button"
        class="btn ghost danger"
        title="Excluir"
        onclick={on_request}
      >
        if props.show_icon {
          <span class="btn-icon">{ "🗑" }</span>
        }
        if props.show_label {
          <span>{ "Excluir" }</span>
        }
      </button>
      if dialog.is_open() {
        <div class="overlay" onclick={on_cancel.clone()}>
          <div class="dialog alert" role="alertdialog" onclick={stop}>
            <h3>{ "Você tem certeza que quer excluir?" }</h3>
            <p class="muted">
              { "Essa ação não pode ser desfeita. Isso irá excluir \
                 permanentemente a tarefa." }
            </p>
            <div class="dialog-actions">
              <button
                type="button"
                class="btn outline"
                disabled={deleting}
                onclick={on_cancel}
              >
                { "Cancelar" }
              </button>
              <button
                type="button"
                class="btn danger"
                disabled={deleting}
                onclick={on_confirm}
              >
                { "Excluir" }
              </button>
            </div>
          </div>
        </div>
      }
    </>
  }
}
