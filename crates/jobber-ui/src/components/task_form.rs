use jobber_core::due::today_in;
use jobber_core::form::image_accept_attr;
use jobber_core::mutation::{
  submit_create,
  submit_update
};
use jobber_core::task::{
  DUE_DATE_FORMAT,
  parse_due_date
};
use jobber_core::{
  FormKind,
  Mutation,
  RequestScope,
  SubmitError,
  TaskForm,
  TaskGateway,
  TaskId,
  TaskPriority,
  TaskStatus,
  ValidationError
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement,
  InputEvent,
  MouseEvent,
  SubmitEvent
};
use yew::{
  AttrValue,
  Callback,
  Html,
  Properties,
  TargetCast,
  classes,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_state
};

use crate::api::BrowserImage;
use crate::app::ui_debug;
use crate::state::{
  use_notifier,
  use_task_store
};

#[derive(Properties, PartialEq)]
pub struct TaskFormDialogProps {
  pub kind:       FormKind,
  #[prop_or_default]
  pub task_id:    Option<TaskId>,
  #[prop_or_default]
  pub show_icon:  bool,
  #[prop_or_default]
  pub show_label: bool,
  #[prop_or_default]
  pub label:      Option<AttrValue>,
  #[prop_or(AttrValue::Static("primary"))]
  pub variant:    AttrValue
}

fn default_label(
  kind: FormKind
) -> &'static str {
  match kind {
    | FormKind::Create => {
      "Adicionar um Job"
    }
    | FormKind::Edit => "Editar"
  }
}

fn trigger_icon(
  kind: FormKind
) -> &'static str {
  match kind {
    | FormKind::Create => "＋",
    | FormKind::Edit => "✎"
  }
}

/// Trigger button plus the create/edit dialog it opens.
///
/// The edit variant loads its task when opened, directly from the
/// gateway, so it always starts from the server's copy.
#[function_component(TaskFormDialog)]
pub fn task_form_dialog(
  props: &TaskFormDialogProps
) -> Html {
  let store = use_task_store();
  let notifier = use_notifier();

  let open = use_state(|| false);
  let loading = use_state(|| false);
  let busy = use_state(|| false);
  let draft = use_state(TaskForm::default);
  let image =
    use_state(|| None::<BrowserImage>);
  let field_error =
    use_state(|| None::<ValidationError>);
  let scope = use_mut_ref(RequestScope::new);

  {
    let scope = scope.clone();
    use_effect_with((), move |_| {
      move || scope.borrow().cancel()
    });
  }

  let kind = props.kind;
  let task_id = props.task_id;
  let verbose = store.config.verbose();

  let on_open = {
    let open = open.clone();
    let loading = loading.clone();
    let draft = draft.clone();
    let image = image.clone();
    let field_error = field_error.clone();
    let scope = scope.clone();
    let store = store.clone();
    Callback::from(
      move |event: MouseEvent| {
        event.stop_propagation();
        ui_debug(
          verbose,
          "form.open",
          &format!("{kind:?} {task_id:?}")
        );
        open.set(true);
        image.set(None);
        field_error.set(None);
        draft.set(TaskForm::default());

        let Some(id) = task_id else {
          return;
        };
        if kind != FormKind::Edit {
          return;
        }

        let request = RequestScope::new();
        scope.borrow().cancel();
        *scope.borrow_mut() = request.clone();
        loading.set(true);

        let store = store.clone();
        let draft = draft.clone();
        let loading = loading.clone();
        spawn_local(async move {
          let result =
            store.gateway.get_task(id).await;
          if request.is_cancelled() {
            return;
          }
          match result {
            | Ok(task) => {
              draft.set(TaskForm::from_task(
                &task
              ))
            }
            | Err(error) => {
              tracing::error!(
                task_id = %id,
                %error,
                "error loading task for edit"
              );
            }
          }
          loading.set(false);
        });
      }
    )
  };

  let on_close = {
    let open = open.clone();
    let loading = loading.clone();
    let scope = scope.clone();
    Callback::from(
      move |event: MouseEvent| {
        event.stop_propagation();
        scope.borrow().cancel();
        loading.set(false);
        open.set(false);
      }
    )
  };

  let stop = Callback::from(
    |event: MouseEvent| {
      event.stop_propagation()
    }
  );

  let on_title = {
    let draft = draft.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        let mut next = (*draft).clone();
        next.title = input.value();
        draft.set(next);
      }
    )
  };

  let on_description = {
    let draft = draft.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlTextAreaElement =
          event.target_unchecked_into();
        let mut next = (*draft).clone();
        next.description = input.value();
        draft.set(next);
      }
    )
  };

  let on_image = {
    let image = image.clone();
    Callback::from(move |event: Event| {
      let input: HtmlInputElement =
        event.target_unchecked_into();
      let picked = input
        .files()
        .and_then(|files| files.get(0))
        .map(BrowserImage::new);
      image.set(picked);
    })
  };

  let on_due_date = {
    let draft = draft.clone();
    Callback::from(move |event: Event| {
      let input: HtmlInputElement =
        event.target_unchecked_into();
      let mut next = (*draft).clone();
      next.due_date =
        parse_due_date(&input.value());
      draft.set(next);
    })
  };

  let on_priority = {
    let draft = draft.clone();
    Callback::from(move |event: Event| {
      let select: HtmlSelectElement =
        event.target_unchecked_into();
      let mut next = (*draft).clone();
      next.priority =
        TaskPriority::from_wire(
          &select.value()
        );
      draft.set(next);
    })
  };

  let on_status = {
    let draft = draft.clone();
    Callback::from(move |event: Event| {
      let select: HtmlSelectElement =
        event.target_unchecked_into();
      let mut next = (*draft).clone();
      next.status =
        TaskStatus::from_wire(&select.value());
      draft.set(next);
    })
  };

  let on_submit = {
    let store = store.clone();
    let notifier = notifier.clone();
    let open = open.clone();
    let busy = busy.clone();
    let draft = draft.clone();
    let image = image.clone();
    let field_error = field_error.clone();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        if *busy {
          return;
        }
        let mutation = match (kind, task_id) {
          | (FormKind::Create, _) => {
            Mutation::Create
          }
          | (FormKind::Edit, Some(id)) => {
            Mutation::Update(id)
          }
          | (FormKind::Edit, None) => {
            tracing::warn!(
              "edit dialog submitted without a task id"
            );
            return;
          }
        };

        let form = (*draft).clone();
        let upload = (*image).clone();
        let owner = store.config.owner_id;
        field_error.set(None);
        busy.set(true);

        let store = store.clone();
        let notifier = notifier.clone();
        let open = open.clone();
        let busy = busy.clone();
        let field_error = field_error.clone();
        spawn_local(async move {
          let gateway = &*store.gateway;
          let result = match mutation {
            | Mutation::Update(id) => {
              submit_update(
                gateway,
                id,
                &form,
                upload.as_ref(),
                owner
              )
              .await
            }
            | _ => {
              submit_create(
                gateway,
                &form,
                upload.as_ref(),
                owner
              )
              .await
            }
          };
          busy.set(false);

          match result {
            | Ok(_) => {
              notifier.success(
                mutation.success_message()
              );
              open.set(false);
              store.settle(mutation);
            }
            | Err(SubmitError::Validation(
              error
            )) if error.is_field_error() => {
              field_error.set(Some(error));
            }
            | Err(SubmitError::Validation(
              error
            )) => {
              notifier
                .warning(error.to_string());
            }
            | Err(SubmitError::Gateway(_)) => {
              if mutation.notifies_failure() {
                notifier.error(
                  mutation.failure_message()
                );
              }
            }
          }
        });
      }
    )
  };

  let label = props
    .label
    .clone()
    .unwrap_or(AttrValue::Static(
      default_label(kind)
    ));

  let trigger = html! {
    <button
      type="button"
      class={classes!("btn", props.variant.to_string())}
      title={label.clone()}
      onclick={on_open}
    >
      if props.show_icon {
        <span class="btn-icon">{ trigger_icon(kind) }</span>
      }
      if props.show_label {
        <span>{ label.to_string() }</span>
      }
    </button>
  };

  if !*open {
    return trigger;
  }

  let today = today_in(store.config.tz())
    .format(DUE_DATE_FORMAT)
    .to_string();
  let due_value = draft
    .due_date
    .map(|date| {
      date
        .format(DUE_DATE_FORMAT)
        .to_string()
    })
    .unwrap_or_default();
  let (priority_hint, status_hint) =
    match kind {
      | FormKind::Create => {
        ("Média", "Pendente")
      }
      | FormKind::Edit => {
        (
          "Escolha a prioridade",
          "Escolha o status"
        )
      }
    };

  let error_for = |field: ValidationError| {
    match &*field_error {
      | Some(error) if *error == field => {
        html! { <p class="field-error">{ error.to_string() }</p> }
      }
      | _ => html! {}
    }
  };

  let body = if *loading {
    html! { <p class="muted">{ "Carregando..." }</p> }
  } else {
    html! {
      <form class="task-form" onsubmit={on_submit}>
        <label class="field">
          <span>{ "Título" }</span>
          <input
            type="text"
            placeholder="Título do job"
            value={draft.title.clone()}
            oninput={on_title}
          />
          { error_for(ValidationError::MissingTitle) }
        </label>
        <label class="field">
          <span>{ "Descrição" }</span>
          <textarea
            placeholder="Descreva o job"
            value={draft.description.clone()}
            oninput={on_description}
          />
          { error_for(ValidationError::MissingDescription) }
        </label>
        <label class="field">
          <span>{ "Imagem" }</span>
          <input
            type="file"
            accept={image_accept_attr()}
            onchange={on_image}
          />
        </label>
        <label class="field">
          <span>{ "Prazo de entrega" }</span>
          <input
            type="date"
            min={today}
            value={due_value}
            onchange={on_due_date}
          />
        </label>
        <div class="field-row">
          <label class="field">
            <span>{ "Prioridade" }</span>
            <select onchange={on_priority}>
              <option value="" selected={draft.priority.is_none()}>
                { priority_hint }
              </option>
              {
                for TaskPriority::ALL.iter().map(|priority| html! {
                  <option
                    value={priority.as_wire()}
                    selected={draft.priority == Some(*priority)}
                  >
                    { priority.label() }
                  </option>
                })
              }
            </select>
          </label>
          <label class="field">
            <span>{ "Status" }</span>
            <select onchange={on_status}>
              <option value="" selected={draft.status.is_none()}>
                { status_hint }
              </option>
              {
                for TaskStatus::ALL.iter().map(|status| html! {
                  <option
                    value={status.as_wire()}
                    selected={draft.status == Some(*status)}
                  >
                    { status.label() }
                  </option>
                })
              }
            </select>
          </label>
        </div>
        <div class="dialog-actions">
          <button type="submit" class="btn primary" disabled={*busy}>
            { kind.submit_label() }
          </button>
        </div>
      </form>
    }
  };

  html! {
    <>
      { trigger }
      <div class="overlay" onclick={on_close.clone()}>
        <div class="dialog" role="dialog" onclick={stop}>
          <div class="dialog-header">
            <h3>{ kind.heading() }</h3>
            <button
              type="button"
              class="btn ghost icon"
              aria-label="Fechar"
              onclick={on_close}
            >
              { "✕" }
            </button>
          </div>
          { body }
        </div>
      </div>
    </>
  }
}
