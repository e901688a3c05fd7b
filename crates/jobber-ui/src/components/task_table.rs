use jobber_core::filter::{
  ALL_VALUE,
  parse_priority_filter,
  parse_status_filter,
  priority_filter_value,
  status_filter_value
};
use jobber_core::{
  FormKind,
  RequestScope,
  TableBody,
  Task,
  TaskFilter,
  TaskId,
  TaskPriority,
  TaskStatus
};
use web_sys::{
  HtmlInputElement,
  InputEvent,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  TargetCast,
  classes,
  function_component,
  html,
  use_effect_with,
  use_state
};

use super::{
  DeleteTask,
  DueBadgeView,
  PLACEHOLDER_IMAGE,
  StatusBadge,
  TaskFormDialog
};
use crate::app::ui_debug;
use crate::state::{
  SelectionAction,
  use_selection,
  use_task_store
};

const PRIORITY_FILTER_ORDER: [TaskPriority;
  3] = [
  TaskPriority::Low,
  TaskPriority::Normal,
  TaskPriority::High
];

fn filter_option(
  value: &'static str,
  label: &'static str,
  current: &'static str,
  on_pick: &Callback<&'static str>
) -> Html {
  let on_pick = on_pick.clone();
  let active = value == current;
  html! {
    <button
      type="button"
      role="menuitemradio"
      aria-checked={active.to_string()}
      class={classes!("menu-item", active.then_some("active"))}
      onclick={move |_| on_pick.emit(value)}
    >
      { label }
    </button>
  }
}

/// Searchable, filterable table of every task.
#[function_component(TaskTable)]
pub fn task_table() -> Html {
  let store = use_task_store();
  let selection = use_selection();
  let filter = use_state(TaskFilter::default);
  let filters_open = use_state(|| false);
  let open_menu =
    use_state(|| None::<TaskId>);

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

  let verbose = store.config.verbose();

  let on_search = {
    let filter = filter.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        let mut next = (*filter).clone();
        next.search = input.value();
        filter.set(next);
      }
    )
  };

  let on_toggle_filters = {
    let filters_open = filters_open.clone();
    Callback::from(move |_: MouseEvent| {
      filters_open.set(!*filters_open)
    })
  };

  let on_status = {
    let filter = filter.clone();
    Callback::from(
      move |value: &'static str| {
        ui_debug(
          verbose,
          "filter.status",
          value
        );
        let mut next = (*filter).clone();
        next.status =
          parse_status_filter(value);
        filter.set(next);
      }
    )
  };

  let on_priority = {
    let filter = filter.clone();
    Callback::from(
      move |value: &'static str| {
        ui_debug(
          verbose,
          "filter.priority",
          value
        );
        let mut next = (*filter).clone();
        next.priority =
          parse_priority_filter(value);
        filter.set(next);
      }
    )
  };

  let current_status =
    status_filter_value(filter.status);
  let current_priority =
    priority_filter_value(filter.priority);

  let table_body =
    store.with_cache(|cache| {
      TableBody::derive(cache, &filter)
    });

  let render_row = |task: &Task| {
    let task_id = task.id;
    let on_open = {
      let selection = selection.clone();
      Callback::from(move |_: MouseEvent| {
        ui_debug(
          verbose,
          "row.open",
          &task_id.to_string()
        );
        selection.dispatch(
          SelectionAction::Open(task_id)
        );
      })
    };
    let on_menu = {
      let open_menu = open_menu.clone();
      Callback::from(
        move |event: MouseEvent| {
          event.stop_propagation();
          if *open_menu == Some(task_id) {
            open_menu.set(None);
          } else {
            open_menu.set(Some(task_id));
          }
        }
      )
    };
    let stop = Callback::from(
      |event: MouseEvent| {
        event.stop_propagation()
      }
    );
    let thumb = task
      .image_url()
      .unwrap_or(PLACEHOLDER_IMAGE)
      .to_string();
    let menu_open =
      *open_menu == Some(task_id);

    html! {
      <tr key={task_id.to_string()} class="row" onclick={on_open}>
        <td class="thumb-cell">
          <img class="thumb" src={thumb} alt="" />
        </td>
        <td class="title-cell">{ task.title.clone() }</td>
        <td><StatusBadge status={task.status} /></td>
        <td><DueBadgeView due_date={task.due_date} /></td>
        <td class="actions-cell" onclick={stop}>
          <button
            type="button"
            class="btn ghost icon"
            aria-haspopup="true"
            aria-label="Abrir menu"
            onclick={on_menu}
          >
            { "⋯" }
          </button>
          if menu_open {
            <div class="menu" role="menu">
              <div class="menu-label">{ "Opções" }</div>
              <TaskFormDialog
                kind={FormKind::Edit}
                task_id={Some(task_id)}
                show_label=true
                variant="ghost"
              />
              <DeleteTask id={task_id} show_label=true />
            </div>
          }
        </td>
      </tr>
    }
  };

  let body = match table_body {
    | TableBody::Failed => html! {
      <tr><td colspan="5" class="muted">{ "Falha ao carregar os jobs." }</td></tr>
    },
    | TableBody::Loading => html! {
      <tr><td colspan="5" class="muted">{ "Carregando..." }</td></tr>
    },
    | TableBody::NoResults => html! {
      <tr><td colspan="5" class="muted">{ "Nenhum resultado." }</td></tr>
    },
    | TableBody::Rows(rows) => html! {
      <>{ for rows.iter().map(render_row) }</>
    }
  };

  html! {
    <div class="task-table">
      <div class="toolbar">
        <input
          class="search"
          type="search"
          placeholder="Pesquisar Jobs..."
          value={filter.search.clone()}
          oninput={on_search}
        />
        <div class="filters">
          <button
            type="button"
            class={classes!("btn", "outline", filter.is_active().then_some("active"))}
            onclick={on_toggle_filters}
          >
            { "Filtros" }
          </button>
          if *filters_open {
            <div class="menu filters-menu" role="menu">
              <div class="menu-label">{ "Status" }</div>
              { filter_option(ALL_VALUE, "Todos", current_status, &on_status) }
              {
                for TaskStatus::ALL.iter().map(|status| {
                  filter_option(status.as_wire(), status.label(), current_status, &on_status)
                })
              }
              <div class="menu-separator" />
              <div class="menu-label">{ "Prioridade" }</div>
              { filter_option(ALL_VALUE, "Todos", current_priority, &on_priority) }
              {
                for PRIORITY_FILTER_ORDER.iter().map(|priority| {
                  filter_option(priority.as_wire(), priority.label(), current_priority, &on_priority)
                })
              }
            </div>
          }
        </div>
        <div class="desktop-only">
          <TaskFormDialog kind={FormKind::Create} show_icon=true show_label=true />
        </div>
      </div>
      <table class="table">
        <thead>
          <tr>
            <th class="thumb-cell">{ "📷" }</th>
            <th>{ "Título" }</th>
            <th>{ "Status" }</th>
            <th>{ "Prazo" }</th>
            <th class="actions-cell" />
          </tr>
        </thead>
        <tbody>{ body }</tbody>
      </table>
    </div>
  }
}
