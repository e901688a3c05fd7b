use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use jobber_core::{
  AppConfig,
  LoadState,
  ModalSelection,
  Mutation,
  QueryKey,
  RequestScope,
  ScopeSet,
  SettleStrategy,
  TaskCache,
  TaskGateway,
  TaskId
};
use uuid::Uuid;
use yew::{
  Reducible,
  UseReducerDispatcher,
  UseReducerHandle,
  hook,
  use_context
};

use crate::api::AppGateway;

#[derive(
  Debug, Clone, Default, PartialEq,
)]
pub struct SelectionStore {
  pub selection: ModalSelection
}

pub enum SelectionAction {
  Open(TaskId),
  Close
}

impl Reducible for SelectionStore {
  type Action = SelectionAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    match action {
      | SelectionAction::Open(id) => {
        next.selection.open(id)
      }
      | SelectionAction::Close => {
        next.selection.close()
      }
    }
    Rc::new(next)
  }
}

/// Handed to every view that opens or shows the detail modal.
pub type SelectionContext =
  UseReducerHandle<SelectionStore>;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ToastKind {
  Success,
  Error,
  Warning
}

impl ToastKind {
  pub fn class(self) -> &'static str {
    match self {
      | ToastKind::Success => {
        "toast success"
      }
      | ToastKind::Error => "toast error",
      | ToastKind::Warning => {
        "toast warning"
      }
    }
  }

  pub fn icon(self) -> &'static str {
    match self {
      | ToastKind::Success => "✓",
      | ToastKind::Error => "✕",
      | ToastKind::Warning => "⚠️"
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
  pub id:      Uuid,
  pub kind:    ToastKind,
  pub message: String
}

#[derive(
  Debug, Clone, Default, PartialEq,
)]
pub struct ToastStore {
  pub toasts: Vec<Toast>
}

pub enum ToastAction {
  Push(Toast),
  Dismiss(Uuid)
}

impl Reducible for ToastStore {
  type Action = ToastAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    match action {
      | ToastAction::Push(toast) => {
        next.toasts.push(toast)
      }
      | ToastAction::Dismiss(id) => {
        next
          .toasts
          .retain(|toast| toast.id != id)
      }
    }
    Rc::new(next)
  }
}

#[derive(Clone, PartialEq)]
pub struct Notifier {
  dispatcher:  UseReducerDispatcher<ToastStore>,
  duration_ms: u32
}

impl Notifier {
  pub fn new(
    dispatcher: UseReducerDispatcher<
      ToastStore
    >,
    duration_ms: u32
  ) -> Self {
    Self {
      dispatcher,
      duration_ms
    }
  }

  pub fn notify(
    &self,
    kind: ToastKind,
    message: impl Into<String>
  ) {
    let toast = Toast {
      id: Uuid::new_v4(),
      kind,
      message: message.into()
    };
    let id = toast.id;
    tracing::debug!(
      %id,
      ?kind,
      message = %toast.message,
      "toast"
    );
    self
      .dispatcher
      .dispatch(ToastAction::Push(toast));

    let dispatcher =
      self.dispatcher.clone();
    Timeout::new(
      self.duration_ms,
      move || {
        dispatcher.dispatch(
          ToastAction::Dismiss(id)
        )
      }
    )
    .forget();
  }

  pub fn dismiss(&self, id: Uuid) {
    self
      .dispatcher
      .dispatch(ToastAction::Dismiss(id));
  }

  pub fn success(
    &self,
    message: impl Into<String>
  ) {
    self.notify(
      ToastKind::Success,
      message
    );
  }

  pub fn error(
    &self,
    message: impl Into<String>
  ) {
    self.notify(ToastKind::Error, message);
  }

  pub fn warning(
    &self,
    message: impl Into<String>
  ) {
    self.notify(
      ToastKind::Warning,
      message
    );
  }
}

/// Bumped whenever the task cache changes so consumers re-render.
#[derive(Debug, Default, PartialEq)]
pub struct RefreshTick(pub u64);

impl Reducible for RefreshTick {
  type Action = ();

  fn reduce(
    self: Rc<Self>,
    _action: ()
  ) -> Rc<Self> {
    Rc::new(RefreshTick(
      self.0.wrapping_add(1)
    ))
  }
}

/// Data layer shared by every view: the gateway, the query cache and
/// the app config.
#[derive(Clone)]
pub struct TaskStore {
  pub gateway: Rc<AppGateway>,
  pub config:  Rc<AppConfig>,
  cache:       Rc<RefCell<TaskCache>>,
  list_waiters: ScopeSet,
  refresh:     UseReducerDispatcher<RefreshTick>,
  version:     u64,
  epoch:       u64
}

impl PartialEq for TaskStore {
  fn eq(&self, other: &Self) -> bool {
    self.version == other.version
      && self.epoch == other.epoch
      && Rc::ptr_eq(&self.cache, &other.cache)
  }
}

impl TaskStore {
  pub fn new(
    gateway: Rc<AppGateway>,
    config: Rc<AppConfig>,
    cache: Rc<RefCell<TaskCache>>,
    list_waiters: ScopeSet,
    refresh: UseReducerDispatcher<
      RefreshTick
    >,
    version: u64
  ) -> Self {
    let epoch = cache.borrow().epoch();
    Self {
      gateway,
      config,
      cache,
      list_waiters,
      refresh,
      version,
      epoch
    }
  }

  pub fn epoch(&self) -> u64 {
    self.epoch
  }

  pub fn with_cache<R>(
    &self,
    read: impl FnOnce(&TaskCache) -> R
  ) -> R {
    read(&self.cache.borrow())
  }

  fn changed(&self) {
    self.refresh.dispatch(());
  }

  /// Starts a list fetch unless one is loaded or already running.
  ///
  /// Every view that asks while the fetch is pending joins it; the
  /// response is dropped only once all of them have gone.
  pub fn ensure_list(
    &self,
    scope: &RequestScope
  ) {
    let ticket = {
      let mut cache =
        self.cache.borrow_mut();
      match cache.load_state(QueryKey::List)
      {
        | LoadState::Idle => {
          self.list_waiters.join(scope);
          cache.begin(QueryKey::List)
        }
        | LoadState::Loading => {
          self.list_waiters.join(scope);
          return;
        }
        | LoadState::Ready
        | LoadState::Failed => return
      }
    };
    self.changed();

    let store = self.clone();
    wasm_bindgen_futures::spawn_local(
      async move {
        tracing::info!(
          epoch = store.epoch,
          "fetching task list"
        );
        let result =
          store.gateway.list_tasks().await;

        let current = store
          .cache
          .borrow()
          .is_current(&ticket);
        if current
          && store
            .list_waiters
            .drain_all_cancelled()
        {
          tracing::debug!(
            "list views gone; dropping \
             response"
          );
          store
            .cache
            .borrow_mut()
            .abandon(ticket);
          store.changed();
          return;
        }

        let applied = match result {
          | Ok(tasks) => {
            tracing::debug!(
              total = tasks.len(),
              "task list loaded"
            );
            store
              .cache
              .borrow_mut()
              .resolve_list(ticket, tasks)
          }
          | Err(error) => {
            tracing::error!(
              %error,
              "error fetching tasks"
            );
            store
              .cache
              .borrow_mut()
              .fail(ticket)
          }
        };
        if applied {
          store.changed();
        }
      }
    );
  }

  /// Fetches `id` afresh; the previous copy is dropped first so the
  /// modal never shows a stale task while opening.
  pub fn fetch_task(
    &self,
    id: TaskId,
    scope: &RequestScope
  ) {
    let ticket = {
      let mut cache =
        self.cache.borrow_mut();
      cache.evict_task(id);
      cache.begin(QueryKey::Task(id))
    };
    self.changed();

    let store = self.clone();
    let scope = scope.clone();
    wasm_bindgen_futures::spawn_local(
      async move {
        let result =
          store.gateway.get_task(id).await;

        if scope.is_cancelled() {
          tracing::debug!(
            task_id = %id,
            "selection moved on; dropping \
             response"
          );
          store
            .cache
            .borrow_mut()
            .abandon(ticket);
          store.changed();
          return;
        }

        let applied = match result {
          | Ok(task) => {
            store
              .cache
              .borrow_mut()
              .resolve_task(ticket, task)
          }
          | Err(error) => {
            tracing::error!(
              task_id = %id,
              %error,
              "error fetching task"
            );
            store
              .cache
              .borrow_mut()
              .fail(ticket)
          }
        };
        if applied {
          store.changed();
        }
      }
    );
  }

  pub fn invalidate(&self) {
    self.cache.borrow_mut().invalidate();
    self.changed();
  }

  /// Brings every view back in line with the server once `mutation`
  /// has succeeded.
  pub fn settle(
    &self,
    mutation: Mutation
  ) {
    let delay_ms = mutation
      .settle_delay_ms(&self.config);
    let strategy = self.config.settle;
    tracing::info!(
      ?mutation,
      delay_ms,
      ?strategy,
      "scheduling post-mutation refresh"
    );

    let store = self.clone();
    Timeout::new(delay_ms, move || {
      match strategy {
        | SettleStrategy::Refresh => {
          store.invalidate()
        }
        | SettleStrategy::FullReload => {
          reload_page()
        }
      }
    })
    .forget();
  }
}

pub fn reload_page() {
  let Some(window) = web_sys::window()
  else {
    return;
  };
  if let Err(error) =
    window.location().reload()
  {
    tracing::error!(
      ?error,
      "page reload failed"
    );
  }
}

// The providers are installed once by `App`; a missing one is a wiring bug.

#[hook]
pub fn use_task_store() -> TaskStore {
  use_context::<TaskStore>()
    .expect("TaskStore provider missing")
}

#[hook]
pub fn use_selection() -> SelectionContext {
  use_context::<SelectionContext>()
    .expect("selection provider missing")
}

#[hook]
pub fn use_notifier() -> Notifier {
  use_context::<Notifier>()
    .expect("notifier provider missing")
}

#[cfg(test)]
mod tests {
  use std::rc::Rc;

  use jobber_core::TaskId;
  use uuid::Uuid;
  use yew::Reducible;

  use super::{
    SelectionAction,
    SelectionStore,
    Toast,
    ToastAction,
    ToastKind,
    ToastStore
  };

  fn toast(message: &str) -> Toast {
    Toast {
      id:      Uuid::new_v4(),
      kind:    ToastKind::Success,
      message: message.to_string()
    }
  }

  #[test]
  fn selection_open_then_close() {
    let store = Rc::new(
      SelectionStore::default()
    )
    .reduce(SelectionAction::Open(
      TaskId(4)
    ));
    assert!(store.selection.open);
    assert_eq!(
      store.selection.active(),
      Some(TaskId(4))
    );

    let store =
      store.reduce(SelectionAction::Close);
    assert!(!store.selection.open);
    assert_eq!(
      store.selection.selected_task_id,
      None
    );
    assert_eq!(store.selection.revision, 2);
  }

  #[test]
  fn last_open_wins() {
    let store = Rc::new(
      SelectionStore::default()
    )
    .reduce(SelectionAction::Open(
      TaskId(1)
    ))
    .reduce(SelectionAction::Open(
      TaskId(2)
    ));
    assert_eq!(
      store.selection.active(),
      Some(TaskId(2))
    );
  }

  #[test]
  fn toasts_push_in_order_and_dismiss_by_id() {
    let first = toast("um");
    let second = toast("dois");
    let store =
      Rc::new(ToastStore::default())
        .reduce(ToastAction::Push(
          first.clone()
        ))
        .reduce(ToastAction::Push(
          second.clone()
        ));
    assert_eq!(
      store.toasts,
      vec![first.clone(), second.clone()]
    );

    let store = store
      .reduce(ToastAction::Dismiss(first.id));
    assert_eq!(store.toasts, vec![second]);

    let store = store.reduce(
      ToastAction::Dismiss(Uuid::new_v4())
    );
    assert_eq!(store.toasts.len(), 1);
  }

  #[test]
  fn toast_kind_classes() {
    assert_eq!(
      ToastKind::Error.class(),
      "toast error"
    );
    assert_eq!(ToastKind::Success.icon(), "✓");
  }
}
