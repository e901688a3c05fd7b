use std::cell::{
  Cell,
  RefCell
};
use std::collections::HashMap;
use std::rc::Rc;

use crate::task::{
  Task,
  TaskId
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash,
)]
pub enum QueryKey {
  List,
  Task(TaskId)
}

/// Issued when a fetch starts; presented again when it settles.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct Ticket {
  key:   QueryKey,
  seq:   u64,
  epoch: u64
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum LoadState {
  Idle,
  Loading,
  Ready,
  Failed
}

/// Single source of truth for fetched tasks.
///
/// Only the most recently issued ticket for a key may write that key,
/// and `invalidate` retires every outstanding ticket. A slow response
/// for one task therefore never lands on top of a newer one.
#[derive(Debug, Default)]
pub struct TaskCache {
  epoch:    u64,
  next_seq: u64,
  inflight: HashMap<QueryKey, u64>,
  failed:   HashMap<QueryKey, u64>,
  list:     Option<Vec<Task>>,
  tasks:    HashMap<TaskId, Task>
}

impl TaskCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn epoch(&self) -> u64 {
    self.epoch
  }

  pub fn begin(
    &mut self,
    key: QueryKey
  ) -> Ticket {
    self.next_seq += 1;
    self.inflight.insert(key, self.next_seq);
    Ticket {
      key,
      seq: self.next_seq,
      epoch: self.epoch
    }
  }

  pub fn is_current(
    &self,
    ticket: &Ticket
  ) -> bool {
    ticket.epoch == self.epoch
      && self.inflight.get(&ticket.key)
        == Some(&ticket.seq)
  }

  fn settle(
    &mut self,
    ticket: &Ticket
  ) -> bool {
    if !self.is_current(ticket) {
      tracing::debug!(
        key = ?ticket.key,
        seq = ticket.seq,
        epoch = ticket.epoch,
        current_epoch = self.epoch,
        "discarding superseded response"
      );
      return false;
    }
    self.inflight.remove(&ticket.key);
    true
  }

  pub fn resolve_list(
    &mut self,
    ticket: Ticket,
    tasks: Vec<Task>
  ) -> bool {
    if ticket.key != QueryKey::List
      || !self.settle(&ticket)
    {
      return false;
    }
    self.failed.remove(&QueryKey::List);
    self.list = Some(tasks);
    true
  }

  pub fn resolve_task(
    &mut self,
    ticket: Ticket,
    task: Task
  ) -> bool {
    if ticket.key != QueryKey::Task(task.id)
      || !self.settle(&ticket)
    {
      return false;
    }
    self.failed.remove(&ticket.key);
    self.tasks.insert(task.id, task);
    true
  }

  pub fn fail(
    &mut self,
    ticket: Ticket
  ) -> bool {
    if !self.settle(&ticket) {
      return false;
    }
    self.failed.insert(ticket.key, self.epoch);
    true
  }

  /// Forgets an in-flight request whose view went away, leaving the key
  /// free to be fetched again.
  pub fn abandon(
    &mut self,
    ticket: Ticket
  ) {
    if self.is_current(&ticket) {
      self.inflight.remove(&ticket.key);
    }
  }

  pub fn list(&self) -> Option<&[Task]> {
    self.list.as_deref()
  }

  pub fn task(
    &self,
    id: TaskId
  ) -> Option<&Task> {
    self.tasks.get(&id)
  }

  pub fn evict_task(
    &mut self,
    id: TaskId
  ) {
    self.tasks.remove(&id);
    self.failed.remove(&QueryKey::Task(id));
  }

  pub fn load_state(
    &self,
    key: QueryKey
  ) -> LoadState {
    let has_value = match key {
      | QueryKey::List => self.list.is_some(),
      | QueryKey::Task(id) => {
        self.tasks.contains_key(&id)
      }
    };

    if self.inflight.contains_key(&key) {
      LoadState::Loading
    } else if self.failed.get(&key)
      == Some(&self.epoch)
    {
      LoadState::Failed
    } else if has_value {
      LoadState::Ready
    } else {
      LoadState::Idle
    }
  }

  /// Whether a view mounting now should start a fetch for `key`.
  pub fn needs_fetch(
    &self,
    key: QueryKey
  ) -> bool {
    matches!(
      self.load_state(key),
      LoadState::Idle
    )
  }

  /// Drops every entry and retires outstanding tickets after a mutation.
  pub fn invalidate(&mut self) {
    self.epoch += 1;
    self.inflight.clear();
    self.failed.clear();
    self.list = None;
    self.tasks.clear();
    tracing::info!(
      epoch = self.epoch,
      "task cache invalidated"
    );
  }
}

/// Cancellation token tied to the lifetime of the view that issued a
/// request. Results that arrive after `cancel` are dropped.
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
  cancelled: Rc<Cell<bool>>
}

impl RequestScope {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn cancel(&self) {
    self.cancelled.set(true);
  }

  pub fn is_cancelled(&self) -> bool {
    self.cancelled.get()
  }
}

/// Scopes of every view waiting on one shared request. Its response is
/// still wanted while at least one of them is live.
#[derive(Debug, Clone, Default)]
pub struct ScopeSet {
  scopes: Rc<RefCell<Vec<RequestScope>>>
}

impl ScopeSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn join(
    &self,
    scope: &RequestScope
  ) {
    self.scopes.borrow_mut().push(scope.clone());
  }

  pub fn len(&self) -> usize {
    self.scopes.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.scopes.borrow().is_empty()
  }

  /// Empties the set and reports whether every waiter had gone away.
  pub fn drain_all_cancelled(&self) -> bool {
    self
      .scopes
      .take()
      .iter()
      .all(RequestScope::is_cancelled)
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::{
    LoadState,
    QueryKey,
    RequestScope,
    ScopeSet,
    TaskCache
  };
  use crate::task::{
    Task,
    TaskId,
    TaskPriority,
    TaskStatus
  };

  fn task(id: u64, title: &str) -> Task {
    Task {
      id: TaskId(id),
      title: title.to_string(),
      description: String::new(),
      created_at: Utc::now(),
      due_date: None,
      priority: TaskPriority::Normal,
      status: TaskStatus::Todo,
      image: None,
      owner: 1
    }
  }

  #[test]
  fn list_lifecycle() {
    let mut cache = TaskCache::new();
    assert_eq!(
      cache.load_state(QueryKey::List),
      LoadState::Idle
    );
    assert!(cache.needs_fetch(QueryKey::List));

    let ticket = cache.begin(QueryKey::List);
    assert_eq!(
      cache.load_state(QueryKey::List),
      LoadState::Loading
    );
    assert!(!cache.needs_fetch(QueryKey::List));

    assert!(
      cache.resolve_list(ticket, vec![task(
        1, "a"
      )])
    );
    assert_eq!(
      cache.load_state(QueryKey::List),
      LoadState::Ready
    );
    assert_eq!(cache.list().map(<[Task]>::len), Some(1));
  }

  #[test]
  fn failure_is_distinct_from_empty() {
    let mut cache = TaskCache::new();
    let ticket = cache.begin(QueryKey::List);
    assert!(cache.fail(ticket));
    assert_eq!(
      cache.load_state(QueryKey::List),
      LoadState::Failed
    );
    assert!(cache.list().is_none());

    let ticket = cache.begin(QueryKey::List);
    assert!(cache.resolve_list(ticket, vec![]));
    assert_eq!(
      cache.load_state(QueryKey::List),
      LoadState::Ready
    );
  }

  #[test]
  fn newer_ticket_for_same_key_wins() {
    let mut cache = TaskCache::new();
    let first = cache.begin(QueryKey::Task(TaskId(1)));
    let second = cache.begin(QueryKey::Task(TaskId(1)));

    assert!(cache.resolve_task(second, task(1, "new")));
    assert!(!cache.resolve_task(first, task(1, "old")));
    assert_eq!(
      cache.task(TaskId(1)).map(|t| t.title.as_str()),
      Some("new")
    );
  }

  #[test]
  fn out_of_order_responses_stay_under_their_own_key()
   {
    let mut cache = TaskCache::new();
    let a = cache.begin(QueryKey::Task(TaskId(1)));
    let b = cache.begin(QueryKey::Task(TaskId(2)));

    assert!(cache.resolve_task(b, task(2, "B")));
    assert!(cache.resolve_task(a, task(1, "A")));

    assert_eq!(
      cache.task(TaskId(2)).map(|t| t.title.as_str()),
      Some("B")
    );
  }

  #[test]
  fn ticket_cannot_write_another_key() {
    let mut cache = TaskCache::new();
    let ticket = cache.begin(QueryKey::Task(TaskId(1)));
    assert!(
      !cache.resolve_task(ticket, task(2, "wrong"))
    );
    assert!(cache.task(TaskId(2)).is_none());
  }

  #[test]
  fn invalidate_retires_outstanding_tickets() {
    let mut cache = TaskCache::new();
    let list = cache.begin(QueryKey::List);
    let one = cache.begin(QueryKey::Task(TaskId(1)));

    cache.invalidate();
    assert_eq!(cache.epoch(), 1);
    assert!(
      !cache.resolve_list(list, vec![task(
        1, "stale"
      )])
    );
    assert!(
      !cache.resolve_task(one, task(1, "stale"))
    );
    assert!(!cache.fail(list));
    assert!(cache.needs_fetch(QueryKey::List));
  }

  #[test]
  fn evict_forgets_task() {
    let mut cache = TaskCache::new();
    let ticket = cache.begin(QueryKey::Task(TaskId(3)));
    cache.resolve_task(ticket, task(3, "c"));
    cache.evict_task(TaskId(3));
    assert!(cache.task(TaskId(3)).is_none());
    assert_eq!(
      cache.load_state(QueryKey::Task(TaskId(3))),
      LoadState::Idle
    );
  }

  #[test]
  fn abandoned_request_can_be_retried() {
    let mut cache = TaskCache::new();
    let ticket = cache.begin(QueryKey::List);
    cache.abandon(ticket);
    assert!(cache.needs_fetch(QueryKey::List));
    assert!(!cache.resolve_list(ticket, vec![]));
  }

  #[test]
  fn scope_cancellation_is_shared_by_clones() {
    let scope = RequestScope::new();
    let handle = scope.clone();
    assert!(!handle.is_cancelled());
    scope.cancel();
    assert!(handle.is_cancelled());
  }

  #[test]
  fn shared_request_survives_while_one_waiter_is_live() {
    let waiters = ScopeSet::new();
    let table = RequestScope::new();
    let carousel = RequestScope::new();
    waiters.join(&table);
    waiters.join(&carousel);
    assert_eq!(waiters.len(), 2);

    table.cancel();
    assert!(!waiters.drain_all_cancelled());
    assert!(waiters.is_empty());
  }

  #[test]
  fn shared_request_is_dropped_once_every_waiter_left() {
    let waiters = ScopeSet::new();
    let handle = waiters.clone();
    let only = RequestScope::new();
    handle.join(&only);

    only.cancel();
    assert!(waiters.drain_all_cancelled());
  }
}
