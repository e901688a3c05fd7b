use crate::task::{
  Task,
  TaskPriority,
  TaskStatus
};

/// Select value meaning "no restriction".
pub const ALL_VALUE: &str = "all";

/// Search box plus the status and priority radio groups of the task table.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct TaskFilter {
  pub search:   String,
  pub status:   Option<TaskStatus>,
  pub priority: Option<TaskPriority>
}

impl TaskFilter {
  pub fn matches(
    &self,
    task: &Task
  ) -> bool {
    self.matches_search(task)
      && self.matches_status(task)
      && self.matches_priority(task)
  }

  pub fn matches_search(
    &self,
    task: &Task
  ) -> bool {
    if self.search.is_empty() {
      return true;
    }
    task
      .title
      .to_lowercase()
      .contains(&self.search.to_lowercase())
  }

  pub fn matches_status(
    &self,
    task: &Task
  ) -> bool {
    self
      .status
      .is_none_or(|status| task.status == status)
  }

  pub fn matches_priority(
    &self,
    task: &Task
  ) -> bool {
    self.priority.is_none_or(|priority| {
      task.priority == priority
    })
  }

  pub fn apply(
    &self,
    tasks: &[Task]
  ) -> Vec<Task> {
    tasks
      .iter()
      .filter(|task| self.matches(task))
      .cloned()
      .collect()
  }

  pub fn is_active(&self) -> bool {
    !self.search.is_empty()
      || self.status.is_some()
      || self.priority.is_some()
  }
}

pub fn status_filter_value(
  status: Option<TaskStatus>
) -> &'static str {
  status.map_or(ALL_VALUE, |s| {
    s.as_wire()
  })
}

pub fn parse_status_filter(
  raw: &str
) -> Option<TaskStatus> {
  TaskStatus::from_wire(raw)
}

pub fn priority_filter_value(
  priority: Option<TaskPriority>
) -> &'static str {
  priority.map_or(ALL_VALUE, |p| {
    p.as_wire()
  })
}

pub fn parse_priority_filter(
  raw: &str
) -> Option<TaskPriority> {
  TaskPriority::from_wire(raw)
}
