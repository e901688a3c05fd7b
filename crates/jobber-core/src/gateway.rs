use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::task::{
  DUE_DATE_FORMAT,
  Task,
  TaskId,
  TaskPriority,
  TaskStatus
};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
  #[error("network error: {0}")]
  Network(String),

  #[error("server returned {status}: {body}")]
  Server { status: u16, body: String },

  #[error("task {0} not found")]
  NotFound(TaskId),

  #[error("failed to decode response: {0}")]
  Decode(String)
}

impl GatewayError {
  pub fn is_network(&self) -> bool {
    matches!(self, GatewayError::Network(_))
  }

  /// Maps a non-2xx status for a request about `id`.
  pub fn from_status(
    status: u16,
    body: String,
    id: Option<TaskId>
  ) -> Self {
    match (status, id) {
      | (404, Some(id)) => {
        GatewayError::NotFound(id)
      }
      | _ => {
        GatewayError::Server { status, body }
      }
    }
  }
}

/// A file picked in a form's image input.
pub trait ImageSource {
  fn name(&self) -> String;
  fn size_bytes(&self) -> u64;
  fn mime_type(&self) -> String;
}

/// Full set of writable fields sent on create and update.
///
/// Updates are full replacements, so every field is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
  pub title:       String,
  pub description: String,
  pub due_date:    Option<NaiveDate>,
  pub priority:    TaskPriority,
  pub status:      TaskStatus,
  pub owner:       u64
}

impl TaskFields {
  /// Text parts of the multipart body, in submission order.
  pub fn multipart_fields(
    &self
  ) -> Vec<(&'static str, String)> {
    vec![
      ("title", self.title.clone()),
      (
        "description",
        self.description.clone()
      ),
      (
        "due_date",
        self
          .due_date
          .map(|d| {
            d.format(DUE_DATE_FORMAT)
              .to_string()
          })
          .unwrap_or_default()
      ),
      ("owner", self.owner.to_string()),
      (
        "priority",
        self.priority.as_wire().to_string()
      ),
      (
        "status",
        self.status.as_wire().to_string()
      ),
    ]
  }
}

/// Routes of the task REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
  base_url: String
}

impl Endpoints {
  pub fn new(base_url: &str) -> Self {
    Self {
      base_url: base_url
        .trim_end_matches('/')
        .to_string()
    }
  }

  pub fn tasks(&self) -> String {
    format!("{}/api/tasks/", self.base_url)
  }

  pub fn task(
    &self,
    id: TaskId
  ) -> String {
    format!(
      "{}/api/tasks/{id}/",
      self.base_url
    )
  }
}

/// The remote task API. Every view and form talks to the server through
/// this trait.
#[async_trait(?Send)]
pub trait TaskGateway {
  type Upload: ImageSource;

  async fn list_tasks(
    &self
  ) -> Result<Vec<Task>, GatewayError>;

  async fn get_task(
    &self,
    id: TaskId
  ) -> Result<Task, GatewayError>;

  async fn create_task(
    &self,
    fields: &TaskFields,
    image: Option<&Self::Upload>
  ) -> Result<Task, GatewayError>;

  async fn update_task(
    &self,
    id: TaskId,
    fields: &TaskFields,
    image: Option<&Self::Upload>
  ) -> Result<Task, GatewayError>;

  async fn delete_task(
    &self,
    id: TaskId
  ) -> Result<(), GatewayError>;
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::{
    Endpoints,
    GatewayError,
    TaskFields
  };
  use crate::task::{
    TaskId,
    TaskPriority,
    TaskStatus
  };

  #[test]
  fn endpoints_trim_trailing_slash() {
    let endpoints =
      Endpoints::new("http://localhost:8000/");
    assert_eq!(
      endpoints.tasks(),
      "http://localhost:8000/api/tasks/"
    );
    assert_eq!(
      endpoints.task(TaskId(12)),
      "http://localhost:8000/api/tasks/12/"
    );
  }

  #[test]
  fn multipart_always_carries_due_date_key()
   {
    let mut fields = TaskFields {
      title:       "A".to_string(),
      description: "B".to_string(),
      due_date:    None,
      priority:    TaskPriority::Normal,
      status:      TaskStatus::Todo,
      owner:       1
    };

    let parts = fields.multipart_fields();
    let keys: Vec<&str> =
      parts.iter().map(|(k, _)| *k).collect();
    assert_eq!(
      keys,
      vec![
        "title",
        "description",
        "due_date",
        "owner",
        "priority",
        "status"
      ]
    );
    assert_eq!(parts[2].1, "");
    assert_eq!(parts[3].1, "1");
    assert_eq!(parts[4].1, "Normal");
    assert_eq!(parts[5].1, "Todo");

    fields.due_date =
      NaiveDate::from_ymd_opt(2025, 1, 1);
    fields.status = TaskStatus::InProgress;
    let parts = fields.multipart_fields();
    assert_eq!(parts[2].1, "2025-01-01");
    assert_eq!(parts[5].1, "Em andamento");
  }

  #[test]
  fn not_found_only_for_id_requests() {
    assert_eq!(
      GatewayError::from_status(
        404,
        String::new(),
        Some(TaskId(3))
      ),
      GatewayError::NotFound(TaskId(3))
    );
    assert!(matches!(
      GatewayError::from_status(404, String::new(), None),
      GatewayError::Server { status: 404, .. }
    ));
    assert!(
      GatewayError::Network("down".into())
        .is_network()
    );
  }
}
