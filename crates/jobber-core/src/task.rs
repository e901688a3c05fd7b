use std::fmt;

use chrono::{
  DateTime,
  NaiveDate,
  NaiveDateTime,
  Utc
};
use serde::{
  Deserialize,
  Serialize
};

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
  Default,
)]
pub enum TaskPriority {
  #[serde(rename = "low")]
  Low,
  #[default]
  #[serde(rename = "Normal")]
  Normal,
  #[serde(rename = "high")]
  High
}

impl TaskPriority {
  /// Order used by select widgets.
  pub const ALL: [TaskPriority; 3] = [
    TaskPriority::Normal,
    TaskPriority::Low,
    TaskPriority::High
  ];

  pub fn as_wire(self) -> &'static str {
    match self {
      | TaskPriority::Low => "low",
      | TaskPriority::Normal => "Normal",
      | TaskPriority::High => "high"
    }
  }

  pub fn from_wire(
    raw: &str
  ) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|p| p.as_wire() == raw)
  }

  pub fn label(self) -> &'static str {
    match self {
      | TaskPriority::Low => "Baixa",
      | TaskPriority::Normal => "Média",
      | TaskPriority::High => "Alta"
    }
  }

  pub fn badge_variant(
    self
  ) -> &'static str {
    match self {
      | TaskPriority::Normal => {
        "pendente"
      }
      | TaskPriority::Low => "andamento",
      | TaskPriority::High => {
        "finalizado"
      }
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
  Default,
)]
pub enum TaskStatus {
  #[default]
  #[serde(rename = "Todo")]
  Todo,
  #[serde(rename = "Em andamento")]
  InProgress,
  #[serde(rename = "Finalizado")]
  Done
}

impl TaskStatus {
  pub const ALL: [TaskStatus; 3] = [
    TaskStatus::Todo,
    TaskStatus::InProgress,
    TaskStatus::Done
  ];

  pub fn as_wire(self) -> &'static str {
    match self {
      | TaskStatus::Todo => "Todo",
      | TaskStatus::InProgress => {
        "Em andamento"
      }
      | TaskStatus::Done => "Finalizado"
    }
  }

  pub fn from_wire(
    raw: &str
  ) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|s| s.as_wire() == raw)
  }

  pub fn label(self) -> &'static str {
    match self {
      | TaskStatus::Todo => "Pendente",
      | TaskStatus::InProgress => {
        "Em andamento"
      }
      | TaskStatus::Done => "Finalizado"
    }
  }

  pub fn badge_variant(
    self
  ) -> &'static str {
    match self {
      | TaskStatus::Todo => "pendente",
      | TaskStatus::InProgress => {
        "andamento"
      }
      | TaskStatus::Done => "finalizado"
    }
  }
}

/// A task as returned by `/api/tasks/`.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct Task {
  pub id:          TaskId,
  #[serde(default)]
  pub title:       String,
  #[serde(default)]
  pub description: String,
  #[serde(with = "created_at_serde")]
  pub created_at:  DateTime<Utc>,
  #[serde(
    default,
    with = "due_date_serde"
  )]
  pub due_date:    Option<NaiveDate>,
  #[serde(default)]
  pub priority:    TaskPriority,
  #[serde(default)]
  pub status:      TaskStatus,
  #[serde(default)]
  pub image:       Option<String>,
  pub owner:       u64
}

impl Task {
  pub fn created_label(&self) -> String {
    self
      .created_at
      .format("%d/%m/%Y")
      .to_string()
  }

  pub fn due_label(&self) -> String {
    match self.due_date {
      | Some(date) => {
        date
          .format("%d/%m/%Y")
          .to_string()
      }
      | None => "Nenhum".to_string()
    }
  }

  pub fn image_url(&self) -> Option<&str> {
    self
      .image
      .as_deref()
      .filter(|url| !url.trim().is_empty())
  }
}

pub const DUE_DATE_FORMAT: &str =
  "%Y-%m-%d";

/// Parses a due date as sent by the API: a plain date, an ISO date-time
/// (date part kept) or an empty string.
pub fn parse_due_date(
  raw: &str
) -> Option<NaiveDate> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return None;
  }
  let date_part =
    trimmed.get(..10).unwrap_or(trimmed);
  NaiveDate::parse_from_str(
    date_part,
    DUE_DATE_FORMAT
  )
  .ok()
}

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = [
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M:%S%.f"
];

/// Parses a creation timestamp: RFC 3339, a naive date-time or a plain
/// date. Values without an offset are taken as UTC.
pub fn parse_created_at(
  raw: &str
) -> Option<DateTime<Utc>> {
  let trimmed = raw.trim();
  if let Ok(value) =
    DateTime::parse_from_rfc3339(trimmed)
  {
    return Some(value.with_timezone(&Utc));
  }
  for format in NAIVE_DATE_TIME_FORMATS {
    if let Ok(value) =
      NaiveDateTime::parse_from_str(
        trimmed, format
      )
    {
      return Some(value.and_utc());
    }
  }
  NaiveDate::parse_from_str(
    trimmed,
    DUE_DATE_FORMAT
  )
  .ok()
  .and_then(|date| date.and_hms_opt(0, 0, 0))
  .map(|value| value.and_utc())
}

pub mod created_at_serde {
  use chrono::{
    DateTime,
    Utc
  };
  use serde::{
    Deserialize,
    Deserializer,
    Serializer
  };

  use super::parse_created_at;

  pub fn serialize<S>(
    value: &DateTime<Utc>,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    serializer
      .serialize_str(&value.to_rfc3339())
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<DateTime<Utc>, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw =
      String::deserialize(deserializer)?;
    parse_created_at(&raw).ok_or_else(|| {
      serde::de::Error::custom(format!(
        "invalid created_at: {raw}"
      ))
    })
  }
}

pub mod due_date_serde {
  use chrono::NaiveDate;
  use serde::{
    Deserialize,
    Deserializer,
    Serializer
  };

  use super::{
    DUE_DATE_FORMAT,
    parse_due_date
  };

  pub fn serialize<S>(
    date: &Option<NaiveDate>,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    match date {
      | Some(value) => {
        serializer.serialize_str(
          &value
            .format(DUE_DATE_FORMAT)
            .to_string()
        )
      }
      | None => serializer.serialize_none()
    }
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<Option<NaiveDate>, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw = Option::<String>::deserialize(
      deserializer
    )?;
    match raw {
      | None => Ok(None),
      | Some(text)
        if text.trim().is_empty() =>
      {
        Ok(None)
      }
      | Some(text) => {
        parse_due_date(&text)
          .map(Some)
          .ok_or_else(|| {
            serde::de::Error::custom(
              format!(
                "invalid due_date: {text}"
              )
            )
          })
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::{
    Task,
    TaskId,
    TaskPriority,
    TaskStatus,
    parse_created_at,
    parse_due_date
  };

  #[test]
  fn decodes_api_payload() {
    let raw = r#"{
      "id": 7,
      "title": "Pintar a casa",
      "created_at": "2024-06-01T12:34:56.789012Z",
      "description": "Sala e cozinha",
      "image": null,
      "due_date": "2024-06-10",
      "priority": "high",
      "status": "Em andamento",
      "owner": 1
    }"#;

    let task: Task =
      serde_json::from_str(raw).unwrap();
    assert_eq!(task.id, TaskId(7));
    assert_eq!(
      task.priority,
      TaskPriority::High
    );
    assert_eq!(
      task.status,
      TaskStatus::InProgress
    );
    assert_eq!(
      task.due_date,
      NaiveDate::from_ymd_opt(2024, 6, 10)
    );
    assert_eq!(task.created_label(), "01/06/2024");
    assert_eq!(task.due_label(), "10/06/2024");
    assert!(task.image_url().is_none());
  }

  #[test]
  fn empty_due_date_and_missing_enums_use_defaults()
   {
    let raw = r#"{
      "id": 1,
      "title": "x",
      "created_at": "2024-06-01T00:00:00Z",
      "due_date": "",
      "owner": 1
    }"#;

    let task: Task =
      serde_json::from_str(raw).unwrap();
    assert_eq!(task.due_date, None);
    assert_eq!(task.due_label(), "Nenhum");
    assert_eq!(
      task.priority,
      TaskPriority::Normal
    );
    assert_eq!(task.status, TaskStatus::Todo);
  }

  #[test]
  fn created_at_accepts_rfc3339_with_offset() {
    let parsed =
      parse_created_at("2024-06-01T09:34:56-03:00")
        .unwrap();
    assert_eq!(
      parsed.to_rfc3339(),
      "2024-06-01T12:34:56+00:00"
    );
  }

  #[test]
  fn created_at_naive_date_time_is_utc() {
    let parsed =
      parse_created_at("2024-06-01T12:34:56.789012")
        .unwrap();
    assert_eq!(
      parsed.format("%Y-%m-%d %H:%M:%S").to_string(),
      "2024-06-01 12:34:56"
    );
    assert!(
      parse_created_at("2024-06-01 12:34:56")
        .is_some()
    );
  }

  #[test]
  fn created_at_plain_date_is_midnight_utc() {
    let parsed =
      parse_created_at("2024-06-01").unwrap();
    assert_eq!(
      parsed.to_rfc3339(),
      "2024-06-01T00:00:00+00:00"
    );
    assert!(parse_created_at("ontem").is_none());
  }

  #[test]
  fn list_with_naive_timestamp_decodes() {
    let raw = r#"[
      {"id": 1, "title": "a", "created_at": "2024-06-01T12:34:56Z", "owner": 1},
      {"id": 2, "title": "b", "created_at": "2024-06-01T12:34:56.789012", "owner": 1}
    ]"#;

    let tasks: Vec<Task> =
      serde_json::from_str(raw).unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(
      tasks[1].created_label(),
      "01/06/2024"
    );
  }

  #[test]
  fn unknown_status_is_rejected() {
    let raw = r#"{
      "id": 1,
      "title": "x",
      "created_at": "2024-06-01T00:00:00Z",
      "status": "Blocked",
      "owner": 1
    }"#;

    assert!(
      serde_json::from_str::<Task>(raw)
        .is_err()
    );
  }

  #[test]
  fn wire_strings_round_trip() {
    for priority in TaskPriority::ALL {
      assert_eq!(
        TaskPriority::from_wire(
          priority.as_wire()
        ),
        Some(priority)
      );
    }
    for status in TaskStatus::ALL {
      assert_eq!(
        TaskStatus::from_wire(
          status.as_wire()
        ),
        Some(status)
      );
    }
    assert_eq!(
      TaskPriority::from_wire("medium"),
      None
    );
  }

  #[test]
  fn parses_datetime_due_dates() {
    assert_eq!(
      parse_due_date(
        "2025-01-01T00:00:00Z"
      ),
      NaiveDate::from_ymd_opt(2025, 1, 1)
    );
    assert_eq!(parse_due_date("  "), None);
    assert_eq!(parse_due_date("soon"), None);
  }
}
