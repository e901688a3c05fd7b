use chrono::NaiveDate;
use thiserror::Error;

use crate::gateway::{
  ImageSource,
  TaskFields
};
use crate::task::{
  Task,
  TaskPriority,
  TaskStatus
};

const MIB: u64 = 1024 * 1024;

pub const ACCEPTED_IMAGE_MIME_TYPES: [&str;
  4] = [
  "image/jpeg",
  "image/jpg",
  "image/png",
  "image/webp"
];

/// Value for the `accept` attribute of the image input.
pub fn image_accept_attr() -> String {
  ACCEPTED_IMAGE_MIME_TYPES.join(",")
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum FormKind {
  Create,
  Edit
}

impl FormKind {
  pub fn max_image_bytes(self) -> u64 {
    match self {
      | FormKind::Create => 8 * MIB,
      | FormKind::Edit => 16 * MIB
    }
  }

  /// Only the edit form insists on a title and description.
  pub fn requires_text(self) -> bool {
    matches!(self, FormKind::Edit)
  }

  pub fn heading(self) -> &'static str {
    match self {
      | FormKind::Create => {
        "Adicionar um novo Job"
      }
      | FormKind::Edit => "Editar Job"
    }
  }

  pub fn submit_label(
    self
  ) -> &'static str {
    match self {
      | FormKind::Create => "Enviar",
      | FormKind::Edit => "Salvar"
    }
  }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
  #[error("Título é obrigatório")]
  MissingTitle,

  #[error("Descrição é obrigatória")]
  MissingDescription,

  #[error(
    "Tamanho máximo do arquivo deve ser de \
     {limit_mb}MB."
  )]
  ImageTooLarge { limit_mb: u64 },

  #[error(
    "Apenas .jpg, .jpeg, .png e .webp são \
     aceitos."
  )]
  UnsupportedImageType(String)
}

impl ValidationError {
  /// Field-level errors render under the input; the rest as a warning toast.
  pub fn is_field_error(&self) -> bool {
    matches!(
      self,
      ValidationError::MissingTitle
        | ValidationError::MissingDescription
    )
  }
}

/// Draft values of the create and edit dialogs.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct TaskForm {
  pub title:       String,
  pub description: String,
  pub due_date:    Option<NaiveDate>,
  pub priority:    Option<TaskPriority>,
  pub status:      Option<TaskStatus>
}

impl TaskForm {
  /// Pre-populates the edit dialog. The image input always starts empty.
  pub fn from_task(task: &Task) -> Self {
    Self {
      title:       task.title.clone(),
      description: task.description.clone(),
      due_date:    task.due_date,
      priority:    Some(task.priority),
      status:      Some(task.status)
    }
  }

  pub fn validate<I: ImageSource>(
    &self,
    kind: FormKind,
    image: Option<&I>,
    owner: u64
  ) -> Result<TaskFields, ValidationError> {
    if kind.requires_text() {
      if self.title.is_empty() {
        return Err(
          ValidationError::MissingTitle
        );
      }
      if self.description.is_empty() {
        return Err(
          ValidationError::MissingDescription
        );
      }
    }

    if let Some(image) = image {
      validate_image(kind, image)?;
    }

    Ok(TaskFields {
      title: self.title.clone(),
      description: self
        .description
        .clone(),
      due_date: self.due_date,
      priority: self
        .priority
        .unwrap_or_default(),
      status: self
        .status
        .unwrap_or_default(),
      owner
    })
  }
}

pub fn validate_image<I: ImageSource>(
  kind: FormKind,
  image: &I
) -> Result<(), ValidationError> {
  if image.size_bytes()
    > kind.max_image_bytes()
  {
    tracing::warn!(
      name = %image.name(),
      size = image.size_bytes(),
      limit = kind.max_image_bytes(),
      "rejecting oversized image"
    );
    return Err(
      ValidationError::ImageTooLarge {
        limit_mb: kind.max_image_bytes()
          / MIB
      }
    );
  }

  let mime = image.mime_type();
  if !ACCEPTED_IMAGE_MIME_TYPES
    .contains(&mime.as_str())
  {
    tracing::warn!(
      name = %image.name(),
      mime = %mime,
      "rejecting unsupported image type"
    );
    return Err(
      ValidationError::UnsupportedImageType(
        mime
      )
    );
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use chrono::{
    NaiveDate,
    Utc
  };

  use super::{
    FormKind,
    TaskForm,
    ValidationError,
    image_accept_attr
  };
  use crate::memory::MemoryImage;
  use crate::task::{
    Task,
    TaskId,
    TaskPriority,
    TaskStatus
  };

  const MB: u64 = 1024 * 1024;

  #[test]
  fn create_accepts_blank_text_and_fills_defaults()
   {
    let fields = TaskForm::default()
      .validate::<MemoryImage>(
        FormKind::Create,
        None,
        1
      )
      .unwrap();
    assert_eq!(fields.title, "");
    assert_eq!(
      fields.priority,
      TaskPriority::Normal
    );
    assert_eq!(fields.status, TaskStatus::Todo);
    assert_eq!(fields.owner, 1);
  }

  #[test]
  fn edit_requires_title_then_description() {
    let mut form = TaskForm::default();
    assert_eq!(
      form.validate::<MemoryImage>(
        FormKind::Edit,
        None,
        1
      ),
      Err(ValidationError::MissingTitle)
    );

    form.title = "A".to_string();
    assert_eq!(
      form.validate::<MemoryImage>(
        FormKind::Edit,
        None,
        1
      ),
      Err(ValidationError::MissingDescription)
    );

    form.description = "B".to_string();
    assert!(
      form
        .validate::<MemoryImage>(FormKind::Edit, None, 1)
        .is_ok()
    );
  }

  #[test]
  fn image_size_limit_depends_on_form() {
    let form = TaskForm::default();
    let nine =
      MemoryImage::new("big.png", "image/png", 9 * MB);

    assert_eq!(
      form.validate(FormKind::Create, Some(&nine), 1),
      Err(ValidationError::ImageTooLarge { limit_mb: 8 })
    );

    let mut edit = form.clone();
    edit.title = "t".to_string();
    edit.description = "d".to_string();
    assert!(
      edit
        .validate(FormKind::Edit, Some(&nine), 1)
        .is_ok()
    );

    let huge = MemoryImage::new(
      "huge.png",
      "image/png",
      17 * MB
    );
    assert_eq!(
      edit.validate(FormKind::Edit, Some(&huge), 1),
      Err(ValidationError::ImageTooLarge { limit_mb: 16 })
    );
  }

  #[test]
  fn exact_limit_is_accepted() {
    let img = MemoryImage::new(
      "edge.webp",
      "image/webp",
      8 * MB
    );
    assert!(
      TaskForm::default()
        .validate(FormKind::Create, Some(&img), 1)
        .is_ok()
    );
  }

  #[test]
  fn gif_is_rejected() {
    let gif =
      MemoryImage::new("anim.gif", "image/gif", 7 * MB);
    let err = TaskForm::default()
      .validate(FormKind::Create, Some(&gif), 1)
      .unwrap_err();
    assert_eq!(
      err,
      ValidationError::UnsupportedImageType(
        "image/gif".to_string()
      )
    );
    assert!(!err.is_field_error());
    assert_eq!(
      err.to_string(),
      "Apenas .jpg, .jpeg, .png e .webp são aceitos."
    );
  }

  #[test]
  fn from_task_prefills_everything_but_image()
   {
    let task = Task {
      id: TaskId(9),
      title: "Revisar".to_string(),
      description: "PR 12".to_string(),
      created_at: Utc::now(),
      due_date: NaiveDate::from_ymd_opt(2025, 5, 1),
      priority: TaskPriority::High,
      status: TaskStatus::Done,
      image: Some("http://img/1.png".to_string()),
      owner: 1
    };

    let form = TaskForm::from_task(&task);
    assert_eq!(form.title, "Revisar");
    assert_eq!(form.due_date, task.due_date);
    assert_eq!(form.priority, Some(TaskPriority::High));
    assert_eq!(form.status, Some(TaskStatus::Done));
  }

  #[test]
  fn accept_attr_lists_mime_types() {
    assert_eq!(
      image_accept_attr(),
      "image/jpeg,image/jpg,image/png,image/webp"
    );
  }
}
