use std::cell::RefCell;
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;

use crate::gateway::{
  GatewayError,
  ImageSource,
  TaskFields,
  TaskGateway
};
use crate::task::{
  Task,
  TaskId
};

/// An image held in memory; stands in for a browser `File`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryImage {
  pub name: String,
  pub mime: String,
  pub size: u64
}

impl MemoryImage {
  pub fn new(
    name: &str,
    mime: &str,
    size: u64
  ) -> Self {
    Self {
      name: name.to_string(),
      mime: mime.to_string(),
      size
    }
  }
}

impl ImageSource for MemoryImage {
  fn name(&self) -> String {
    self.name.clone()
  }

  fn size_bytes(&self) -> u64 {
    self.size
  }

  fn mime_type(&self) -> String {
    self.mime.clone()
  }
}

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq,
)]
pub struct CallCounts {
  pub list:   usize,
  pub get:    usize,
  pub create: usize,
  pub update: usize,
  pub delete: usize
}

impl CallCounts {
  pub fn total(&self) -> usize {
    self.list
      + self.get
      + self.create
      + self.update
      + self.delete
  }
}

#[derive(Debug, Default)]
struct MemoryState {
  tasks:     BTreeMap<TaskId, Task>,
  next_id:   u64,
  calls:     CallCounts,
  fail_next: Option<GatewayError>
}

/// In-process task store speaking the gateway contract.
///
/// Used for offline previews of the UI and throughout the test suite.
#[derive(Debug, Default)]
pub struct MemoryGateway {
  state: RefCell<MemoryState>
}

impl MemoryGateway {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_tasks(
    tasks: Vec<Task>
  ) -> Self {
    let next_id = tasks
      .iter()
      .map(|t| t.id.0)
      .max()
      .unwrap_or(0);
    let tasks = tasks
      .into_iter()
      .map(|t| (t.id, t))
      .collect();
    Self {
      state: RefCell::new(MemoryState {
        tasks,
        next_id,
        ..MemoryState::default()
      })
    }
  }

  pub fn calls(&self) -> CallCounts {
    self.state.borrow().calls
  }

  /// The next gateway call fails with `error` instead of running.
  pub fn fail_next(
    &self,
    error: GatewayError
  ) {
    self.state.borrow_mut().fail_next =
      Some(error);
  }

  pub fn len(&self) -> usize {
    self.state.borrow().tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn take_failure(
    &self
  ) -> Result<(), GatewayError> {
    match self
      .state
      .borrow_mut()
      .fail_next
      .take()
    {
      | Some(error) => Err(error),
      | None => Ok(())
    }
  }

  fn apply_fields(
    task: &mut Task,
    fields: &TaskFields,
    image: Option<&MemoryImage>
  ) {
    task.title = fields.title.clone();
    task.description =
      fields.description.clone();
    task.due_date = fields.due_date;
    task.priority = fields.priority;
    task.status = fields.status;
    task.owner = fields.owner;
    task.image = image.map(|img| {
      format!("memory://images/{}", img.name)
    });
  }
}

#[async_trait(?Send)]
impl TaskGateway for MemoryGateway {
  type Upload = MemoryImage;

  async fn list_tasks(
    &self
  ) -> Result<Vec<Task>, GatewayError> {
    self.state.borrow_mut().calls.list += 1;
    self.take_failure()?;
    Ok(
      self
        .state
        .borrow()
        .tasks
        .values()
        .cloned()
        .collect()
    )
  }

  async fn get_task(
    &self,
    id: TaskId
  ) -> Result<Task, GatewayError> {
    self.state.borrow_mut().calls.get += 1;
    self.take_failure()?;
    self
      .state
      .borrow()
      .tasks
      .get(&id)
      .cloned()
      .ok_or(GatewayError::NotFound(id))
  }

  async fn create_task(
    &self,
    fields: &TaskFields,
    image: Option<&MemoryImage>
  ) -> Result<Task, GatewayError> {
    self.state.borrow_mut().calls.create +=
      1;
    self.take_failure()?;

    let mut state = self.state.borrow_mut();
    state.next_id += 1;
    let mut task = Task {
      id:          TaskId(state.next_id),
      title:       String::new(),
      description: String::new(),
      created_at:  Utc::now(),
      due_date:    None,
      priority:    fields.priority,
      status:      fields.status,
      image:       None,
      owner:       fields.owner
    };
    Self::apply_fields(
      &mut task, fields, image
    );
    state.tasks.insert(task.id, task.clone());
    tracing::debug!(
      task_id = %task.id,
      "memory gateway created task"
    );
    Ok(task)
  }

  async fn update_task(
    &self,
    id: TaskId,
    fields: &TaskFields,
    image: Option<&MemoryImage>
  ) -> Result<Task, GatewayError> {
    self.state.borrow_mut().calls.update +=
      1;
    self.take_failure()?;

    let mut state = self.state.borrow_mut();
    let task = state
      .tasks
      .get_mut(&id)
      .ok_or(GatewayError::NotFound(id))?;
    Self::apply_fields(task, fields, image);
    Ok(task.clone())
  }

  async fn delete_task(
    &self,
    id: TaskId
  ) -> Result<(), GatewayError> {
    self.state.borrow_mut().calls.delete +=
      1;
    self.take_failure()?;

    match self
      .state
      .borrow_mut()
      .tasks
      .remove(&id)
    {
      | Some(_) => Ok(()),
      | None => Err(GatewayError::NotFound(id))
    }
  }
}
