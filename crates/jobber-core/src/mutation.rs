use serde::{
  Deserialize,
  Serialize
};
use thiserror::Error;

use crate::config::AppConfig;
use crate::form::{
  FormKind,
  TaskForm,
  ValidationError
};
use crate::gateway::{
  GatewayError,
  TaskGateway
};
use crate::task::{
  Task,
  TaskId
};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmitError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  Gateway(#[from] GatewayError)
}

/// How views catch up with the server once a mutation has settled.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(rename_all = "snake_case")]
pub enum SettleStrategy {
  /// Invalidate the task cache; mounted views re-fetch.
  #[default]
  Refresh,
  /// Reload the whole page.
  FullReload
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Mutation {
  Create,
  Update(TaskId),
  Delete(TaskId)
}

impl Mutation {
  pub fn success_message(
    self
  ) -> &'static str {
    match self {
      | Mutation::Create => {
        "Tarefa adicionada com sucesso!"
      }
      | Mutation::Update(_) => {
        "Tarefa alterada com sucesso!"
      }
      | Mutation::Delete(_) => {
        "Tarefa deletada com sucesso!"
      }
    }
  }

  pub fn failure_message(
    self
  ) -> &'static str {
    match self {
      | Mutation::Create => {
        "Houve um erro ao tentar adicionar \
         essa tarefa."
      }
      | Mutation::Update(_) => {
        "Houve um erro ao tentar alterar \
         essa tarefa."
      }
      | Mutation::Delete(_) => {
        "Houve um erro ao tentar deletar \
         essa tarefa."
      }
    }
  }

  pub fn settle_delay_ms(
    self,
    config: &AppConfig
  ) -> u32 {
    match self {
      | Mutation::Create => {
        config.create_settle_ms
      }
      | Mutation::Update(_) => {
        config.update_settle_ms
      }
      | Mutation::Delete(_) => {
        config.delete_settle_ms
      }
    }
  }

  /// Whether a failure toast is shown; create and update only log.
  pub fn notifies_failure(self) -> bool {
    matches!(self, Mutation::Delete(_))
  }
}

fn log_failure(
  mutation: Mutation,
  error: &GatewayError
) {
  if error.is_network() {
    tracing::error!(
      ?mutation,
      %error,
      "network error while submitting task"
    );
  } else {
    tracing::error!(
      ?mutation,
      %error,
      "task submission failed"
    );
  }
}

pub async fn submit_create<G>(
  gateway: &G,
  form: &TaskForm,
  image: Option<&G::Upload>,
  owner: u64
) -> Result<Task, SubmitError>
where
  G: TaskGateway + ?Sized
{
  let fields = form.validate(
    FormKind::Create,
    image,
    owner
  )?;
  match gateway
    .create_task(&fields, image)
    .await
  {
    | Ok(task) => {
      tracing::info!(
        task_id = %task.id,
        "task created"
      );
      Ok(task)
    }
    | Err(error) => {
      log_failure(Mutation::Create, &error);
      Err(error.into())
    }
  }
}

pub async fn submit_update<G>(
  gateway: &G,
  id: TaskId,
  form: &TaskForm,
  image: Option<&G::Upload>,
  owner: u64
) -> Result<Task, SubmitError>
where
  G: TaskGateway + ?Sized
{
  let fields = form.validate(
    FormKind::Edit,
    image,
    owner
  )?;
  match gateway
    .update_task(id, &fields, image)
    .await
  {
    | Ok(task) => {
      tracing::info!(
        task_id = %task.id,
        "task updated"
      );
      Ok(task)
    }
    | Err(error) => {
      log_failure(
        Mutation::Update(id),
        &error
      );
      Err(error.into())
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum DeletePhase {
  Closed,
  Confirming,
  Deleting
}

/// Two-step guard in front of `delete_task`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct DeleteConfirmation {
  task_id: TaskId,
  phase:   DeletePhase
}

impl DeleteConfirmation {
  pub fn new(task_id: TaskId) -> Self {
    Self {
      task_id,
      phase: DeletePhase::Closed
    }
  }

  pub fn task_id(&self) -> TaskId {
    self.task_id
  }

  pub fn phase(&self) -> DeletePhase {
    self.phase
  }

  pub fn is_open(&self) -> bool {
    self.phase != DeletePhase::Closed
  }

  pub fn request(&mut self) {
    if self.phase == DeletePhase::Closed {
      self.phase = DeletePhase::Confirming;
    }
  }

  pub fn cancel(&mut self) {
    if self.phase == DeletePhase::Confirming
    {
      tracing::debug!(
        task_id = %self.task_id,
        "deletion cancelled"
      );
      self.phase = DeletePhase::Closed;
    }
  }

  /// Returns the id to delete when the dialog was awaiting confirmation.
  pub fn confirm(
    &mut self
  ) -> Option<TaskId> {
    if self.phase != DeletePhase::Confirming
    {
      return None;
    }
    self.phase = DeletePhase::Deleting;
    Some(self.task_id)
  }

  /// The dialog closes whether or not the delete succeeded.
  pub fn finish(&mut self) {
    self.phase = DeletePhase::Closed;
  }

  pub async fn confirm_and_delete<G>(
    &mut self,
    gateway: &G
  ) -> Option<Result<(), GatewayError>>
  where
    G: TaskGateway + ?Sized
  {
    let id = self.confirm()?;
    let result =
      gateway.delete_task(id).await;
    match &result {
      | Ok(()) => {
        tracing::info!(task_id = %id, "task deleted")
      }
      | Err(error) => {
        log_failure(
          Mutation::Delete(id),
          error
        )
      }
    }
    self.finish();
    Some(result)
  }
}

#[cfg(test)]
mod tests {
  use super::{
    DeleteConfirmation,
    DeletePhase,
    Mutation
  };
  use crate::config::AppConfig;
  use crate::task::TaskId;

  #[test]
  fn dialog_phases() {
    let mut dialog =
      DeleteConfirmation::new(TaskId(5));
    assert!(!dialog.is_open());
    assert_eq!(dialog.confirm(), None);

    dialog.request();
    assert_eq!(
      dialog.phase(),
      DeletePhase::Confirming
    );
    dialog.cancel();
    assert_eq!(dialog.phase(), DeletePhase::Closed);

    dialog.request();
    assert_eq!(dialog.confirm(), Some(TaskId(5)));
    assert_eq!(dialog.phase(), DeletePhase::Deleting);
    dialog.cancel();
    assert_eq!(dialog.phase(), DeletePhase::Deleting);
    assert_eq!(dialog.confirm(), None);
    dialog.finish();
    assert!(!dialog.is_open());
  }

  #[test]
  fn settle_delays_follow_config() {
    let config = AppConfig::default();
    assert_eq!(
      Mutation::Create.settle_delay_ms(&config),
      1500
    );
    assert_eq!(
      Mutation::Update(TaskId(1)).settle_delay_ms(&config),
      1500
    );
    assert_eq!(
      Mutation::Delete(TaskId(1)).settle_delay_ms(&config),
      1000
    );
  }

  #[test]
  fn only_delete_failures_are_toasted() {
    assert!(!Mutation::Create.notifies_failure());
    assert!(
      !Mutation::Update(TaskId(1)).notifies_failure()
    );
    assert!(Mutation::Delete(TaskId(1)).notifies_failure());
  }
}
