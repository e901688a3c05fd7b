use crate::task::TaskId;

/// Which task, if any, is shown in the detail modal.
///
/// Writers are not coordinated: the last `open`/`close` wins. `revision`
/// increases on every write so consumers can tell two opens of the same
/// id apart.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct ModalSelection {
  pub open:             bool,
  pub selected_task_id: Option<TaskId>,
  pub revision:         u64
}

impl ModalSelection {
  pub fn open(
    &mut self,
    id: TaskId
  ) {
    tracing::debug!(
      task_id = %id,
      "modal selection opened"
    );
    self.open = true;
    self.selected_task_id = Some(id);
    self.revision += 1;
  }

  pub fn close(&mut self) {
    tracing::debug!(
      previous = ?self.selected_task_id,
      "modal selection closed"
    );
    self.open = false;
    self.selected_task_id = None;
    self.revision += 1;
  }

  /// The task that should be fetched and shown, if the modal is open.
  pub fn active(&self) -> Option<TaskId> {
    if self.open {
      self.selected_task_id
    } else {
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::ModalSelection;
  use crate::task::TaskId;

  #[test]
  fn starts_closed() {
    let selection = ModalSelection::default();
    assert!(!selection.open);
    assert_eq!(selection.selected_task_id, None);
    assert_eq!(selection.active(), None);
  }

  #[test]
  fn open_then_close_always_resets() {
    let mut selection =
      ModalSelection::default();
    selection.open(TaskId(4));
    assert_eq!(
      selection.active(),
      Some(TaskId(4))
    );

    selection.close();
    assert!(!selection.open);
    assert_eq!(selection.selected_task_id, None);
  }

  #[test]
  fn last_write_wins() {
    let mut selection =
      ModalSelection::default();
    selection.open(TaskId(1));
    selection.open(TaskId(2));
    assert_eq!(
      selection.active(),
      Some(TaskId(2))
    );
    assert_eq!(selection.revision, 2);

    selection.close();
    selection.close();
    assert_eq!(selection.active(), None);
    assert_eq!(selection.revision, 4);
  }
}
