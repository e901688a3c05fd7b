//! View-state derivations shared by the dashboard components.

use crate::cache::{
  LoadState,
  QueryKey,
  TaskCache
};
use crate::filter::TaskFilter;
use crate::selection::ModalSelection;
use crate::task::Task;

/// What the detail modal shows for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
  Closed,
  /// Open, but the selected task has not arrived (or failed to).
  Opening,
  Open(Task)
}

impl DetailState {
  pub fn derive(
    selection: &ModalSelection,
    cache: &TaskCache
  ) -> Self {
    let Some(id) = selection.active() else {
      return DetailState::Closed;
    };
    match cache.task(id) {
      | Some(task) => {
        DetailState::Open(task.clone())
      }
      | None => DetailState::Opening
    }
  }
}

/// Content of the highlight carousel.
#[derive(Debug, Clone, PartialEq)]
pub enum HighlightContent {
  Loading,
  Failed,
  Empty,
  Cards(Vec<Task>)
}

impl HighlightContent {
  /// Every task is a card; there is no "featured" flag to select on.
  pub fn derive(cache: &TaskCache) -> Self {
    match (
      cache.load_state(QueryKey::List),
      cache.list()
    ) {
      | (LoadState::Failed, _) => {
        HighlightContent::Failed
      }
      | (_, Some([])) => {
        HighlightContent::Empty
      }
      | (_, Some(tasks)) => {
        HighlightContent::Cards(
          tasks.to_vec()
        )
      }
      | (_, None) => HighlightContent::Loading
    }
  }
}

/// Body of the task table for the current list state and filter.
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
  Failed,
  Loading,
  NoResults,
  Rows(Vec<Task>)
}

impl TableBody {
  pub fn derive(
    cache: &TaskCache,
    filter: &TaskFilter
  ) -> Self {
    let rows = cache
      .list()
      .map(|tasks| filter.apply(tasks))
      .unwrap_or_default();

    match cache.load_state(QueryKey::List) {
      | LoadState::Failed => TableBody::Failed,
      | LoadState::Loading
      | LoadState::Idle
        if rows.is_empty() =>
      {
        TableBody::Loading
      }
      | _ if rows.is_empty() => {
        TableBody::NoResults
      }
      | _ => TableBody::Rows(rows)
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::{
    DetailState,
    HighlightContent,
    TableBody
  };
  use crate::cache::{
    QueryKey,
    TaskCache
  };
  use crate::filter::TaskFilter;
  use crate::selection::ModalSelection;
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

  fn cache_with(tasks: Vec<Task>) -> TaskCache {
    let mut cache = TaskCache::new();
    let ticket = cache.begin(QueryKey::List);
    cache.resolve_list(ticket, tasks);
    cache
  }

  #[test]
  fn detail_follows_selection_and_cache() {
    let mut selection =
      ModalSelection::default();
    let mut cache = TaskCache::new();
    assert_eq!(
      DetailState::derive(&selection, &cache),
      DetailState::Closed
    );

    selection.open(TaskId(1));
    let ticket =
      cache.begin(QueryKey::Task(TaskId(1)));
    assert_eq!(
      DetailState::derive(&selection, &cache),
      DetailState::Opening
    );

    cache.resolve_task(ticket, task(1, "A"));
    let expected = cache
      .task(TaskId(1))
      .cloned()
      .unwrap();
    assert_eq!(
      DetailState::derive(&selection, &cache),
      DetailState::Open(expected)
    );

    selection.close();
    assert_eq!(
      DetailState::derive(&selection, &cache),
      DetailState::Closed
    );
  }

  #[test]
  fn late_response_for_previous_selection_is_never_shown()
   {
    let mut selection =
      ModalSelection::default();
    let mut cache = TaskCache::new();

    selection.open(TaskId(1));
    let a =
      cache.begin(QueryKey::Task(TaskId(1)));
    selection.open(TaskId(2));
    let b =
      cache.begin(QueryKey::Task(TaskId(2)));

    cache.resolve_task(b, task(2, "B"));
    cache.resolve_task(a, task(1, "A"));

    match DetailState::derive(&selection, &cache)
    {
      | DetailState::Open(shown) => {
        assert_eq!(shown.title, "B")
      }
      | other => {
        panic!("expected B to be open, got {other:?}")
      }
    }
  }

  #[test]
  fn close_wins_over_inflight_fetch() {
    let mut selection =
      ModalSelection::default();
    let mut cache = TaskCache::new();

    selection.open(TaskId(7));
    let ticket =
      cache.begin(QueryKey::Task(TaskId(7)));
    selection.close();
    cache.resolve_task(ticket, task(7, "late"));

    assert_eq!(
      DetailState::derive(&selection, &cache),
      DetailState::Closed
    );
    assert_eq!(
      selection,
      ModalSelection {
        revision: 2,
        ..ModalSelection::default()
      }
    );
  }

  #[test]
  fn highlight_states() {
    let mut cache = TaskCache::new();
    assert_eq!(
      HighlightContent::derive(&cache),
      HighlightContent::Loading
    );

    let ticket = cache.begin(QueryKey::List);
    cache.fail(ticket);
    assert_eq!(
      HighlightContent::derive(&cache),
      HighlightContent::Failed
    );

    let ticket = cache.begin(QueryKey::List);
    cache.resolve_list(ticket, vec![]);
    assert_eq!(
      HighlightContent::derive(&cache),
      HighlightContent::Empty
    );

    let ticket = cache.begin(QueryKey::List);
    cache.resolve_list(
      ticket,
      vec![task(1, "a"), task(2, "b")]
    );
    match HighlightContent::derive(&cache) {
      | HighlightContent::Cards(cards) => {
        assert_eq!(cards.len(), 2)
      }
      | other => {
        panic!("expected cards, got {other:?}")
      }
    }
  }

  #[test]
  fn table_is_loading_before_first_list() {
    let mut cache = TaskCache::new();
    let filter = TaskFilter::default();
    assert_eq!(
      TableBody::derive(&cache, &filter),
      TableBody::Loading
    );

    cache.begin(QueryKey::List);
    assert_eq!(
      TableBody::derive(&cache, &filter),
      TableBody::Loading
    );
  }

  #[test]
  fn table_reports_failed_list() {
    let mut cache = TaskCache::new();
    let ticket = cache.begin(QueryKey::List);
    cache.fail(ticket);
    assert_eq!(
      TableBody::derive(
        &cache,
        &TaskFilter::default()
      ),
      TableBody::Failed
    );
  }

  #[test]
  fn table_distinguishes_no_results_from_rows() {
    let cache = cache_with(vec![
      task(1, "Lavar o carro"),
      task(2, "Pagar contas"),
    ]);

    let miss = TaskFilter {
      search: "viagem".to_string(),
      ..TaskFilter::default()
    };
    assert_eq!(
      TableBody::derive(&cache, &miss),
      TableBody::NoResults
    );

    let hit = TaskFilter {
      search: "CARRO".to_string(),
      ..TaskFilter::default()
    };
    match TableBody::derive(&cache, &hit) {
      | TableBody::Rows(rows) => {
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, TaskId(1));
      }
      | other => {
        panic!("expected rows, got {other:?}")
      }
    }

    assert_eq!(
      TableBody::derive(
        &cache_with(vec![]),
        &TaskFilter::default()
      ),
      TableBody::NoResults
    );
  }
}
