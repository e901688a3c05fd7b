use chrono::NaiveDate;
use jobber_core::DueBadge;
use jobber_core::due::today_in;
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html
};

use crate::state::use_task_store;

#[derive(Properties, PartialEq)]
pub struct DueBadgeViewProps {
  pub due_date: Option<NaiveDate>
}

/// Renders nothing when the task has no due date.
#[function_component(DueBadgeView)]
pub fn due_badge_view(
  props: &DueBadgeViewProps
) -> Html {
  let store = use_task_store();
  let today = today_in(store.config.tz());

  match DueBadge::compute(
    props.due_date,
    today
  ) {
    | Some(badge) => html! {
      <span class={classes!("badge", "due", badge.variant())}>
        { badge.text() }
      </span>
    },
    | None => html! {}
  }
}
