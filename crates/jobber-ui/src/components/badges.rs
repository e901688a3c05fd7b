use jobber_core::{
  TaskPriority,
  TaskStatus
};
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct PriorityBadgeProps {
  pub priority: TaskPriority
}

#[function_component(PriorityBadge)]
pub fn priority_badge(
  props: &PriorityBadgeProps
) -> Html {
  html! {
    <span class={classes!("badge", props.priority.badge_variant())}>
      { props.priority.label() }
    </span>
  }
}

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
  pub status: TaskStatus
}

#[function_component(StatusBadge)]
pub fn status_badge(
  props: &StatusBadgeProps
) -> Html {
  html! {
    <span class={classes!("badge", props.status.badge_variant())}>
      { props.status.label() }
    </span>
  }
}
