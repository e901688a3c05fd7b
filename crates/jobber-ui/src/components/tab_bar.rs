use jobber_core::FormKind;
use yew::{
  Html,
  function_component,
  html
};

use super::TaskFormDialog;

/// Bottom navigation shown on narrow screens.
#[function_component(TabBar)]
pub fn tab_bar() -> Html {
  html! {
    <nav class="tab-bar mobile-only">
      <TaskFormDialog
        kind={FormKind::Create}
        show_icon=true
        variant="fab"
      />
    </nav>
  }
}
