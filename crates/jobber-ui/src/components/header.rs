use yew::{
  Html,
  function_component,
  html
};

use crate::state::use_task_store;

#[function_component(Header)]
pub fn header() -> Html {
  let store = use_task_store();
  let config = &store.config;

  html! {
    <header class="topbar">
      <div class="brand">{ "Jobber" }</div>
      <div class="user-ident">
        <span class="greeting">{ format!("Olá, {}", config.user_name) }</span>
        <span class="avatar" title={config.user_name.clone()}>
          { config.user_initials() }
        </span>
      </div>
    </header>
  }
}
