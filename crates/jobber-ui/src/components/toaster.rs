use yew::{
  Html,
  Properties,
  function_component,
  html
};

use crate::state::{
  Toast,
  use_notifier
};

#[derive(Properties, PartialEq)]
pub struct ToasterProps {
  pub toasts: Vec<Toast>
}

#[function_component(Toaster)]
pub fn toaster(
  props: &ToasterProps
) -> Html {
  let notifier = use_notifier();

  html! {
    <div class="toaster" role="status" aria-live="polite">
      {
        for props.toasts.iter().map(|toast| {
          let id = toast.id;
          let notifier = notifier.clone();
          html! {
            <div key={id.to_string()} class={toast.kind.class()}>
              <span class="toast-icon">{ toast.kind.icon() }</span>
              <span class="toast-message">{ toast.message.clone() }</span>
              <button
                class="btn ghost icon"
                aria-label="Fechar"
                onclick={move |_| notifier.dismiss(id)}
              >
                { "✕" }
              </button>
            </div>
          }
        })
      }
    </div>
  }
}
