use std::cell::RefCell;
use std::rc::Rc;

use gloo::console::log;
use jobber_core::{
  AppConfig,
  GatewayKind,
  MemoryGateway,
  ScopeSet,
  TaskCache
};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::{
  AppGateway,
  HttpGateway
};
use crate::components::{
  DetailModal,
  Header,
  Highlights,
  TabBar,
  TaskTable,
  Toaster
};
use crate::state::{
  Notifier,
  RefreshTick,
  SelectionContext,
  SelectionStore,
  TaskStore,
  ToastStore
};

const APP_CONFIG_TOML: &str =
  include_str!("../assets/jobber.toml");
const API_BASE_URL_STORAGE_KEY: &str =
  "jobber.api_base_url";

#[derive(
  Clone, Routable, PartialEq, Debug,
)]
pub enum Route {
  #[at("/")]
  Home,
  #[not_found]
  #[at("/404")]
  NotFound
}

fn switch(route: Route) -> Html {
  match route {
    | Route::Home => {
      html! { <Dashboard /> }
    }
    | Route::NotFound => {
      html! { <Redirect<Route> to={Route::Home} /> }
    }
  }
}

fn load_api_base_url_override()
-> Option<String> {
  web_sys::window()
    .and_then(|window| {
      window
        .local_storage()
        .ok()
        .flatten()
    })
    .and_then(|storage| {
      storage
        .get_item(
          API_BASE_URL_STORAGE_KEY
        )
        .ok()
        .flatten()
    })
    .filter(|url| !url.trim().is_empty())
}

fn load_app_config() -> AppConfig {
  let config = AppConfig::load_or_default(
    APP_CONFIG_TOML
  );
  match load_api_base_url_override() {
    | Some(url) => {
      tracing::info!(
        api_base_url = %url,
        "api base url overridden from local storage"
      );
      config.with_api_base_url(&url)
    }
    | None => config
  }
}

fn build_gateway(
  config: &AppConfig
) -> AppGateway {
  match config.gateway {
    | GatewayKind::Http => {
      AppGateway::Http(HttpGateway::new(
        config.endpoints()
      ))
    }
    | GatewayKind::Memory => {
      tracing::warn!(
        "using the in-memory gateway; \
         nothing is persisted"
      );
      AppGateway::Memory(
        MemoryGateway::new()
      )
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let config =
    use_memo((), |_| load_app_config());
  let gateway = {
    let config = config.clone();
    use_memo((), move |_| {
      build_gateway(&config)
    })
  };
  let cache = use_memo((), |_| {
    RefCell::new(TaskCache::new())
  });
  let list_waiters =
    use_memo((), |_| ScopeSet::new());
  let refresh =
    use_reducer(RefreshTick::default);
  let selection: SelectionContext =
    use_reducer(SelectionStore::default);
  let toasts =
    use_reducer(ToastStore::default);

  let store = TaskStore::new(
    gateway,
    config.clone(),
    Rc::clone(&cache),
    (*list_waiters).clone(),
    refresh.dispatcher(),
    refresh.0
  );
  let notifier = Notifier::new(
    toasts.dispatcher(),
    config.toast_duration_ms
  );

  html! {
    <BrowserRouter>
      <ContextProvider<TaskStore> context={store}>
        <ContextProvider<SelectionContext> context={selection}>
          <ContextProvider<Notifier> context={notifier}>
            <Switch<Route> render={switch} />
            <DetailModal />
            <Toaster toasts={toasts.toasts.clone()} />
          </ContextProvider<Notifier>>
        </ContextProvider<SelectionContext>>
      </ContextProvider<TaskStore>>
    </BrowserRouter>
  }
}

#[function_component(Dashboard)]
fn dashboard() -> Html {
  html! {
    <div class="app-shell">
      <Header />
      <main class="dashboard">
        <section class="highlights-section">
          <h2 class="section-title">{ "Jobs em destaque" }</h2>
          <Highlights />
        </section>
        <section class="table-section">
          <h2 class="section-title">{ "Todos os Jobs" }</h2>
          <TaskTable />
        </section>
      </main>
      <TabBar />
    </div>
  }
}

pub(crate) fn ui_debug(
  verbose: bool,
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  if verbose {
    log!(format!(
      "[ui-debug] {event}: {detail}"
    ));
  }
}
