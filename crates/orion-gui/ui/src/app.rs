use orion_chrome::TitleBarConfig;
use orion_gui_shared::CMD_TITLE_BAR_CONFIG;
use yew::{
  Html,
  function_component,
  html,
  use_effect_with,
  use_state
};
use yew_router::prelude::*;

use crate::api::{
  invoke_tauri,
  ui_log
};
use crate::components::WindowChrome;
use crate::pages::LoginPage;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
  #[at("/")]
  Login,
  #[not_found]
  #[at("/404")]
  NotFound
}

fn switch(route: Route) -> Html {
  match route {
    | Route::Login => {
      html! { <LoginPage /> }
    }
    | Route::NotFound => {
      html! { <Redirect<Route> to={Route::Login} /> }
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let title_bar =
    use_state(TitleBarConfig::default);

  {
    let title_bar = title_bar.clone();
    use_effect_with((), move |_| {
      ui_log(
        "app.mounted",
        "loading title bar config"
      );
      wasm_bindgen_futures::spawn_local(
        async move {
          match invoke_tauri::<
            TitleBarConfig,
            _
          >(
            CMD_TITLE_BAR_CONFIG, &()
          )
          .await
          {
            | Ok(config) => {
              tracing::debug!(
                title = %config.title,
                show_icon = config.show_icon,
                "title bar config loaded"
              );
              title_bar
                .set(config.normalized());
            }
            | Err(err) => {
              tracing::warn!(
                error = %err,
                "using default title bar \
                 config"
              );
            }
          }
        }
      );
      || ()
    });
  }

  html! {
      <BrowserRouter>
          <div class="app-shell">
              <WindowChrome config={(*title_bar).clone()} />
              <main class="app-body">
                  <Switch<Route> render={switch} />
              </main>
          </div>
      </BrowserRouter>
  }
}
