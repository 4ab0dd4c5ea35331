use std::rc::Rc;

use orion_chrome::{
  ChromeController,
  ChromeSnapshot,
  TitleBarConfig,
  TitleBarView,
  WindowControl,
  title_bar_view
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_state
};

use super::{
  WindowBrand,
  WindowControls
};
use crate::api::ui_log;
use crate::tauri_window::{
  TauriWindowProvider,
  WasmSpawner
};

type Controller =
  ChromeController<TauriWindowProvider>;

#[derive(Properties, PartialEq)]
pub struct WindowChromeProps {
  pub config: TitleBarConfig
}

#[function_component(WindowChrome)]
pub fn window_chrome(
  props: &WindowChromeProps
) -> Html {
  let controller: Rc<Controller> =
    use_memo((), |_| {
      ChromeController::new(
        TauriWindowProvider,
        WasmSpawner
      )
    });
  let snapshot = use_state({
    let controller = controller.clone();
    move || controller.snapshot()
  });

  {
    let controller = controller.clone();
    let snapshot = snapshot.clone();
    use_effect_with((), move |_| {
      let listener = controller.subscribe(
        move |next: &ChromeSnapshot| {
          snapshot.set(*next)
        }
      );

      {
        let controller = controller.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            controller.mount().await;
            ui_log(
              "chrome.mounted",
              &format!(
                "{:?}",
                controller.phase()
              )
            );
          }
        );
      }

      move || {
        controller.unsubscribe(listener);
        controller.unmount();
      }
    });
  }

  let on_action = {
    let controller = controller.clone();
    Callback::from(
      move |control: WindowControl| {
        let controller = controller.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            match control {
              | WindowControl::Minimize => {
                controller.minimize().await
              }
              | WindowControl::Maximize => {
                controller
                  .toggle_maximize()
                  .await
              }
              | WindowControl::Close => {
                controller.close().await
              }
            }
          }
        );
      }
    )
  };

  let on_hover = {
    let controller = controller.clone();
    Callback::from(
      move |control: Option<WindowControl>| {
        controller.set_hover(control)
      }
    )
  };

  match title_bar_view(
    &props.config,
    &snapshot
  ) {
    | TitleBarView::Placeholder => html! {
        <div class="window-chrome placeholder" data-tauri-drag-region="true">
            <div class="chrome-pulse" aria-hidden="true"></div>
        </div>
    },
    | TitleBarView::Bar {
      title,
      show_icon,
      maximize_icon,
      controls
    } => html! {
        <div class="window-chrome" data-tauri-drag-region="true">
            <WindowBrand title={title} show_icon={show_icon} />
            <WindowControls
                controls={controls.to_vec()}
                maximize_icon={maximize_icon}
                on_action={on_action}
                on_hover={on_hover}
            />
        </div>
    }
  }
}
