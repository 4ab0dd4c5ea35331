//! `WindowProvider` backed by the Tauri
//! IPC bridge of the hosting webview.

use futures::task::{
  LocalFutureObj,
  LocalSpawn,
  SpawnError
};
use orion_chrome::{
  ChromeError,
  ResizeCallback,
  ResizeSubscription,
  WindowAction,
  WindowHandle,
  WindowProvider
};
use orion_gui_shared::{
  CMD_WINDOW_CLOSE,
  CMD_WINDOW_IS_MAXIMIZED,
  CMD_WINDOW_MINIMIZE,
  CMD_WINDOW_TOGGLE_MAXIMIZE,
  WINDOW_RESIZED_EVENT
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::api::invoke_tauri;

#[wasm_bindgen]
extern "C" {
  // Exposed by `app.withGlobalTauri`.
  #[wasm_bindgen(
    catch,
    js_namespace = ["window", "__TAURI__", "event"],
    js_name = listen
  )]
  async fn tauri_listen(
    event: &str,
    handler: &Closure<dyn FnMut(JsValue)>
  ) -> Result<JsValue, JsValue>;
}

fn tauri_bridge_available() -> bool {
  web_sys::window()
    .and_then(|window| {
      js_sys::Reflect::get(
        &window,
        &JsValue::from_str("__TAURI__")
      )
      .ok()
    })
    .is_some_and(|bridge| {
      !bridge.is_undefined()
        && !bridge.is_null()
    })
}

/// Runs controller work on the browser
/// microtask queue.
#[derive(Clone, Copy, Debug, Default)]
pub struct WasmSpawner;

impl LocalSpawn for WasmSpawner {
  fn spawn_local_obj(
    &self,
    future: LocalFutureObj<'static, ()>
  ) -> Result<(), SpawnError> {
    wasm_bindgen_futures::spawn_local(
      future
    );
    Ok(())
  }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TauriWindowProvider;

impl WindowProvider for TauriWindowProvider {
  type Handle = TauriWindow;

  async fn current(
    &self
  ) -> Result<TauriWindow, ChromeError> {
    if !tauri_bridge_available() {
      return Err(
        ChromeError::acquisition(
          "Tauri IPC bridge is not \
           available in this webview"
        )
      );
    }
    Ok(TauriWindow)
  }
}

#[derive(Debug)]
pub struct TauriWindow;

async fn call<R>(
  action: WindowAction,
  cmd: &str
) -> Result<R, ChromeError>
where
  R: serde::de::DeserializeOwned
{
  invoke_tauri::<R, _>(cmd, &())
    .await
    .map_err(|reason| {
      ChromeError::action(action, reason)
    })
}

impl WindowHandle for TauriWindow {
  async fn is_maximized(
    &self
  ) -> Result<bool, ChromeError> {
    call(
      WindowAction::QueryMaximized,
      CMD_WINDOW_IS_MAXIMIZED
    )
    .await
  }

  async fn minimize(
    &self
  ) -> Result<(), ChromeError> {
    call(
      WindowAction::Minimize,
      CMD_WINDOW_MINIMIZE
    )
    .await
  }

  async fn toggle_maximize(
    &self
  ) -> Result<(), ChromeError> {
    call(
      WindowAction::ToggleMaximize,
      CMD_WINDOW_TOGGLE_MAXIMIZE
    )
    .await
  }

  async fn close(
    &self
  ) -> Result<(), ChromeError> {
    call(
      WindowAction::Close,
      CMD_WINDOW_CLOSE
    )
    .await
  }

  async fn on_resized(
    &self,
    callback: ResizeCallback
  ) -> Result<ResizeSubscription, ChromeError>
  {
    let handler =
      Closure::<dyn FnMut(JsValue)>::new(
        move |_event: JsValue| callback()
      );

    let unlisten =
      tauri_listen(
        WINDOW_RESIZED_EVENT,
        &handler
      )
      .await
      .map_err(|err| {
        ChromeError::action(
          WindowAction::SubscribeResize,
          format!("{err:?}")
        )
      })?
      .dyn_into::<js_sys::Function>()
      .map_err(|value| {
        ChromeError::action(
          WindowAction::SubscribeResize,
          format!(
            "listen returned a \
             non-function: {value:?}"
          )
        )
      })?;

    Ok(ResizeSubscription::new(move || {
      if let Err(err) =
        unlisten.call0(&JsValue::NULL)
      {
        tracing::warn!(
          error = ?err,
          "failed to unlisten window \
           resize"
        );
      }
      // The JS side may not fire again
      // once unlisten has run.
      drop(handler);
    }))
  }
}
