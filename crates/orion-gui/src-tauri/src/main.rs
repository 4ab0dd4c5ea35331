// Hides the console window on Windows
// release builds.
#![cfg_attr(
  not(debug_assertions),
  windows_subsystem = "windows"
)]

mod commands;
mod state;

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use orion_gui_shared::{
  WINDOW_RESIZED_EVENT,
  WindowResizedPayload
};
use tauri::{
  Emitter,
  WindowEvent
};
use tracing::{
  debug,
  error,
  info,
  warn
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{
  EnvFilter,
  fmt
};

const MAIN_WINDOW_LABEL: &str = "main";

fn log_dir() -> Option<PathBuf> {
  dirs::data_local_dir()
    .map(|dir| dir.join("orion").join("logs"))
}

/// Stderr plus a daily rolling file when
/// a log directory is available. The
/// returned guard must outlive the app.
fn init_tracing() -> Option<WorkerGuard> {
  let filter =
    EnvFilter::try_from_default_env()
      .or_else(|_| {
        EnvFilter::try_new(
          "info,orion_gui_tauri=debug,\
           orion_chrome=debug"
        )
      })
      .unwrap_or_else(|_| {
        EnvFilter::new("info")
      });

  let (file_layer, guard) =
    match log_dir().map(|dir| {
      std::fs::create_dir_all(&dir)
        .map(|()| dir)
    }) {
      | Some(Ok(dir)) => {
        let appender =
          tracing_appender::rolling::daily(
            dir,
            "orion.log"
          );
        let (writer, guard) =
          tracing_appender::non_blocking(
            appender
          );
        (
          Some(
            fmt::layer()
              .with_ansi(false)
              .with_target(true)
              .with_writer(writer)
          ),
          Some(guard)
        )
      }
      | _ => (None, None)
    };

  let _ = tracing_subscriber::registry()
    .with(filter)
    .with(
      fmt::layer()
        .with_target(true)
        .with_line_number(true)
    )
    .with(file_layer)
    .try_init();

  guard
}

/// `GDK_BACKEND=wayland` only applies to
/// Wayland sessions; forcing it under X11
/// leaves GTK without a display.
#[cfg_attr(
  not(target_os = "linux"),
  allow(dead_code)
)]
fn linux_gui_defaults(
  wayland_session: bool
) -> Vec<(&'static str, &'static str)> {
  let mut defaults = Vec::new();
  if wayland_session {
    defaults.push(("GDK_BACKEND", "wayland"));
  }
  // dmabuf rendering is unstable on
  // several compositor/driver combos.
  defaults.push((
    "WEBKIT_DISABLE_DMABUF_RENDERER",
    "1"
  ));
  defaults
}

#[cfg(target_os = "linux")]
fn configure_wayland_defaults() {
  let wayland_session =
    env::var_os("WAYLAND_DISPLAY")
      .is_some_and(|value| !value.is_empty());
  debug!(
    wayland_session,
    "detected linux display session"
  );

  for (key, value) in
    linux_gui_defaults(wayland_session)
  {
    if env::var_os(key).is_none() {
      unsafe {
        env::set_var(key, value);
      }
      info!(
        key,
        value,
        "set linux GUI runtime default"
      );
    } else {
      debug!(
        key,
        "preserving existing linux \
         GUI runtime value"
      );
    }
  }
}

#[cfg(not(target_os = "linux"))]
fn configure_wayland_defaults() {}

fn main() {
  let _log_guard = init_tracing();
  configure_wayland_defaults();

  info!("starting Orion Observatory");

  let state =
    match state::AppState::new().context(
      "failed to initialize app state"
    ) {
      | Ok(state) => state,
      | Err(err) => {
        error!(error = %err, "initialization failed");
        std::process::exit(1);
      }
    };

  tauri::Builder::default()
    .setup(|app| {
      install_signal_handlers(
        app.handle().clone()
      );
      Ok(())
    })
    .on_window_event(|window, event| {
      forward_resize(window, event)
    })
    .manage(state)
    .invoke_handler(
      tauri::generate_handler![
        commands::window::window_minimize,
        commands::window::window_toggle_maximize,
        commands::window::window_close,
        commands::window::window_is_maximized,
        commands::common::title_bar_config,
        commands::common::ui_log,
      ]
    )
    .run(tauri::generate_context!())
    .expect(
      "error while running Orion \
       Observatory"
    );
}

/// Relays OS resizes of the main window
/// so the title bar can re-query its
/// maximize state.
fn forward_resize<R: tauri::Runtime>(
  window: &tauri::Window<R>,
  event: &WindowEvent
) {
  let WindowEvent::Resized(size) = event
  else {
    return;
  };
  if window.label() != MAIN_WINDOW_LABEL {
    return;
  }

  let payload = WindowResizedPayload {
    width:  size.width,
    height: size.height
  };
  if let Err(err) =
    window.emit(WINDOW_RESIZED_EVENT, payload)
  {
    warn!(
      error = %err,
      "failed to forward window resize"
    );
  }
}

fn install_signal_handlers(
  app_handle: tauri::AppHandle
) {
  tauri::async_runtime::spawn(
    async move {
      wait_for_shutdown_signal().await;
      warn!(
        "received shutdown signal; \
         exiting application"
      );
      app_handle.exit(0);
    }
  );
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
  use tokio::signal::unix::{
    SignalKind,
    signal
  };

  let mut sigterm = match signal(
    SignalKind::terminate()
  ) {
    | Ok(stream) => stream,
    | Err(error) => {
      error!(
        %error,
        "failed to register SIGTERM \
         handler; falling back to \
         ctrl_c"
      );
      let _ =
        tokio::signal::ctrl_c().await;
      return;
    }
  };

  tokio::select! {
    _ = tokio::signal::ctrl_c() => {}
    _ = sigterm.recv() => {}
  }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
  if let Err(error) =
    tokio::signal::ctrl_c().await
  {
    error!(
      %error,
      "failed waiting for ctrl_c \
       signal"
    );
  }
}
