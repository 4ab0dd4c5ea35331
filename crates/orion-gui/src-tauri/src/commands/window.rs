use tracing::{
  debug,
  error,
  instrument
};

fn report<T>(
  action: &str,
  result: tauri::Result<T>
) -> Result<T, String> {
  result.map_err(|err| {
    error!(
      action,
      error = %err,
      "window command failed"
    );
    err.to_string()
  })
}

#[tauri::command]
#[instrument(skip(window), fields(label = %window.label()))]
pub async fn window_minimize(
  window: tauri::Window
) -> Result<(), String> {
  report("minimize", window.minimize())
}

/// Unmaximizes a maximized window and
/// maximizes anything else. The caller
/// re-queries the state afterwards.
#[tauri::command]
#[instrument(skip(window), fields(label = %window.label()))]
pub async fn window_toggle_maximize(
  window: tauri::Window
) -> Result<(), String> {
  let is_maximized = report(
    "is_maximized",
    window.is_maximized()
  )?;
  debug!(
    is_maximized,
    "toggling maximize"
  );
  if is_maximized {
    report(
      "unmaximize",
      window.unmaximize()
    )
  } else {
    report("maximize", window.maximize())
  }
}

#[tauri::command]
#[instrument(skip(window), fields(label = %window.label()))]
pub async fn window_close(
  window: tauri::Window
) -> Result<(), String> {
  report("close", window.close())
}

#[tauri::command]
#[instrument(skip(window), fields(label = %window.label()))]
pub async fn window_is_maximized(
  window: tauri::Window
) -> Result<bool, String> {
  report(
    "is_maximized",
    window.is_maximized()
  )
}
