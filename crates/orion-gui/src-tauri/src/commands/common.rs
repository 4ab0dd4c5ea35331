use orion_chrome::TitleBarConfig;
use orion_gui_shared::UiLogArg;
use tauri::State;
use tracing::{
  info,
  instrument
};

use crate::state::AppState;

#[tauri::command]
#[instrument(skip(state))]
pub fn title_bar_config(
  state: State<'_, AppState>
) -> TitleBarConfig {
  state.title_bar().clone()
}

#[tauri::command]
#[instrument(skip_all, fields(event = %args.event))]
pub async fn ui_log(
  args: UiLogArg
) -> Result<(), String> {
  info!(
    event = %args.event,
    detail = %args.detail,
    "ui interaction"
  );
  Ok(())
}
