use serde::{
  Deserialize,
  Serialize
};

/// Emitted by the backend on every resize
/// of the main window.
pub const WINDOW_RESIZED_EVENT: &str =
  "window-resized";

pub const CMD_WINDOW_MINIMIZE: &str =
  "window_minimize";
pub const CMD_WINDOW_TOGGLE_MAXIMIZE:
  &str = "window_toggle_maximize";
pub const CMD_WINDOW_CLOSE: &str =
  "window_close";
pub const CMD_WINDOW_IS_MAXIMIZED: &str =
  "window_is_maximized";
pub const CMD_TITLE_BAR_CONFIG: &str =
  "title_bar_config";
pub const CMD_UI_LOG: &str = "ui_log";

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct WindowResizedPayload {
  pub width:  u32,
  pub height: u32
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct UiLogArg {
  pub event:  String,
  #[serde(default)]
  pub detail: String
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct UiLogArgs {
  pub args: UiLogArg
}
