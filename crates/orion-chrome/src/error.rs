use std::fmt;

use thiserror::Error;

/// OS-facing call issued against a window
/// handle.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum WindowAction {
  Minimize,
  ToggleMaximize,
  Close,
  QueryMaximized,
  SubscribeResize
}

impl fmt::Display for WindowAction {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    let name = match self {
      | Self::Minimize => "minimize",
      | Self::ToggleMaximize => {
        "toggle_maximize"
      }
      | Self::Close => "close",
      | Self::QueryMaximized => {
        "is_maximized"
      }
      | Self::SubscribeResize => {
        "on_resized"
      }
    };
    f.write_str(name)
  }
}

#[derive(Debug, Clone, Error)]
pub enum ChromeError {
  /// The current window could not be
  /// obtained from the provider.
  #[error(
    "failed to acquire window handle: \
     {reason}"
  )]
  Acquisition { reason: String },

  /// A minimize/toggle/close/query call
  /// was rejected.
  #[error(
    "window {action} failed: {reason}"
  )]
  Action {
    action: WindowAction,
    reason: String
  }
}

impl ChromeError {
  pub fn acquisition(
    reason: impl Into<String>
  ) -> Self {
    Self::Acquisition {
      reason: reason.into()
    }
  }

  pub fn action(
    action: WindowAction,
    reason: impl Into<String>
  ) -> Self {
    Self::Action {
      action,
      reason: reason.into()
    }
  }
}
