//! Pure mapping from controller state to
//! what the title bar should draw.

use crate::config::TitleBarConfig;
use crate::controller::{
  ChromeSnapshot,
  WindowControl
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum MaximizeIcon {
  Maximize,
  Restore
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
  pub control:     WindowControl,
  pub label:       &'static str,
  pub highlighted: bool
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleBarView {
  /// Handle not acquired yet: no title,
  /// no controls.
  Placeholder,
  Bar {
    title:         String,
    show_icon:     bool,
    maximize_icon: MaximizeIcon,
    controls:      [ControlView; 3]
  }
}

impl TitleBarView {
  pub fn controls(&self) -> &[ControlView] {
    match self {
      | Self::Placeholder => &[],
      | Self::Bar { controls, .. } => {
        controls.as_slice()
      }
    }
  }
}

pub fn control_label(
  control: WindowControl,
  is_maximized: bool
) -> &'static str {
  match control {
    | WindowControl::Minimize => {
      "Minimize window"
    }
    | WindowControl::Maximize
      if is_maximized =>
    {
      "Restore window"
    }
    | WindowControl::Maximize => {
      "Maximize window"
    }
    | WindowControl::Close => {
      "Close window"
    }
  }
}

pub fn title_bar_view(
  config: &TitleBarConfig,
  snapshot: &ChromeSnapshot
) -> TitleBarView {
  if !snapshot.is_ready() {
    return TitleBarView::Placeholder;
  }

  let control = |control| ControlView {
    control,
    label: control_label(
      control,
      snapshot.is_maximized
    ),
    highlighted: snapshot.hovered
      == Some(control)
  };

  TitleBarView::Bar {
    title:         config.title.clone(),
    show_icon:     config.show_icon,
    maximize_icon: if snapshot.is_maximized
    {
      MaximizeIcon::Restore
    } else {
      MaximizeIcon::Maximize
    },
    controls:      [
      control(WindowControl::Minimize),
      control(WindowControl::Maximize),
      control(WindowControl::Close)
    ]
  }
}
