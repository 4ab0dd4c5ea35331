pub mod config;
pub mod controller;
pub mod error;
pub mod login;
pub mod view;
pub mod window;

pub use config::{
  ChromeConfig,
  TitleBarConfig
};
pub use controller::{
  ChromeController,
  ChromePhase,
  ChromeSnapshot,
  ListenerId,
  WindowControl
};
pub use error::{
  ChromeError,
  WindowAction
};
pub use view::{
  ControlView,
  MaximizeIcon,
  TitleBarView,
  title_bar_view
};
pub use window::{
  ResizeCallback,
  ResizeSubscription,
  WindowHandle,
  WindowProvider
};
