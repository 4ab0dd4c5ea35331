//! Capability seam between the chrome
//! controller and the OS window.
//!
//! The controller never reaches for a
//! global shell API. A [`WindowProvider`]
//! is handed to it at construction and
//! yields a [`WindowHandle`] once the host
//! window is available. Every call is
//! asynchronous and may be rejected.

use std::fmt;

use crate::error::ChromeError;

/// Invoked by the provider whenever the
/// OS reports a resize of the window.
pub type ResizeCallback = Box<dyn Fn()>;

/// Live registration of a
/// [`ResizeCallback`].
///
/// Cancelling (or dropping) runs the
/// provider's unlisten function exactly
/// once.
pub struct ResizeSubscription {
  unlisten: Option<Box<dyn FnOnce()>>
}

impl ResizeSubscription {
  pub fn new(
    unlisten: impl FnOnce() + 'static
  ) -> Self {
    Self {
      unlisten: Some(Box::new(unlisten))
    }
  }

  pub fn cancel(mut self) {
    self.run_unlisten();
  }

  fn run_unlisten(&mut self) {
    if let Some(unlisten) =
      self.unlisten.take()
    {
      unlisten();
    }
  }
}

impl Drop for ResizeSubscription {
  fn drop(&mut self) {
    self.run_unlisten();
  }
}

impl fmt::Debug for ResizeSubscription {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.debug_struct("ResizeSubscription")
      .field(
        "active",
        &self.unlisten.is_some()
      )
      .finish()
  }
}

#[allow(async_fn_in_trait)]
pub trait WindowHandle: 'static {
  async fn is_maximized(
    &self
  ) -> Result<bool, ChromeError>;

  async fn minimize(
    &self
  ) -> Result<(), ChromeError>;

  async fn toggle_maximize(
    &self
  ) -> Result<(), ChromeError>;

  async fn close(
    &self
  ) -> Result<(), ChromeError>;

  async fn on_resized(
    &self,
    callback: ResizeCallback
  ) -> Result<ResizeSubscription, ChromeError>;
}

#[allow(async_fn_in_trait)]
pub trait WindowProvider {
  type Handle: WindowHandle;

  /// Resolves the window hosting the
  /// current view.
  async fn current(
    &self
  ) -> Result<Self::Handle, ChromeError>;
}
