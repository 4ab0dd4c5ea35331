//! In-memory state behind the sign-in
//! form. Nothing here is validated,
//! verified or persisted.

use std::time::Duration;

use tracing::debug;

/// How long the form shows its busy
/// state after a submit.
pub const SIMULATED_SUBMIT_DELAY:
  Duration = Duration::from_millis(2000);

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct SignInForm {
  username:         String,
  password_visible: bool,
  is_loading:       bool
}

impl SignInForm {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn username(&self) -> &str {
    &self.username
  }

  pub fn set_username(
    &mut self,
    value: impl Into<String>
  ) {
    self.username = value.into();
  }

  pub fn is_loading(&self) -> bool {
    self.is_loading
  }

  pub fn password_visible(&self) -> bool {
    self.password_visible
  }

  pub fn toggle_password_visibility(
    &mut self
  ) {
    self.password_visible =
      !self.password_visible;
  }

  /// Returns `false` when a submit is
  /// already in flight.
  pub fn begin_submit(&mut self) -> bool {
    if self.is_loading {
      debug!(
        "sign-in already in progress; \
         ignoring submit"
      );
      return false;
    }
    self.is_loading = true;
    true
  }

  pub fn finish_submit(&mut self) {
    self.is_loading = false;
  }

  pub fn submit_label(&self) -> &'static str {
    if self.is_loading {
      "Signing In..."
    } else {
      "Continue"
    }
  }
}
