use anyhow::Context;
use serde::{
  Deserialize,
  Serialize
};
use tracing::debug;

pub const DEFAULT_TITLE: &str =
  "Orion Observatory";

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct TitleBarConfig {
  pub title:     String,
  pub show_icon: bool
}

impl Default for TitleBarConfig {
  fn default() -> Self {
    Self {
      title:     DEFAULT_TITLE
        .to_string(),
      show_icon: true
    }
  }
}

impl TitleBarConfig {
  /// Blank titles fall back to the
  /// default.
  pub fn normalized(mut self) -> Self {
    let trimmed = self.title.trim();
    if trimmed.is_empty() {
      self.title =
        DEFAULT_TITLE.to_string();
    } else if trimmed.len()
      != self.title.len()
    {
      self.title = trimmed.to_string();
    }
    self
  }
}

/// Contents of `orion.toml`.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct ChromeConfig {
  pub title_bar: TitleBarConfig
}

impl ChromeConfig {
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let parsed =
      toml::from_str::<ChromeConfig>(raw)
        .context(
          "failed to parse chrome \
           config TOML"
        )?;
    debug!(
      title = %parsed.title_bar.title,
      show_icon = parsed.title_bar.show_icon,
      "parsed chrome config"
    );
    Ok(Self {
      title_bar: parsed
        .title_bar
        .normalized()
    })
  }
}
