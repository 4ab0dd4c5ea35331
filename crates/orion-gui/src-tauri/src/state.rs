use std::path::{
  Path,
  PathBuf
};

use anyhow::Context;
use orion_chrome::{
  ChromeConfig,
  TitleBarConfig
};
use tracing::{
  debug,
  info,
  instrument
};

pub const CONFIG_FILE_NAME: &str =
  "orion.toml";
pub const CONFIG_ENV_VAR: &str =
  "ORION_CONFIG";

pub struct AppState {
  config: ChromeConfig
}

impl AppState {
  pub fn new() -> anyhow::Result<Self> {
    let explicit =
      std::env::var(CONFIG_ENV_VAR).ok();
    let cwd = std::env::current_dir()
      .context(
        "failed to resolve working \
         directory"
      )?;
    let candidates =
      candidate_config_paths(
        explicit.as_deref(),
        &cwd,
        dirs::config_dir().as_deref()
      );
    let config =
      load_config(&candidates)?;
    Ok(Self { config })
  }

  pub fn title_bar(
    &self
  ) -> &TitleBarConfig {
    &self.config.title_bar
  }
}

/// `$ORION_CONFIG` first, then
/// `orion.toml` in `cwd` and each
/// ancestor, then the per-user config
/// directory.
pub fn candidate_config_paths(
  explicit: Option<&str>,
  cwd: &Path,
  user_config_dir: Option<&Path>
) -> Vec<PathBuf> {
  let mut candidates =
    Vec::<PathBuf>::new();

  if let Some(path) = explicit {
    let trimmed = path.trim();
    if !trimmed.is_empty() {
      candidates
        .push(PathBuf::from(trimmed));
    }
  }

  let mut cursor = Some(cwd);
  while let Some(path) = cursor {
    candidates
      .push(path.join(CONFIG_FILE_NAME));
    cursor = path.parent();
  }

  if let Some(dir) = user_config_dir {
    candidates.push(
      dir
        .join("orion")
        .join(CONFIG_FILE_NAME)
    );
  }

  let mut unique =
    Vec::<PathBuf>::new();
  for candidate in candidates {
    if !unique.contains(&candidate) {
      unique.push(candidate);
    }
  }
  unique
}

#[instrument(skip_all)]
pub fn load_config(
  candidates: &[PathBuf]
) -> anyhow::Result<ChromeConfig> {
  let Some(found) = candidates
    .iter()
    .find(|path| path.is_file())
  else {
    info!(
      searched = candidates.len(),
      "no orion.toml found; using \
       default chrome config"
    );
    return Ok(ChromeConfig::default());
  };

  debug!(
    path = %found.display(),
    "reading chrome config"
  );
  let raw = std::fs::read_to_string(
    found
  )
  .with_context(|| {
    format!(
      "failed to read {}",
      found.display()
    )
  })?;

  let config =
    ChromeConfig::from_toml_str(&raw)
      .with_context(|| {
        format!(
          "invalid config in {}",
          found.display()
        )
      })?;
  info!(
    path = %found.display(),
    title = %config.title_bar.title,
    show_icon = config.title_bar.show_icon,
    "loaded chrome config"
  );
  Ok(config)
}
