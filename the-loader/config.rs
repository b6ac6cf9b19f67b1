//! Typed configuration built from the merged TOML documents.

use std::{
  io::ErrorKind,
  path::{
    Path,
    PathBuf,
  },
};

use eyre::{
  Context,
  Result,
};
use serde::{
  Deserialize,
  Serialize,
};
use the_lib::{
  event::EventConfig,
  placeholder::{
    Placeholder,
    PlaceholderCatalog,
    PlaceholderKind,
  },
  render::{
    SurfaceMetrics,
    SurfaceState,
  },
  substitution::{
    DateStyle,
    ReplacePolicy,
    Resolver,
  },
  suggestion::InsertStrategy,
};

use crate::{
  CONFIG_FILE_NAME,
  WORKSPACE_DIR_NAME,
};

/// Depth up to which user documents are merged into the built-in one:
/// top-level tables, the `placeholder` array and the keys of each entry.
const MERGE_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  #[serde(default)]
  pub event:        EventConfig,
  #[serde(default)]
  pub date:         DateConfig,
  #[serde(default)]
  pub resolver:     ResolverConfig,
  #[serde(default)]
  pub editor:       EditorConfig,
  #[serde(default)]
  pub surface:      SurfaceMetrics,
  #[serde(default, rename = "placeholder")]
  pub placeholders: Vec<PlaceholderConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DateConfig {
  pub pattern:  String,
  pub weekdays: Vec<String>,
}

impl Default for DateConfig {
  fn default() -> Self {
    let style = DateStyle::default();
    Self {
      pattern:  style.pattern().to_string(),
      weekdays: style.weekdays().to_vec(),
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ResolverConfig {
  pub replace: ReplacePolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EditorConfig {
  pub insert: InsertStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlaceholderConfig {
  pub name:        String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub kind:        PlaceholderKind,
}

impl Config {
  /// The built-in configuration, without any user files.
  pub fn builtin() -> Result<Self> {
    Self::from_value(default_config()?)
  }

  /// The built-in configuration merged with the user's config directory and
  /// the current workspace, in that order.
  pub fn load() -> Result<Self> {
    let dirs = [
      crate::config_dir()?,
      crate::find_workspace()?.0.join(WORKSPACE_DIR_NAME),
    ];
    Self::load_from(&dirs)
  }

  /// Like [`Config::load`], reading `placeholders.toml` from `dirs`.
  pub fn load_from(dirs: &[PathBuf]) -> Result<Self> {
    Self::from_value(user_config_in(dirs)?)
  }

  pub fn from_value(value: toml::Value) -> Result<Self> {
    value
      .try_into()
      .context("invalid placeholder configuration")
  }

  pub fn catalog(&self) -> Result<PlaceholderCatalog> {
    let entries = self
      .placeholders
      .iter()
      .map(|entry| {
        Placeholder::with_kind(&entry.name, entry.description.as_str(), entry.kind)
          .with_context(|| format!("invalid placeholder '{}'", entry.name))
      })
      .collect::<Result<Vec<_>>>()?;
    PlaceholderCatalog::new(entries).context("invalid placeholder catalog")
  }

  pub fn date_style(&self) -> Result<DateStyle> {
    DateStyle::new(self.date.pattern.as_str(), self.date.weekdays.clone())
      .context("invalid [date] configuration")
  }

  pub fn resolver(&self) -> Result<Resolver> {
    Ok(
      Resolver::new(&self.catalog()?)
        .with_policy(self.resolver.replace)
        .with_date_style(self.date_style()?),
    )
  }

  pub fn insert_strategy(&self) -> InsertStrategy {
    self.editor.insert
  }

  pub fn surface(&self) -> SurfaceState {
    SurfaceState::new(self.surface)
  }
}

/// Built-in placeholders.toml.
pub fn default_config() -> Result<toml::Value> {
  let default_config = include_str!("../placeholders.toml");
  toml::from_str(default_config).context("failed to parse built-in placeholders.toml")
}

/// The built-in config with every `placeholders.toml` found in `dirs` merged
/// on top, later directories taking precedence.
pub fn user_config_in(dirs: &[PathBuf]) -> Result<toml::Value> {
  let default = default_config()?;

  let config = dirs
    .iter()
    .map(|dir| dir.join(CONFIG_FILE_NAME))
    .filter_map(|file| read_config_file(&file).transpose())
    .collect::<Result<Vec<_>>>()
    .context("failed to parse user placeholders.toml")?
    .into_iter()
    .fold(default, |a, b| crate::merge_toml_values(a, b, MERGE_DEPTH));

  Ok(config)
}

fn read_config_file(file: &Path) -> Result<Option<toml::Value>> {
  let config = match std::fs::read_to_string(file) {
    Ok(config) => config,
    Err(err) => {
      if err.kind() != ErrorKind::NotFound {
        tracing::warn!(file = %file.display(), %err, "skipping unreadable config file");
      }
      return Ok(None);
    },
  };
  let value = toml::from_str(&config).with_context(|| format!("in {}", file.display()))?;
  tracing::debug!(file = %file.display(), "loaded user config");
  Ok(Some(value))
}
