//! Configuration loading for the template editor.
//!
//! The built-in `placeholders.toml` is merged with user files found in the
//! config directory and in the current workspace; see [`config`].

pub mod config;

use std::path::{
  Path,
  PathBuf,
};

use etcetera::base_strategy::{
  BaseStrategy,
  choose_base_strategy,
};
use eyre::{
  Context,
  Result,
};

/// Name of the configuration file, both built in and user provided.
pub const CONFIG_FILE_NAME: &str = "placeholders.toml";

/// Directory marking a workspace and holding its configuration.
pub const WORKSPACE_DIR_NAME: &str = ".the-template";

/// Environment variable overriding [`config_dir`].
pub const CONFIG_DIR_ENV: &str = "THE_TEMPLATE_CONFIG_DIR";

pub fn config_dir() -> Result<PathBuf> {
  if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
    return expand_tilde(Path::new(&dir));
  }
  let strategy = choose_base_strategy().context("unable to find the config directory")?;
  let mut path = strategy.config_dir();
  path.push("the-template");
  Ok(path)
}

pub fn config_file() -> Result<PathBuf> {
  Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

pub fn workspace_config_file() -> Result<PathBuf> {
  Ok(find_workspace()?.0.join(WORKSPACE_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn expand_tilde(path: &Path) -> Result<PathBuf> {
  let Ok(rest) = path.strip_prefix("~") else {
    return Ok(path.to_owned());
  };
  let strategy = choose_base_strategy().context("unable to find the home directory")?;
  Ok(strategy.home_dir().join(rest))
}

/// Merge two TOML documents, merging values from `right` onto `left`
///
/// `merge_depth` sets the nesting depth up to which values are merged instead
/// of overridden.
///
/// When a table exists in both `left` and `right`, the merged table consists of
/// all keys in `left`'s table unioned with all keys in `right` with the values
/// of `right` being merged recursively onto values of `left`. Arrays of tables
/// are merged element-wise by their `name` key; unnamed elements are appended.
///
/// `crate::merge_toml_values(a, b, 3)` combines, for example:
///
/// a:
/// ```toml
/// [[placeholder]]
/// name = "eventDate"
/// description = "イベント開始日"
/// kind = "date"
/// ```
/// b:
/// ```toml
/// [[placeholder]]
/// name = "eventDate"
/// description = "Event date"
/// ```
///
/// into:
/// ```toml
/// [[placeholder]]
/// name = "eventDate"
/// description = "Event date"
/// kind = "date"
/// ```
pub fn merge_toml_values(left: toml::Value, right: toml::Value, merge_depth: usize) -> toml::Value {
  use toml::Value;

  fn get_name(v: &Value) -> Option<&str> {
    v.get("name").and_then(Value::as_str)
  }

  match (left, right) {
    (Value::Array(mut left_items), Value::Array(right_items)) => {
      if merge_depth > 0 {
        left_items.reserve(right_items.len());
        for rvalue in right_items {
          // Merge in place so the built-in order is kept.
          let lpos = get_name(&rvalue)
            .and_then(|rname| left_items.iter().position(|v| get_name(v) == Some(rname)));
          match lpos {
            Some(lpos) => {
              let lvalue = std::mem::replace(&mut left_items[lpos], Value::Boolean(false));
              left_items[lpos] = merge_toml_values(lvalue, rvalue, merge_depth - 1);
            },
            None => left_items.push(rvalue),
          }
        }
        Value::Array(left_items)
      } else {
        Value::Array(right_items)
      }
    },
    (Value::Table(mut left_map), Value::Table(right_map)) => {
      if merge_depth > 0 {
        for (rname, rvalue) in right_map {
          match left_map.remove(&rname) {
            Some(lvalue) => {
              let merged_value = merge_toml_values(lvalue, rvalue, merge_depth - 1);
              left_map.insert(rname, merged_value);
            },
            None => {
              left_map.insert(rname, rvalue);
            },
          }
        }
        Value::Table(left_map)
      } else {
        Value::Table(right_map)
      }
    },
    // Catch everything else we didn't handle, and use the right value
    (_, value) => value,
  }
}

/// Finds the current workspace folder.
///
/// This function starts searching the FS upward from the CWD
/// and returns the first directory that contains either `.git`, `.svn`, `.jj`
/// or `.the-template`. If no workspace was found returns (CWD, true).
/// Otherwise (workspace, false) is returned
pub fn find_workspace() -> Result<(PathBuf, bool)> {
  let current_dir = std::env::current_dir().context("unable to read the current directory")?;
  Ok(find_workspace_in(current_dir))
}

pub fn find_workspace_in(dir: impl AsRef<Path>) -> (PathBuf, bool) {
  let dir = dir.as_ref();
  for ancestor in dir.ancestors() {
    if ancestor.join(".git").exists()
      || ancestor.join(".svn").exists()
      || ancestor.join(".jj").exists()
      || ancestor.join(WORKSPACE_DIR_NAME).exists()
    {
      return (ancestor.to_owned(), false);
    }
  }

  (dir.to_owned(), true)
}
