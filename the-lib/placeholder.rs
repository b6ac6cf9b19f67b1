//! Placeholder tokens and the catalog offered to the editor.
//!
//! A placeholder is written as `{identifier}` inside a template. The catalog
//! is an ordered, duplicate-free list of placeholders; it is handed to every
//! editor and resolver explicitly so independent instances can use different
//! catalogs.

use std::{
  collections::HashSet,
  sync::Arc,
};

use serde::{
  Deserialize,
  Serialize,
};
use the_core::chars::is_identifier;
use thiserror::Error;

pub const TOKEN_OPEN: char = '{';
pub const TOKEN_CLOSE: char = '}';

pub type Result<T> = std::result::Result<T, PlaceholderError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaceholderError {
  #[error("'{0}' is not a valid placeholder identifier")]
  InvalidIdentifier(String),
  #[error("placeholder {0} is defined more than once")]
  DuplicateToken(String),
}

/// How a placeholder's value is rendered by the resolver.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceholderKind {
  /// The value is substituted as is.
  #[default]
  Text,
  /// The value is a `YYYY-MM-DD` date rendered as a long, localized date.
  Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
  token:       String,
  description: String,
  kind:        PlaceholderKind,
}

impl Placeholder {
  pub fn new(identifier: &str, description: impl Into<String>) -> Result<Self> {
    Self::with_kind(identifier, description, PlaceholderKind::Text)
  }

  pub fn with_kind(
    identifier: &str,
    description: impl Into<String>,
    kind: PlaceholderKind,
  ) -> Result<Self> {
    if !is_identifier(identifier) {
      return Err(PlaceholderError::InvalidIdentifier(identifier.to_string()));
    }
    Ok(Self {
      token: format!("{TOKEN_OPEN}{identifier}{TOKEN_CLOSE}"),
      description: description.into(),
      kind,
    })
  }

  /// The full token including braces, e.g. `{zoomUrl}`.
  pub fn token(&self) -> &str {
    &self.token
  }

  /// The identifier without braces, e.g. `zoomUrl`.
  pub fn identifier(&self) -> &str {
    &self.token[TOKEN_OPEN.len_utf8()..self.token.len() - TOKEN_CLOSE.len_utf8()]
  }

  pub fn description(&self) -> &str {
    &self.description
  }

  pub fn kind(&self) -> PlaceholderKind {
    self.kind
  }
}

/// Ordered set of placeholders. Cloning is cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderCatalog {
  entries: Arc<[Placeholder]>,
}

impl PlaceholderCatalog {
  pub fn new(entries: impl IntoIterator<Item = Placeholder>) -> Result<Self> {
    let entries: Vec<Placeholder> = entries.into_iter().collect();
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in &entries {
      if !seen.insert(entry.token()) {
        return Err(PlaceholderError::DuplicateToken(entry.token().to_string()));
      }
    }
    Ok(Self {
      entries: entries.into(),
    })
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Placeholder> {
    self.entries.iter()
  }

  pub fn as_slice(&self) -> &[Placeholder] {
    &self.entries
  }

  /// Looks up a placeholder by identifier (without braces).
  pub fn get(&self, identifier: &str) -> Option<&Placeholder> {
    self.entries.iter().find(|entry| entry.identifier() == identifier)
  }

  pub fn contains(&self, identifier: &str) -> bool {
    self.get(identifier).is_some()
  }
}

impl<'a> IntoIterator for &'a PlaceholderCatalog {
  type Item = &'a Placeholder;
  type IntoIter = std::slice::Iter<'a, Placeholder>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

/// Returns the identifier of a complete token such as `{eventTitle}`.
///
/// Anything else (missing braces, empty or malformed identifier, nested
/// braces) is not a token and yields `None`.
pub fn parse_token(token: &str) -> Option<&str> {
  let identifier = token.strip_prefix(TOKEN_OPEN)?.strip_suffix(TOKEN_CLOSE)?;
  is_identifier(identifier).then_some(identifier)
}
