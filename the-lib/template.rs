//! Saved message templates.
//!
//! The library mirrors what the template form does: saving with nothing
//! selected creates a template, saving with a selection updates it, and
//! deleting removes it. Persisting the list is up to the host, which is why
//! [`Template`] is serde-serializable.

use chrono::NaiveDateTime;
use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

/// Format of generated template ids.
pub const TEMPLATE_ID_FORMAT: &str = "%Y%m%d%H%M%S";

pub type Result<T> = std::result::Result<T, TemplateError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
  #[error("no template with id '{0}'")]
  NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
  pub id:   String,
  pub name: String,
  pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateLibrary {
  templates: Vec<Template>,
}

impl TemplateLibrary {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_templates(templates: Vec<Template>) -> Self {
    Self { templates }
  }

  pub fn len(&self) -> usize {
    self.templates.len()
  }

  pub fn is_empty(&self) -> bool {
    self.templates.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Template> {
    self.templates.iter()
  }

  pub fn get(&self, id: &str) -> Option<&Template> {
    self.templates.iter().find(|template| template.id == id)
  }

  /// Saves the form contents and returns the id of the saved template.
  ///
  /// With `selected = None` a new template is appended, its id taken from
  /// `now`; a numeric suffix keeps ids unique when two templates are saved
  /// within the same second.
  pub fn save(
    &mut self,
    selected: Option<&str>,
    name: &str,
    text: &str,
    now: NaiveDateTime,
  ) -> Result<String> {
    if let Some(id) = selected {
      let template = self
        .templates
        .iter_mut()
        .find(|template| template.id == id)
        .ok_or_else(|| TemplateError::NotFound(id.to_string()))?;
      template.name = name.to_string();
      template.text = text.to_string();
      return Ok(template.id.clone());
    }

    let id = self.unique_id(now);
    tracing::debug!(%id, "created template");
    self.templates.push(Template {
      id: id.clone(),
      name: name.to_string(),
      text: text.to_string(),
    });
    Ok(id)
  }

  pub fn delete(&mut self, id: &str) -> Result<Template> {
    let index = self
      .templates
      .iter()
      .position(|template| template.id == id)
      .ok_or_else(|| TemplateError::NotFound(id.to_string()))?;
    Ok(self.templates.remove(index))
  }

  fn unique_id(&self, now: NaiveDateTime) -> String {
    let base = now.format(TEMPLATE_ID_FORMAT).to_string();
    if self.get(&base).is_none() {
      return base;
    }
    (2..)
      .map(|n| format!("{base}-{n}"))
      .find(|id| self.get(id).is_none())
      .unwrap_or(base)
  }
}

impl<'a> IntoIterator for &'a TemplateLibrary {
  type Item = &'a Template;
  type IntoIter = std::slice::Iter<'a, Template>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}
