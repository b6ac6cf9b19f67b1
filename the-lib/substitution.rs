//! Template substitution.
//!
//! A [`Resolver`] knows a fixed set of placeholder identifiers (taken from a
//! [`PlaceholderCatalog`]) and replaces them in a template with values from a
//! [`ValueDictionary`] supplied on every call. The scan is a single
//! left-to-right pass over the template, so substituted values are never
//! scanned again and a value that happens to contain `{eventTitle}` stays as
//! written.

use std::{
  collections::HashMap,
  fmt::Write,
};

use chrono::{
  Datelike,
  NaiveDate,
  format::{
    Fixed,
    Item,
    StrftimeItems,
  },
};
use serde::{
  Deserialize,
  Serialize,
};
use the_core::chars::{
  char_is_identifier,
  char_is_identifier_start,
};
use thiserror::Error;

use crate::placeholder::{
  PlaceholderCatalog,
  PlaceholderKind,
  TOKEN_CLOSE,
  TOKEN_OPEN,
};

/// Current values keyed by placeholder identifier (without braces).
pub type ValueDictionary = HashMap<String, String>;

/// Format in which date values are stored.
pub const DATE_VALUE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateStyleError {
  #[error("invalid date pattern '{0}'")]
  InvalidPattern(String),
  #[error("expected 7 weekday names, got {0}")]
  WeekdayCount(usize),
}

/// Which occurrences of a known placeholder are replaced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplacePolicy {
  /// Every occurrence is replaced.
  #[default]
  All,
  /// Only the first occurrence of each identifier is replaced; later
  /// occurrences are left verbatim.
  First,
}

/// Long date rendering for [`PlaceholderKind::Date`] values.
///
/// `pattern` is a strftime pattern. `%a` is rendered with `weekdays`
/// (Monday first) instead of chrono's English abbreviations. Patterns are
/// checked against a sample date up front, so formatting never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateStyle {
  pattern:  String,
  weekdays: [String; 7],
}

impl DateStyle {
  pub fn new(pattern: impl Into<String>, weekdays: Vec<String>) -> Result<Self, DateStyleError> {
    let pattern = pattern.into();
    let sample = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
    if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error))
      || format_with_weekday(&pattern, "", sample).is_none()
    {
      return Err(DateStyleError::InvalidPattern(pattern));
    }
    let weekdays: [String; 7] = weekdays
      .try_into()
      .map_err(|names: Vec<String>| DateStyleError::WeekdayCount(names.len()))?;
    Ok(Self { pattern, weekdays })
  }

  /// `2024年05月10日(金)` style dates.
  pub fn japanese() -> Self {
    Self {
      pattern:  "%Y年%m月%d日(%a)".to_string(),
      weekdays: ["月", "火", "水", "木", "金", "土", "日"].map(String::from),
    }
  }

  pub fn pattern(&self) -> &str {
    &self.pattern
  }

  /// Weekday names, Monday first.
  pub fn weekdays(&self) -> &[String; 7] {
    &self.weekdays
  }

  pub fn format(&self, date: NaiveDate) -> String {
    let weekday = &self.weekdays[date.weekday().num_days_from_monday() as usize];
    format_with_weekday(&self.pattern, weekday, date).unwrap_or_else(|| {
      tracing::warn!(pattern = %self.pattern, "date pattern failed to render");
      date.format(DATE_VALUE_FORMAT).to_string()
    })
  }

  /// Formats a stored `YYYY-MM-DD` value, or `None` if it is not a date.
  pub fn format_value(&self, value: &str) -> Option<String> {
    NaiveDate::parse_from_str(value.trim(), DATE_VALUE_FORMAT)
      .ok()
      .map(|date| self.format(date))
  }
}

impl Default for DateStyle {
  fn default() -> Self {
    Self::japanese()
  }
}

/// Formats `date` with `%a` items swapped for the literal `weekday`.
/// Returns `None` if the pattern needs fields a plain date lacks (`%H`, `%z`).
fn format_with_weekday(pattern: &str, weekday: &str, date: NaiveDate) -> Option<String> {
  let items: Vec<Item<'_>> = StrftimeItems::new(pattern)
    .map(|item| {
      match item {
        Item::Fixed(Fixed::ShortWeekdayName) => Item::Literal(weekday),
        item => item,
      }
    })
    .collect();
  let mut out = String::new();
  write!(out, "{}", date.format_with_items(items.iter())).ok()?;
  Some(out)
}

#[derive(Debug, Clone)]
pub struct Resolver {
  known:      HashMap<String, PlaceholderKind>,
  policy:     ReplacePolicy,
  date_style: DateStyle,
}

impl Resolver {
  pub fn new(catalog: &PlaceholderCatalog) -> Self {
    Self {
      known:      catalog
        .iter()
        .map(|entry| (entry.identifier().to_string(), entry.kind()))
        .collect(),
      policy:     ReplacePolicy::default(),
      date_style: DateStyle::default(),
    }
  }

  #[must_use]
  pub fn with_policy(mut self, policy: ReplacePolicy) -> Self {
    self.policy = policy;
    self
  }

  #[must_use]
  pub fn with_date_style(mut self, date_style: DateStyle) -> Self {
    self.date_style = date_style;
    self
  }

  pub fn policy(&self) -> ReplacePolicy {
    self.policy
  }

  pub fn is_known(&self, identifier: &str) -> bool {
    self.known.contains_key(identifier)
  }

  /// Replaces known placeholders in `template` with their values.
  ///
  /// Known placeholders without a value resolve to an empty string. Unknown
  /// tokens and stray braces are copied verbatim.
  pub fn resolve(&self, template: &str, values: &ValueDictionary) -> String {
    let mut out = String::with_capacity(template.len());
    let mut replaced: Vec<&str> = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find(TOKEN_OPEN) {
      out.push_str(&rest[..open]);
      let candidate = &rest[open..];
      let Some(identifier) = leading_identifier(candidate) else {
        out.push(TOKEN_OPEN);
        rest = &candidate[TOKEN_OPEN.len_utf8()..];
        continue;
      };
      let token_len = identifier.len() + TOKEN_OPEN.len_utf8() + TOKEN_CLOSE.len_utf8();
      let token = &candidate[..token_len];
      rest = &candidate[token_len..];

      let Some(kind) = self.known.get(identifier) else {
        out.push_str(token);
        continue;
      };
      if self.policy == ReplacePolicy::First {
        if replaced.contains(&identifier) {
          out.push_str(token);
          continue;
        }
        replaced.push(identifier);
      }
      out.push_str(&self.render_value(identifier, *kind, values));
    }

    out.push_str(rest);
    out
  }

  fn render_value(&self, identifier: &str, kind: PlaceholderKind, values: &ValueDictionary) -> String {
    let Some(value) = values.get(identifier) else {
      return String::new();
    };
    match kind {
      PlaceholderKind::Text => value.clone(),
      PlaceholderKind::Date if value.is_empty() => String::new(),
      PlaceholderKind::Date => {
        self.date_style.format_value(value).unwrap_or_else(|| {
          tracing::debug!(identifier, value = %value, "date placeholder value is not a date");
          value.clone()
        })
      },
    }
  }
}

/// If `text` starts with a complete `{identifier}` token, returns the
/// identifier.
fn leading_identifier(text: &str) -> Option<&str> {
  let body = text.strip_prefix(TOKEN_OPEN)?;
  let mut chars = body.char_indices();
  let (_, first) = chars.next()?;
  if !char_is_identifier_start(first) {
    return None;
  }
  let end = chars
    .find(|&(_, ch)| !char_is_identifier(ch))
    .map_or(body.len(), |(offset, _)| offset);
  body[end..].starts_with(TOKEN_CLOSE).then(|| &body[..end])
}

/// Resolves `template` against every placeholder in `catalog` with the
/// default policy and date style.
pub fn resolve(template: &str, catalog: &PlaceholderCatalog, values: &ValueDictionary) -> String {
  Resolver::new(catalog).resolve(template, values)
}

#[cfg(test)]
mod tests {
  use quickcheck::{
    TestResult,
    quickcheck,
  };

  use super::*;
  use crate::placeholder::Placeholder;

  fn catalog() -> PlaceholderCatalog {
    PlaceholderCatalog::new([
      Placeholder::new("zoomUrl", "").unwrap(),
      Placeholder::new("zoomPasscode", "").unwrap(),
      Placeholder::new("eventTitle", "").unwrap(),
      Placeholder::with_kind("eventDate", "", PlaceholderKind::Date).unwrap(),
    ])
    .unwrap()
  }

  fn values(pairs: &[(&str, &str)]) -> ValueDictionary {
    pairs
      .iter()
      .map(|(key, value)| (key.to_string(), value.to_string()))
      .collect()
  }

  #[test]
  fn resolves_known_placeholders() {
    let values = values(&[("zoomUrl", "https://x/y"), ("zoomPasscode", "ab12")]);
    assert_eq!(
      resolve("Join: {zoomUrl} code {zoomPasscode}", &catalog(), &values),
      "Join: https://x/y code ab12"
    );
  }

  #[test]
  fn unknown_tokens_stay_verbatim() {
    let values = values(&[("unknownToken", "nope")]);
    assert_eq!(
      resolve("a {unknownToken} b", &catalog(), &values),
      "a {unknownToken} b"
    );
  }

  #[test]
  fn missing_values_resolve_to_empty() {
    assert_eq!(
      resolve("[{eventTitle}]", &catalog(), &ValueDictionary::new()),
      "[]"
    );
  }

  #[test]
  fn malformed_braces_are_literal_text() {
    let values = values(&[("eventTitle", "T")]);
    let resolver = Resolver::new(&catalog());
    assert_eq!(resolver.resolve("{}", &values), "{}");
    assert_eq!(resolver.resolve("{eventTitle", &values), "{eventTitle");
    assert_eq!(resolver.resolve("{{eventTitle}}", &values), "{T}");
    assert_eq!(resolver.resolve("{event Title}", &values), "{event Title}");
    assert_eq!(resolver.resolve("}{", &values), "}{");
    assert_eq!(resolver.resolve("{ev{eventTitle}", &values), "{evT");
  }

  #[test]
  fn replace_all_is_the_default_policy() {
    let values = values(&[("eventTitle", "Rust Night")]);
    let resolver = Resolver::new(&catalog());
    assert_eq!(resolver.policy(), ReplacePolicy::All);
    assert_eq!(
      resolver.resolve("{eventTitle} / {eventTitle}", &values),
      "Rust Night / Rust Night"
    );
  }

  #[test]
  fn replace_first_leaves_later_occurrences() {
    let values = values(&[("eventTitle", "Rust Night"), ("zoomUrl", "z")]);
    let resolver = Resolver::new(&catalog()).with_policy(ReplacePolicy::First);
    assert_eq!(
      resolver.resolve("{eventTitle} {zoomUrl} {eventTitle} {zoomUrl}", &values),
      "Rust Night z {eventTitle} {zoomUrl}"
    );
  }

  #[test]
  fn values_are_not_rescanned() {
    let values = values(&[("zoomUrl", "{eventTitle}"), ("eventTitle", "T")]);
    assert_eq!(
      resolve("{zoomUrl} {eventTitle}", &catalog(), &values),
      "{eventTitle} T"
    );
  }

  #[test]
  fn date_placeholders_use_the_long_form() {
    let values = values(&[("eventDate", "2024-05-10")]);
    assert_eq!(
      resolve("on {eventDate}", &catalog(), &values),
      "on 2024年05月10日(金)"
    );
  }

  #[test]
  fn unparsable_dates_fall_back_to_the_raw_value() {
    let garbled = values(&[("eventDate", "next friday")]);
    assert_eq!(resolve("{eventDate}", &catalog(), &garbled), "next friday");
    let empty = values(&[("eventDate", "")]);
    assert_eq!(resolve("{eventDate}", &catalog(), &empty), "");
  }

  #[test]
  fn custom_date_style() {
    let style = DateStyle::new(
      "%a, %d %B %Y",
      ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        .map(String::from)
        .to_vec(),
    )
    .unwrap();
    let resolver = Resolver::new(&catalog()).with_date_style(style);
    let values = values(&[("eventDate", "2024-12-01")]);
    assert_eq!(resolver.resolve("{eventDate}", &values), "Sun, 01 December 2024");
  }

  #[test]
  fn weekday_names_may_contain_percent() {
    let style = DateStyle::new("%a", vec!["%d".to_string(); 7]).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
    assert_eq!(style.format(date), "%d");
  }

  #[test]
  fn escaped_percent_before_a_is_literal() {
    let style = DateStyle::new("100%%a %a", vec!["金".to_string(); 7]).unwrap();
    let resolver = Resolver::new(&catalog()).with_date_style(style);
    let values = values(&[("eventDate", "2024-05-10")]);
    assert_eq!(resolver.resolve("{eventDate}", &values), "100%a 金");
  }

  #[test]
  fn invalid_date_styles_are_rejected() {
    assert_eq!(
      DateStyle::new("%Q", vec![String::new(); 7]),
      Err(DateStyleError::InvalidPattern("%Q".to_string()))
    );
    assert_eq!(
      DateStyle::new("%Y %H:%M", vec![String::new(); 7]),
      Err(DateStyleError::InvalidPattern("%Y %H:%M".to_string()))
    );
    assert_eq!(
      DateStyle::new("%Y", vec![String::new(); 3]),
      Err(DateStyleError::WeekdayCount(3))
    );
  }

  quickcheck! {
    fn resolving_twice_is_stable(template: String, title: String, url: String) -> TestResult {
      let catalog = catalog();
      let values = values(&[("eventTitle", title.as_str()), ("zoomUrl", url.as_str())]);
      let resolver = Resolver::new(&catalog);
      let once = resolver.resolve(&template, &values);
      if catalog.iter().any(|entry| once.contains(entry.token())) {
        return TestResult::discard();
      }
      let twice = resolver.resolve(&once, &values);
      TestResult::from_bool(once == twice)
    }

    fn templates_without_braces_are_unchanged(template: String) -> TestResult {
      if template.contains(TOKEN_OPEN) {
        return TestResult::discard();
      }
      let values = values(&[("eventTitle", "T")]);
      TestResult::from_bool(resolve(&template, &catalog(), &values) == template)
    }
  }
}
