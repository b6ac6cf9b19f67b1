//! Placeholder suggestions for the token under the caret.
//!
//! Everything in here is a pure function over strings: the caret is a char
//! index and only text before it is ever inspected.

use serde::{
  Deserialize,
  Serialize,
};
use the_core::chars::char_is_whitespace;

use crate::placeholder::{
  Placeholder,
  PlaceholderCatalog,
  TOKEN_OPEN,
};

/// How a chosen suggestion replaces the partial token before the caret.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertStrategy {
  /// Replace exactly the partial token span. All other text, whitespace and
  /// line breaks included, is left untouched.
  #[default]
  ExactSpan,
  /// Split the text before the caret into words, drop the last one, append
  /// the token and re-join with single spaces. Runs of whitespace and line
  /// breaks before the caret collapse into one space.
  FlattenWords,
}

/// Result of inserting a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
  pub text:  String,
  /// Char index right after the inserted token.
  pub caret: usize,
}

/// Byte offset of the char index `caret`, clamped to the end of `text`.
fn byte_offset(text: &str, caret: usize) -> usize {
  text
    .char_indices()
    .nth(caret)
    .map_or(text.len(), |(offset, _)| offset)
}

/// Returns the longest run of non-whitespace characters ending at `caret`.
///
/// ```
/// use the_lib::suggestion::partial_token;
///
/// assert_eq!(partial_token("Join: {zoo", 10), "{zoo");
/// assert_eq!(partial_token("Join: {zoomUrl}", 10), "{zoo");
/// assert_eq!(partial_token("line\n{ev", 8), "{ev");
/// ```
pub fn partial_token(text: &str, caret: usize) -> &str {
  let before = &text[..byte_offset(text, caret)];
  let start = before
    .char_indices()
    .rev()
    .find(|&(_, ch)| char_is_whitespace(ch))
    .map_or(0, |(offset, ch)| offset + ch.len_utf8());
  &before[start..]
}

/// Filters `catalog` down to the entries completing `partial`.
///
/// An empty result means the popup must be closed: this happens whenever
/// `partial` does not start with `{` or nothing matches. Matching is
/// case-sensitive and prefix-only, and catalog order is preserved.
pub fn filter_suggestions<'a>(catalog: &'a PlaceholderCatalog, partial: &str) -> Vec<&'a Placeholder> {
  if !partial.starts_with(TOKEN_OPEN) {
    return Vec::new();
  }
  catalog
    .iter()
    .filter(|entry| entry.token().starts_with(partial))
    .collect()
}

/// Replaces the partial token before `caret` with `token`.
pub fn insert_suggestion(
  text: &str,
  caret: usize,
  token: &str,
  strategy: InsertStrategy,
) -> Insertion {
  let caret_byte = byte_offset(text, caret);
  let (before, after) = text.split_at(caret_byte);

  let prefix = match strategy {
    InsertStrategy::ExactSpan => {
      let partial = partial_token(before, usize::MAX);
      let mut prefix = String::with_capacity(before.len() + token.len());
      prefix.push_str(&before[..before.len() - partial.len()]);
      prefix.push_str(token);
      prefix
    },
    InsertStrategy::FlattenWords => {
      let mut words = split_whitespace_runs(before);
      words.pop();
      words.push(token);
      words.join(" ")
    },
  };

  let caret = prefix.chars().count();
  let mut text = prefix;
  text.push_str(after);
  Insertion { text, caret }
}

/// Splits on runs of whitespace, keeping a leading and trailing empty word
/// when `text` starts or ends with whitespace.
fn split_whitespace_runs(text: &str) -> Vec<&str> {
  let mut words = Vec::new();
  let mut word_start = Some(0);
  for (offset, ch) in text.char_indices() {
    if char_is_whitespace(ch) {
      if let Some(start) = word_start.take() {
        words.push(&text[start..offset]);
      }
    } else if word_start.is_none() {
      word_start = Some(offset);
    }
  }
  words.push(word_start.map_or("", |start| &text[start..]));
  words
}
