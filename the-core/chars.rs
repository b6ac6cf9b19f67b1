//! Character classification for placeholder tokens and soft wrapping.

/// Line terminators that start a new visual line.
#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  matches!(
    ch,
    '\u{000A}' | '\u{000B}' | '\u{000C}' | '\u{000D}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
  )
}

/// Whitespace that separates a placeholder token from the text before it.
///
/// This is the full Unicode whitespace set (line endings included) plus the
/// zero width no-break space, so a token never spans a line break.
#[inline]
pub fn char_is_whitespace(ch: char) -> bool {
  ch.is_whitespace() || ch == '\u{FEFF}'
}

/// Hyphens and other dashes, after which a line may wrap.
#[inline]
pub fn char_is_dash(ch: char) -> bool {
  use unicode_general_category::{
    GeneralCategory,
    get_general_category,
  };

  get_general_category(ch) == GeneralCategory::DashPunctuation
}

#[inline]
pub fn char_is_word(ch: char) -> bool {
  ch.is_alphanumeric() || ch == '_'
}

/// First character of a placeholder identifier.
#[inline]
pub fn char_is_identifier_start(ch: char) -> bool {
  ch.is_alphabetic() || ch == '_'
}

/// Any character of a placeholder identifier after the first.
#[inline]
pub fn char_is_identifier(ch: char) -> bool {
  char_is_word(ch)
}

/// Returns true if `name` is a bare placeholder identifier such as `zoomUrl`.
pub fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  chars.next().is_some_and(char_is_identifier_start) && chars.all(char_is_identifier)
}
