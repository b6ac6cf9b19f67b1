use the_core::grapheme::Grapheme;

use crate::position::Position;

/// A grapheme that has been placed on the visual grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedGrapheme<'a> {
  pub raw:        Grapheme<'a>,
  pub visual_pos: Position,
  /// Char position at the start of the grapheme.
  pub char_idx:   usize,
  /// Number of chars making up the grapheme.
  pub chars:      usize,
}

impl FormattedGrapheme<'_> {
  pub fn is_whitespace(&self) -> bool {
    self.raw.is_whitespace()
  }

  pub fn is_newline(&self) -> bool {
    self.raw == Grapheme::Newline
  }

  pub fn width(&self) -> usize {
    self.raw.width()
  }

  /// Char position right after the grapheme.
  pub fn end_char_idx(&self) -> usize {
    self.char_idx + self.chars
  }
}
