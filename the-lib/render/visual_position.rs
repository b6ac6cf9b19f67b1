//! Visual position helpers.
//!
//! These map char indices to visual positions (row/column) under a
//! [`TextFormat`].

use crate::{
  position::Position,
  render::{
    layout::TextLayout,
    text_format::TextFormat,
  },
};

/// Map a char index to the visual position of the grapheme containing it.
///
/// Indices at or past the end of `text` map to the position right after the
/// last grapheme.
pub fn visual_pos_at_char(text: &str, text_fmt: &TextFormat, char_idx: usize) -> Position {
  let mut layout = TextLayout::new(text, text_fmt);
  for grapheme in &mut layout {
    if grapheme.end_char_idx() > char_idx {
      return grapheme.visual_pos;
    }
  }
  layout.visual_pos()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn maps_chars_across_lines() {
    let fmt = TextFormat::unwrapped();
    assert_eq!(visual_pos_at_char("ab\ncd", &fmt, 0), Position::new(0, 0));
    assert_eq!(visual_pos_at_char("ab\ncd", &fmt, 2), Position::new(0, 2));
    assert_eq!(visual_pos_at_char("ab\ncd", &fmt, 4), Position::new(1, 1));
  }

  #[test]
  fn end_of_text_is_after_the_last_grapheme() {
    let fmt = TextFormat::unwrapped();
    assert_eq!(visual_pos_at_char("ab\ncd", &fmt, 5), Position::new(1, 2));
    assert_eq!(visual_pos_at_char("ab\n", &fmt, 99), Position::new(1, 0));
    assert_eq!(visual_pos_at_char("", &fmt, 0), Position::zero());
  }

  #[test]
  fn index_inside_a_cluster_maps_to_its_start() {
    let fmt = TextFormat::unwrapped();
    assert_eq!(visual_pos_at_char("xe\u{301}y", &fmt, 2), Position::new(0, 1));
    assert_eq!(visual_pos_at_char("xe\u{301}y", &fmt, 3), Position::new(0, 2));
  }

  #[test]
  fn wrapped_words_are_followed() {
    let fmt = TextFormat::wrapped_at(10);
    assert_eq!(visual_pos_at_char("hello world", &fmt, 8), Position::new(1, 2));
  }
}
