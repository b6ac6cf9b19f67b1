//! Visual layout of plain text on a monospace grid.
//!
//! [`TextLayout`] walks a string grapheme by grapheme and assigns each one a
//! visual position. With soft wrap enabled it behaves like a text area using
//! `white-space: pre-wrap` and `word-wrap: break-word`:
//!
//! - a line break always starts a new visual line;
//! - whitespace is kept as is and may hang past the end of a line;
//! - a word that does not fit on the rest of the line moves to the next one;
//! - a word wider than a whole line is broken at the grapheme that overflows.
//!
//! Words end after whitespace, a dash or a wide grapheme (see
//! [`Grapheme::is_word_boundary`]). Brackets and other punctuation never
//! end a word, so a half typed `{token` wraps as one piece.
//!
//! ```
//! use the_lib::{
//!   position::Position,
//!   render::{layout::TextLayout, text_format::TextFormat},
//! };
//!
//! let fmt = TextFormat::wrapped_at(10);
//! let last = TextLayout::new("hello world", &fmt).last().unwrap();
//! assert_eq!(last.visual_pos, Position::new(1, 4));
//! ```

use the_core::grapheme::Grapheme;
use unicode_segmentation::{
  Graphemes,
  UnicodeSegmentation,
};

use crate::{
  position::Position,
  render::{
    FormattedGrapheme,
    text_format::TextFormat,
  },
};

#[derive(Debug, Clone)]
pub struct TextLayout<'a> {
  text_fmt:   &'a TextFormat,
  graphemes:  Graphemes<'a>,
  /// Visual position of the next grapheme to be placed.
  visual_pos: Position,
  /// Char position of the next grapheme in `graphemes`.
  char_pos:   usize,
  /// A first-in first-out buffer holding the placed graphemes of one word.
  word_buf:   Vec<FormattedGrapheme<'a>>,
  /// The index of the next grapheme that will be yielded from `word_buf`.
  word_i:     usize,
}

impl<'a> TextLayout<'a> {
  pub fn new(text: &'a str, text_fmt: &'a TextFormat) -> Self {
    TextLayout {
      text_fmt,
      graphemes: text.graphemes(true),
      visual_pos: Position::zero(),
      char_pos: 0,
      word_buf: Vec::with_capacity(32),
      word_i: 0,
    }
  }

  /// Visual position right after the last grapheme laid out so far.
  pub fn visual_pos(&self) -> Position {
    self.visual_pos
  }

  fn wrap_width(&self) -> Option<usize> {
    self
      .text_fmt
      .soft_wrap
      .then(|| self.text_fmt.viewport_width.max(1) as usize)
  }

  fn advance_to_next_word(&mut self) {
    self.word_buf.clear();
    self.word_i = 0;

    // Without soft wrap every grapheme is its own word.
    let whole_words = self.text_fmt.soft_wrap;
    for g in self.graphemes.by_ref() {
      let chars = g.chars().count();
      let raw = Grapheme::new(g, 0, self.text_fmt.tab_width);
      let is_word_boundary = raw.is_word_boundary();
      self.word_buf.push(FormattedGrapheme {
        raw,
        visual_pos: Position::zero(),
        char_idx: self.char_pos,
        chars,
      });
      self.char_pos += chars;

      if is_word_boundary || !whole_words {
        break;
      }
    }

    self.place_word();
  }

  fn place_word(&mut self) {
    let wrap_width = self.wrap_width();
    let tab_width = self.text_fmt.tab_width;

    if let Some(max) = wrap_width {
      // Trailing whitespace hangs, so only the visible part has to fit.
      let word_width: usize = self
        .word_buf
        .iter()
        .filter(|grapheme| !grapheme.is_whitespace())
        .map(FormattedGrapheme::width)
        .sum();
      if self.visual_pos.col > 0 && self.visual_pos.col + word_width > max && word_width <= max {
        self.visual_pos.next_row();
      }
    }

    for grapheme in &mut self.word_buf {
      grapheme.raw.change_position(self.visual_pos.col, tab_width);
      let overflows = wrap_width.is_some_and(|max| {
        !grapheme.is_whitespace()
          && self.visual_pos.col > 0
          && self.visual_pos.col + grapheme.width() > max
      });
      if overflows {
        self.visual_pos.next_row();
      }

      grapheme.visual_pos = self.visual_pos;
      if grapheme.is_newline() {
        self.visual_pos.next_row();
      } else {
        self.visual_pos.col += grapheme.width();
      }
    }
  }
}

impl<'a> Iterator for TextLayout<'a> {
  type Item = FormattedGrapheme<'a>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.word_i >= self.word_buf.len() {
      self.advance_to_next_word();
    }
    let grapheme = self.word_buf.get(self.word_i)?.clone();
    self.word_i += 1;
    Some(grapheme)
  }
}
