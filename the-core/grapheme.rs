//! Grapheme helpers for measuring text laid out on a monospace grid.

use ropey::{
  RopeSlice,
  str_utils::byte_to_char_idx,
};
use unicode_segmentation::{
  GraphemeCursor,
  GraphemeIncomplete,
};
use unicode_width::UnicodeWidthStr;

use crate::chars::{
  char_is_dash,
  char_is_line_ending,
  char_is_whitespace,
};

#[inline]
pub fn tab_width_at(visual_x: usize, tab_width: u16) -> usize {
  let tab_width = tab_width.max(1) as usize;
  tab_width - (visual_x % tab_width)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grapheme<'a> {
  Newline,
  Tab { width: usize },
  Other { g: &'a str },
}

impl<'a> Grapheme<'a> {
  pub fn new(g: &'a str, visual_x: usize, tab_width: u16) -> Grapheme<'a> {
    match g {
      "\t" => Grapheme::Tab {
        width: tab_width_at(visual_x, tab_width),
      },
      _ if g.chars().next().is_some_and(char_is_line_ending) => Grapheme::Newline,
      _ => Grapheme::Other { g },
    }
  }

  pub fn change_position(&mut self, visual_x: usize, tab_width: u16) {
    if let Grapheme::Tab { width } = self {
      *width = tab_width_at(visual_x, tab_width)
    }
  }

  /// Returns the visual width of this grapheme in cells.
  #[inline]
  pub fn width(&self) -> usize {
    match *self {
      Grapheme::Other { g } => grapheme_width(g),
      Grapheme::Tab { width } => width,
      Grapheme::Newline => 1,
    }
  }

  pub fn is_whitespace(&self) -> bool {
    !matches!(self, Grapheme::Other { g } if !g.chars().next().is_some_and(char_is_whitespace))
  }

  /// Whether a line may be broken right after this grapheme.
  ///
  /// Whitespace, dashes and wide (CJK) graphemes end a word, matching a
  /// browser text area with `word-wrap: break-word`. Brackets and other
  /// punctuation stay attached to the word that follows them.
  pub fn is_word_boundary(&self) -> bool {
    match self {
      Grapheme::Other { g } => {
        g.chars()
          .next()
          .is_some_and(|ch| char_is_whitespace(ch) || char_is_dash(ch))
          || grapheme_width(g) > 1
      },
      _ => true,
    }
  }
}

#[must_use]
pub fn grapheme_width(g: &str) -> usize {
  if g.is_ascii() {
    g.len()
  } else {
    // Zero width clusters (e.g. a lone ZWSP) still occupy a cell so the
    // caret never lands on top of the previous grapheme.
    UnicodeWidthStr::width(g).max(1)
  }
}

#[must_use]
pub fn nth_prev_grapheme_boundary(slice: RopeSlice, char_idx: usize, n: usize) -> usize {
  let char_idx = char_idx.min(slice.len_chars());

  let mut byte_idx = slice.char_to_byte(char_idx);
  let (mut chunk, mut chunk_byte_idx, mut chunk_char_idx, _) = slice.chunk_at_byte(byte_idx);
  let mut gc = GraphemeCursor::new(byte_idx, slice.len_bytes(), true);

  for _ in 0..n {
    loop {
      match gc.prev_boundary(chunk, chunk_byte_idx) {
        Ok(None) => return 0,
        Ok(Some(n)) => {
          byte_idx = n;
          break;
        },
        Err(GraphemeIncomplete::PrevChunk) => {
          let (a, b, c, _) = slice.chunk_at_byte(chunk_byte_idx - 1);
          chunk = a;
          chunk_byte_idx = b;
          chunk_char_idx = c;
        },
        Err(GraphemeIncomplete::PreContext(n)) => {
          let ctx_chunk = slice.chunk_at_byte(n - 1).0;
          gc.provide_context(ctx_chunk, n - ctx_chunk.len());
        },
        _ => unreachable!(),
      }
    }
  }
  chunk_char_idx + byte_to_char_idx(chunk, byte_idx - chunk_byte_idx)
}

/// Finds the grapheme boundary before the given char position.
#[must_use]
#[inline]
pub fn prev_grapheme_boundary(slice: RopeSlice, char_idx: usize) -> usize {
  nth_prev_grapheme_boundary(slice, char_idx, 1)
}
