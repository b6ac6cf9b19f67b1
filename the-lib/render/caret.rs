//! Caret measurement.
//!
//! A [`CaretLocator`] turns a caret char index into a pixel point inside a
//! text surface, relative to the surface's visible origin. The editor uses
//! it to anchor the suggestion popup.

use serde::{
  Deserialize,
  Serialize,
};

use crate::{
  position::Position,
  render::{
    text_format::TextFormat,
    visual_position::visual_pos_at_char,
  },
};

/// One-cell marker appended after the text when measuring the caret.
pub const CARET_MARKER: char = '|';

/// A point in pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
  pub x: f32,
  pub y: f32,
}

impl Anchor {
  pub const ORIGIN: Anchor = Anchor { x: 0.0, y: 0.0 };

  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }
}

/// Static geometry of a monospace text surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SurfaceMetrics {
  pub cell_width:   f32,
  pub line_height:  f32,
  pub padding_left: f32,
  pub padding_top:  f32,
  #[serde(flatten)]
  pub text_fmt:     TextFormat,
}

impl Default for SurfaceMetrics {
  fn default() -> Self {
    Self {
      cell_width:   8.0,
      line_height:  20.0,
      padding_left: 8.0,
      padding_top:  8.0,
      text_fmt:     TextFormat::default(),
    }
  }
}

impl SurfaceMetrics {
  /// Whether positions can be converted to pixels at all.
  pub fn is_measurable(&self) -> bool {
    let positive = |v: f32| v.is_finite() && v > 0.0;
    positive(self.cell_width)
      && positive(self.line_height)
      && self.padding_left.is_finite()
      && self.padding_top.is_finite()
  }

  /// Top-left pixel of the cell at `pos`, ignoring scroll.
  pub fn cell_origin(&self, pos: Position) -> Anchor {
    Anchor {
      x: self.padding_left + pos.col as f32 * self.cell_width,
      y: self.padding_top + pos.row as f32 * self.line_height,
    }
  }
}

/// Geometry plus the current scroll offset of a text surface.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SurfaceState {
  pub metrics: SurfaceMetrics,
  pub scroll:  Anchor,
}

impl SurfaceState {
  pub fn new(metrics: SurfaceMetrics) -> Self {
    Self {
      metrics,
      scroll: Anchor::ORIGIN,
    }
  }

  pub fn with_scroll(mut self, scroll: Anchor) -> Self {
    self.scroll = scroll;
    self
  }
}

pub trait CaretLocator {
  /// Pixel position of the caret at char index `caret` within `text`.
  ///
  /// Returns `None` when the surface cannot be measured.
  fn locate(&self, text: &str, surface: &SurfaceState, caret: usize) -> Option<Anchor>;
}

impl<T: CaretLocator + ?Sized> CaretLocator for &T {
  fn locate(&self, text: &str, surface: &SurfaceState, caret: usize) -> Option<Anchor> {
    (**self).locate(text, surface, caret)
  }
}

/// Measures the caret by laying out a scratch copy of the text before the
/// caret followed by [`CARET_MARKER`], with the wrapping rules of the surface.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceLocator;

impl CaretLocator for MonospaceLocator {
  fn locate(&self, text: &str, surface: &SurfaceState, caret: usize) -> Option<Anchor> {
    let metrics = &surface.metrics;
    if !metrics.is_measurable() {
      tracing::trace!(?metrics, "surface cannot be measured");
      return None;
    }

    let (caret, end) = text
      .char_indices()
      .enumerate()
      .nth(caret)
      .map_or_else(|| (text.chars().count(), text.len()), |(idx, (offset, _))| (idx, offset));
    let mut scratch = String::with_capacity(end + CARET_MARKER.len_utf8());
    scratch.push_str(&text[..end]);
    scratch.push(CARET_MARKER);

    let marker = visual_pos_at_char(&scratch, &metrics.text_fmt, caret);
    let cell = metrics.cell_origin(marker);
    Some(Anchor {
      x: cell.x - surface.scroll.x,
      y: cell.y - surface.scroll.y,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn surface(text_fmt: TextFormat) -> SurfaceState {
    SurfaceState::new(SurfaceMetrics {
      cell_width: 8.0,
      line_height: 20.0,
      padding_left: 4.0,
      padding_top: 6.0,
      text_fmt,
    })
  }

  #[test]
  fn empty_text_sits_at_the_padding() {
    let anchor = MonospaceLocator.locate("", &surface(TextFormat::default()), 0);
    assert_eq!(anchor, Some(Anchor::new(4.0, 6.0)));
  }

  #[test]
  fn caret_after_line_break() {
    let surface = surface(TextFormat::default());
    assert_eq!(
      MonospaceLocator.locate("ab\ncd", &surface, 4),
      Some(Anchor::new(12.0, 26.0))
    );
    assert_eq!(
      MonospaceLocator.locate("ab\n", &surface, 3),
      Some(Anchor::new(4.0, 26.0))
    );
  }

  #[test]
  fn text_after_the_caret_is_ignored() {
    let surface = surface(TextFormat::wrapped_at(10));
    let short = MonospaceLocator.locate("hi {zo", &surface, 6);
    let long = MonospaceLocator.locate("hi {zo and a very long tail", &surface, 6);
    assert_eq!(short, long);
    assert_eq!(short, Some(Anchor::new(4.0 + 6.0 * 8.0, 6.0)));
  }

  #[test]
  fn marker_wraps_with_the_word_it_ends() {
    let surface = surface(TextFormat::wrapped_at(11));
    assert_eq!(
      MonospaceLocator.locate("hello world", &surface, 11),
      Some(Anchor::new(4.0 + 5.0 * 8.0, 26.0))
    );
  }

  #[test]
  fn partial_token_near_the_line_end_wraps_whole() {
    let surface = surface(TextFormat::wrapped_at(10));
    assert_eq!(
      MonospaceLocator.locate("abcdefgh {zo", &surface, 12),
      Some(Anchor::new(4.0 + 3.0 * 8.0, 26.0))
    );
  }

  #[test]
  fn scroll_is_subtracted() {
    let surface = surface(TextFormat::default()).with_scroll(Anchor::new(2.0, 20.0));
    assert_eq!(
      MonospaceLocator.locate("a\nb\nc", &surface, 5),
      Some(Anchor::new(10.0, 26.0))
    );
  }

  #[test]
  fn caret_past_the_end_is_clamped() {
    let surface = surface(TextFormat::default());
    assert_eq!(
      MonospaceLocator.locate("abc", &surface, 100),
      MonospaceLocator.locate("abc", &surface, 3)
    );
  }

  #[test]
  fn unmeasurable_surface_yields_none() {
    let mut surface = surface(TextFormat::default());
    surface.metrics.cell_width = 0.0;
    assert_eq!(MonospaceLocator.locate("abc", &surface, 1), None);
    surface.metrics.cell_width = f32::NAN;
    assert_eq!(MonospaceLocator.locate("abc", &surface, 1), None);
  }
}
