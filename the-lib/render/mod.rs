//! Text layout and caret measurement.
//!
//! Everything here works on a monospace grid: text is laid out into rows and
//! cells first, and only [`caret`] converts cells into pixels.

pub mod caret;
pub mod grapheme;
pub mod layout;
pub mod text_format;
pub mod visual_position;

pub use caret::{
  Anchor,
  CaretLocator,
  MonospaceLocator,
  SurfaceMetrics,
  SurfaceState,
};
pub use grapheme::FormattedGrapheme;
pub use layout::TextLayout;
pub use text_format::TextFormat;
pub use visual_position::visual_pos_at_char;
