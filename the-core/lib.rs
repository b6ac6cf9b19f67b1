//! Character and grapheme primitives shared by the template editor crates.

pub mod chars;
pub mod grapheme;
