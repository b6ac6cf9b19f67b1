//! Core of the template editor: placeholder suggestions, caret measurement
//! and template substitution.

pub mod event;
pub mod placeholder;
pub mod position;
pub mod render;
pub mod substitution;
pub mod suggestion;
pub mod template;
