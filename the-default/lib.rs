//! Editor behavior on top of `the-lib`: the placeholder-aware editor state
//! machine, its suggestion menu and popup placement.
//!
//! Rendering is left to the host, which reads [`SuggestionMenuState`] and
//! [`PlaceholderEditor::popup_rect`] to draw the popup.

mod input;
mod overlay_layout;
mod placeholder_editor;
mod suggestion_menu;

pub use input::{
  Key,
  KeyEvent,
  KeyOutcome,
  PointerButton,
  PointerEvent,
  PointerEventOutcome,
  PointerKind,
};
pub use overlay_layout::{
  OverlayRect,
  suggestion_popup_rect,
};
pub use placeholder_editor::{
  ChangeCallback,
  EditorMode,
  PlaceholderEditor,
};
pub use suggestion_menu::{
  MAX_VISIBLE_ITEMS,
  SuggestionItem,
  SuggestionMenuState,
};
