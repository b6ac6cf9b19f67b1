//! Input event types for the editor surface.
//!
//! Only the keys the suggestion menu reacts to have their own variant. Hosts
//! map everything else to [`Key::Char`] or [`Key::Other`], and the editor
//! hands it back as [`KeyOutcome::Continue`].

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
  Char(char),
  Enter,
  NumpadEnter,
  Up,
  Down,
  Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
  pub key: Key,
}

impl KeyEvent {
  #[must_use]
  pub const fn new(key: Key) -> Self {
    Self { key }
  }
}

impl From<Key> for KeyEvent {
  fn from(key: Key) -> Self {
    Self::new(key)
  }
}

/// What the host should do with a key after the editor has seen it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyOutcome {
  /// Not consumed; let the text surface apply its default behavior.
  #[default]
  Continue,
  /// Consumed; suppress the default behavior.
  Handled,
}

impl KeyOutcome {
  #[must_use]
  pub const fn handled(self) -> bool {
    matches!(self, Self::Handled)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
  Left,
  Middle,
  Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerKind {
  Down(PointerButton),
  Up(PointerButton),
  Move,
}

/// A pointer event in the same pixel space as the popup rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
  pub kind: PointerKind,
  pub x:    f32,
  pub y:    f32,
}

impl PointerEvent {
  #[must_use]
  pub const fn new(kind: PointerKind, x: f32, y: f32) -> Self {
    Self { kind, x, y }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerEventOutcome {
  #[default]
  Continue,
  /// Consumed; the host must suppress the default action (focus loss).
  Handled,
}

impl PointerEventOutcome {
  #[must_use]
  pub const fn handled(self) -> bool {
    matches!(self, Self::Handled)
  }

  #[must_use]
  pub const fn from_handled(handled: bool) -> Self {
    if handled { Self::Handled } else { Self::Continue }
  }
}
