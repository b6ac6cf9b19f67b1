//! A plain text editor that offers placeholder completions while typing.
//!
//! The editor owns the buffer, the caret and the suggestion menu. Whenever the
//! text changes it looks at the run of non-whitespace characters before the
//! caret; if that starts with `{` and completes at least one catalog token the
//! editor is `Suggesting`, otherwise it is `Idle`.
//!
//! While suggesting, Up and Down move the highlight (wrapping around) and
//! Enter inserts the highlighted token. A pointer press on a row inserts that
//! row directly.

use std::fmt;

use ropey::Rope;
use the_core::grapheme::prev_grapheme_boundary;
use the_lib::{
  placeholder::PlaceholderCatalog,
  render::{
    Anchor,
    CaretLocator,
    MonospaceLocator,
    SurfaceMetrics,
    SurfaceState,
  },
  suggestion::{
    InsertStrategy,
    Insertion,
    filter_suggestions,
    insert_suggestion,
    partial_token,
  },
};
use the_loader::config::Config;

use crate::{
  input::{
    Key,
    KeyEvent,
    KeyOutcome,
    PointerButton,
    PointerEvent,
    PointerEventOutcome,
    PointerKind,
  },
  overlay_layout::{
    OverlayRect,
    suggestion_popup_rect,
  },
  suggestion_menu::{
    SuggestionItem,
    SuggestionMenuState,
  },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorMode {
  Idle,
  Suggesting,
}

pub type ChangeCallback = Box<dyn FnMut(&str)>;

pub struct PlaceholderEditor<L = MonospaceLocator> {
  text:      Rope,
  /// Char index into `text`.
  caret:     usize,
  catalog:   PlaceholderCatalog,
  strategy:  InsertStrategy,
  locator:   L,
  surface:   Option<SurfaceState>,
  menu:      SuggestionMenuState,
  anchor:    Anchor,
  on_change: Option<ChangeCallback>,
}

impl PlaceholderEditor<MonospaceLocator> {
  pub fn new(catalog: PlaceholderCatalog) -> Self {
    Self::with_locator(catalog, MonospaceLocator)
  }

  /// An editor using the catalog, insert strategy and surface metrics of
  /// `config`.
  pub fn from_config(config: &Config) -> eyre::Result<Self> {
    Ok(
      Self::new(config.catalog()?)
        .with_insert_strategy(config.insert_strategy())
        .with_surface(config.surface()),
    )
  }
}

impl<L: CaretLocator> PlaceholderEditor<L> {
  pub fn with_locator(catalog: PlaceholderCatalog, locator: L) -> Self {
    Self {
      text: Rope::new(),
      caret: 0,
      catalog,
      strategy: InsertStrategy::default(),
      locator,
      surface: None,
      menu: SuggestionMenuState::default(),
      anchor: Anchor::ORIGIN,
      on_change: None,
    }
  }

  /// Seeds the buffer and puts the caret at its end. Does not notify.
  pub fn with_text(mut self, text: &str) -> Self {
    self.text = Rope::from_str(text);
    self.caret = self.text.len_chars();
    self
  }

  pub fn with_insert_strategy(mut self, strategy: InsertStrategy) -> Self {
    self.strategy = strategy;
    self
  }

  pub fn with_surface(mut self, surface: SurfaceState) -> Self {
    self.surface = Some(surface);
    self
  }

  pub fn on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
    self.on_change = Some(Box::new(callback));
    self
  }

  pub fn text(&self) -> String {
    self.text.to_string()
  }

  pub fn rope(&self) -> &Rope {
    &self.text
  }

  pub fn caret(&self) -> usize {
    self.caret
  }

  pub fn catalog(&self) -> &PlaceholderCatalog {
    &self.catalog
  }

  pub fn insert_strategy(&self) -> InsertStrategy {
    self.strategy
  }

  pub fn mode(&self) -> EditorMode {
    if self.menu.active {
      EditorMode::Suggesting
    } else {
      EditorMode::Idle
    }
  }

  pub fn menu(&self) -> &SuggestionMenuState {
    &self.menu
  }

  /// Where the popup is anchored, relative to the surface's visible origin.
  pub fn anchor(&self) -> Anchor {
    self.anchor
  }

  pub fn surface(&self) -> Option<&SurfaceState> {
    self.surface.as_ref()
  }

  /// Attaches or detaches the measured surface. Without one the popup is
  /// anchored at the origin.
  pub fn set_surface(&mut self, surface: Option<SurfaceState>) {
    self.surface = surface;
    self.relocate();
  }

  /// Updates the scroll offset of the attached surface.
  pub fn set_scroll(&mut self, scroll: Anchor) {
    if let Some(surface) = &mut self.surface {
      surface.scroll = scroll;
      self.relocate();
    }
  }

  /// Replaces the whole buffer, as reported by a host text surface after an
  /// edit, together with the caret after that edit.
  pub fn handle_input(&mut self, text: &str, caret: usize) {
    self.text = Rope::from_str(text);
    self.caret = caret.min(self.text.len_chars());
    self.text_changed();
  }

  pub fn insert_text(&mut self, text: &str) {
    if text.is_empty() {
      return;
    }
    self.text.insert(self.caret, text);
    self.caret += text.chars().count();
    self.text_changed();
  }

  /// Deletes the grapheme before the caret.
  pub fn delete_char_backward(&mut self) {
    if self.caret == 0 {
      return;
    }
    let start = prev_grapheme_boundary(self.text.slice(..), self.caret);
    self.text.remove(start..self.caret);
    self.caret = start;
    self.text_changed();
  }

  /// Moves the caret without editing. An open menu follows the caret and
  /// closes when the token under it no longer qualifies; a closed menu stays
  /// closed.
  pub fn set_caret(&mut self, caret: usize) {
    self.caret = caret.min(self.text.len_chars());
    if self.mode() == EditorMode::Suggesting {
      let text = self.text.to_string();
      self.refresh_suggestions(&text, false);
    }
  }

  pub fn handle_key(&mut self, event: KeyEvent) -> KeyOutcome {
    if self.mode() != EditorMode::Suggesting {
      return KeyOutcome::Continue;
    }

    match event.key {
      Key::Down => {
        self.menu.next();
        KeyOutcome::Handled
      },
      Key::Up => {
        self.menu.prev();
        KeyOutcome::Handled
      },
      Key::Enter | Key::NumpadEnter => {
        // Swallowed even without a highlight so no newline is typed into a
        // half-written token.
        if let Some(index) = self.menu.highlighted {
          self.accept(index);
        }
        KeyOutcome::Handled
      },
      _ => KeyOutcome::Continue,
    }
  }

  /// Inserts the suggestion at `index`, regardless of the highlight.
  pub fn select_suggestion(&mut self, index: usize) -> PointerEventOutcome {
    if self.mode() != EditorMode::Suggesting {
      return PointerEventOutcome::Continue;
    }
    PointerEventOutcome::from_handled(self.accept(index))
  }

  /// Handles a pointer event over a popup laid out at `popup` with rows of
  /// `row_height` pixels.
  pub fn handle_pointer(
    &mut self,
    event: PointerEvent,
    popup: OverlayRect,
    row_height: f32,
  ) -> PointerEventOutcome {
    if self.mode() != EditorMode::Suggesting
      || event.kind != PointerKind::Down(PointerButton::Left)
      || !popup.contains(event.x, event.y)
      || !(row_height > 0.0)
    {
      return PointerEventOutcome::Continue;
    }

    let row = ((event.y - popup.y) / row_height) as usize;
    match self.menu.item_at_row(row) {
      Some(index) => self.select_suggestion(index),
      // Padding below the last row still belongs to the popup.
      None => PointerEventOutcome::Handled,
    }
  }

  /// Popup rect of `width` x `height` pixels inside `area`, or `None` while
  /// idle.
  pub fn popup_rect(&self, area: OverlayRect, width: f32, height: f32) -> Option<OverlayRect> {
    if self.mode() != EditorMode::Suggesting {
      return None;
    }
    let line_height = self
      .surface
      .map_or(SurfaceMetrics::default().line_height, |surface| {
        surface.metrics.line_height
      });
    Some(suggestion_popup_rect(area, width, height, self.anchor, line_height))
  }

  /// Notifies `on_change` and refreshes the menu from one snapshot of the
  /// buffer.
  fn text_changed(&mut self) {
    let text = self.text.to_string();
    if let Some(on_change) = &mut self.on_change {
      on_change(&text);
    }
    self.refresh_suggestions(&text, true);
  }

  /// Re-filters the catalog for the token before the caret. `text` must be
  /// the current buffer contents.
  ///
  /// After an edit the menu restarts without a highlight. After a plain caret
  /// move the highlight survives if the items did not change.
  fn refresh_suggestions(&mut self, text: &str, edited: bool) {
    let partial = partial_token(text, self.caret);
    let items: Vec<SuggestionItem> = filter_suggestions(&self.catalog, partial)
      .into_iter()
      .map(SuggestionItem::from)
      .collect();

    if items.is_empty() {
      if self.menu.active {
        tracing::trace!(partial, "closing suggestions");
      }
      self.menu.clear();
      return;
    }

    if edited || items != self.menu.items {
      tracing::trace!(partial, count = items.len(), "showing suggestions");
      self.menu.set_items(items);
    }
    self.anchor = self.locate(text);
  }

  fn relocate(&mut self) {
    if self.mode() == EditorMode::Suggesting {
      let text = self.text.to_string();
      self.anchor = self.locate(&text);
    }
  }

  fn locate(&self, text: &str) -> Anchor {
    let Some(surface) = &self.surface else {
      return Anchor::ORIGIN;
    };
    self
      .locator
      .locate(text, surface, self.caret)
      .unwrap_or_else(|| {
        tracing::debug!(caret = self.caret, "caret could not be located");
        Anchor::ORIGIN
      })
  }

  /// Replaces the partial token with the item at `index` and closes the menu.
  fn accept(&mut self, index: usize) -> bool {
    let Some(item) = self.menu.items.get(index) else {
      return false;
    };
    let token = item.token.clone();
    let current = self.text.to_string();
    let Insertion { text, caret } = insert_suggestion(&current, self.caret, &token, self.strategy);
    self.text = Rope::from_str(&text);
    self.caret = caret;
    self.menu.clear();
    tracing::debug!(%token, caret, "inserted suggestion");

    if let Some(on_change) = &mut self.on_change {
      on_change(&text);
    }
    true
  }
}

impl<L: fmt::Debug> fmt::Debug for PlaceholderEditor<L> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PlaceholderEditor")
      .field("text", &self.text)
      .field("caret", &self.caret)
      .field("strategy", &self.strategy)
      .field("locator", &self.locator)
      .field("surface", &self.surface)
      .field("menu", &self.menu)
      .field("anchor", &self.anchor)
      .finish_non_exhaustive()
  }
}
