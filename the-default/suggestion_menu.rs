use the_lib::placeholder::Placeholder;

/// Rows shown at once; the list scrolls to keep the highlight in view.
pub const MAX_VISIBLE_ITEMS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionItem {
  pub token:       String,
  pub description: String,
}

impl SuggestionItem {
  pub fn new(token: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      token:       token.into(),
      description: description.into(),
    }
  }

  /// Row text, e.g. `{zoomUrl} - Zoom URL`.
  pub fn label(&self) -> String {
    format!("{} - {}", self.token, self.description)
  }
}

impl From<&Placeholder> for SuggestionItem {
  fn from(placeholder: &Placeholder) -> Self {
    Self::new(placeholder.token(), placeholder.description())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionMenuState {
  pub active:      bool,
  pub items:       Vec<SuggestionItem>,
  pub highlighted: Option<usize>,
  pub scroll:      usize,
}

impl SuggestionMenuState {
  pub fn clear(&mut self) {
    self.active = false;
    self.items.clear();
    self.highlighted = None;
    self.scroll = 0;
  }

  /// Replaces the items. The menu opens without a highlight, or closes if
  /// `items` is empty.
  pub fn set_items(&mut self, items: Vec<SuggestionItem>) {
    self.items = items;
    self.active = !self.items.is_empty();
    self.highlighted = None;
    self.scroll = 0;
  }

  pub fn highlighted_item(&self) -> Option<&SuggestionItem> {
    self.items.get(self.highlighted?)
  }

  /// Moves the highlight down, wrapping from the last row to the first.
  pub fn next(&mut self) -> Option<usize> {
    if !self.active || self.items.is_empty() {
      return None;
    }
    let next = match self.highlighted {
      Some(current) if current + 1 < self.items.len() => current + 1,
      _ => 0,
    };
    self.highlighted = Some(next);
    self.clamp();
    self.highlighted
  }

  /// Moves the highlight up, wrapping from the first row to the last.
  pub fn prev(&mut self) -> Option<usize> {
    if !self.active || self.items.is_empty() {
      return None;
    }
    let prev = match self.highlighted {
      Some(current) if current > 0 => current - 1,
      _ => self.items.len() - 1,
    };
    self.highlighted = Some(prev);
    self.clamp();
    self.highlighted
  }

  /// Rows currently in view with their item index.
  pub fn visible_rows(&self) -> impl Iterator<Item = (usize, &SuggestionItem)> {
    self
      .items
      .iter()
      .enumerate()
      .skip(self.scroll)
      .take(MAX_VISIBLE_ITEMS)
  }

  /// Item index of the `row`-th visible row.
  pub fn item_at_row(&self, row: usize) -> Option<usize> {
    let index = self.scroll + row;
    (row < MAX_VISIBLE_ITEMS && index < self.items.len()).then_some(index)
  }

  fn clamp(&mut self) {
    if self.items.is_empty() {
      self.clear();
      return;
    }

    if let Some(highlighted) = self.highlighted {
      let highlighted = highlighted.min(self.items.len() - 1);
      self.highlighted = Some(highlighted);

      if highlighted < self.scroll {
        self.scroll = highlighted;
      } else {
        let visible_end = self
          .scroll
          .saturating_add(MAX_VISIBLE_ITEMS)
          .saturating_sub(1);
        if highlighted > visible_end {
          self.scroll = highlighted + 1 - MAX_VISIBLE_ITEMS;
        }
      }
    }

    let max_scroll = self.items.len().saturating_sub(MAX_VISIBLE_ITEMS);
    self.scroll = self.scroll.min(max_scroll);
  }
}
