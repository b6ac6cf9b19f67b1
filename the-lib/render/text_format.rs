use serde::{
  Deserialize,
  Serialize,
};

/// Wrapping rules of a text surface, measured in monospace cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TextFormat {
  pub soft_wrap:      bool,
  pub tab_width:      u16,
  /// Width of a visual line in cells. Only used when `soft_wrap` is set.
  pub viewport_width: u16,
}

// Matches a plain text area: wrapped, tab stops every 8 cells.
impl Default for TextFormat {
  fn default() -> Self {
    TextFormat {
      soft_wrap:      true,
      tab_width:      8,
      viewport_width: 80,
    }
  }
}

impl TextFormat {
  pub fn unwrapped() -> Self {
    TextFormat {
      soft_wrap: false,
      ..Self::default()
    }
  }

  pub fn wrapped_at(viewport_width: u16) -> Self {
    TextFormat {
      viewport_width,
      ..Self::default()
    }
  }
}
