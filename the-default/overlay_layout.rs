use the_lib::render::Anchor;

/// A rectangle in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlayRect {
  pub x:      f32,
  pub y:      f32,
  pub width:  f32,
  pub height: f32,
}

impl OverlayRect {
  pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  pub fn right(&self) -> f32 {
    self.x + self.width
  }

  pub fn bottom(&self) -> f32 {
    self.y + self.height
  }

  pub fn contains(&self, x: f32, y: f32) -> bool {
    x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
  }

  /// Replaces non-finite coordinates with `0.0` and negative or non-finite
  /// sizes with an empty extent.
  #[must_use]
  pub fn normalized(self) -> Self {
    Self {
      x:      finite_or(self.x, 0.0),
      y:      finite_or(self.y, 0.0),
      width:  finite_or(self.width, 0.0).max(0.0),
      height: finite_or(self.height, 0.0).max(0.0),
    }
  }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
  if value.is_finite() { value } else { fallback }
}

/// Places the suggestion popup for a caret at `anchor`.
///
/// The popup starts one line below the caret and is left aligned with it.
/// When there is not enough room below it flips above the caret line, and if
/// neither side fits it takes the larger one and shrinks. The result always
/// lies within `area`, which is [normalized](OverlayRect::normalized) first.
pub fn suggestion_popup_rect(
  area: OverlayRect,
  popup_width: f32,
  popup_height: f32,
  anchor: Anchor,
  line_height: f32,
) -> OverlayRect {
  let area = area.normalized();
  let width = finite_or(popup_width, 0.0).min(area.width).max(0.0);
  let desired_height = finite_or(popup_height, 0.0).min(area.height).max(0.0);
  let line_height = finite_or(line_height, 0.0).max(0.0);

  let max_x = (area.right() - width).max(area.x);
  let x = finite_or(anchor.x, area.x).clamp(area.x, max_x);

  let caret_top = finite_or(anchor.y, area.y).clamp(area.y, area.bottom());
  let below_start = (caret_top + line_height).min(area.bottom());
  let below_space = area.bottom() - below_start;
  let above_space = caret_top - area.y;
  let place_below = if below_space >= desired_height {
    true
  } else if above_space >= desired_height {
    false
  } else {
    below_space >= above_space
  };

  if place_below {
    OverlayRect::new(x, below_start, width, desired_height.min(below_space))
  } else {
    let height = desired_height.min(above_space);
    OverlayRect::new(x, caret_top - height, width, height)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const AREA: OverlayRect = OverlayRect::new(0.0, 0.0, 400.0, 300.0);

  #[test]
  fn popup_sits_one_line_below_the_caret() {
    let rect = suggestion_popup_rect(AREA, 200.0, 120.0, Anchor::new(40.0, 30.0), 20.0);
    assert_eq!(rect, OverlayRect::new(40.0, 50.0, 200.0, 120.0));
  }

  #[test]
  fn popup_flips_above_when_below_is_too_small() {
    let rect = suggestion_popup_rect(AREA, 200.0, 120.0, Anchor::new(40.0, 250.0), 20.0);
    assert_eq!(rect, OverlayRect::new(40.0, 130.0, 200.0, 120.0));
  }

  #[test]
  fn popup_is_clamped_horizontally() {
    let rect = suggestion_popup_rect(AREA, 200.0, 50.0, Anchor::new(350.0, 0.0), 20.0);
    assert_eq!(rect.x, 200.0);
    let rect = suggestion_popup_rect(AREA, 200.0, 50.0, Anchor::new(-30.0, 0.0), 20.0);
    assert_eq!(rect.x, 0.0);
  }

  #[test]
  fn popup_shrinks_to_the_larger_side() {
    let area = OverlayRect::new(0.0, 0.0, 400.0, 100.0);
    let rect = suggestion_popup_rect(area, 100.0, 90.0, Anchor::new(0.0, 30.0), 20.0);
    assert_eq!(rect, OverlayRect::new(0.0, 50.0, 100.0, 50.0));
    assert!(rect.bottom() <= area.bottom());
  }

  #[test]
  fn degenerate_areas_collapse_instead_of_panicking() {
    let anchor = Anchor::new(40.0, 30.0);
    let negative = OverlayRect::new(0.0, 0.0, 400.0, -10.0);
    assert_eq!(
      suggestion_popup_rect(negative, 200.0, 120.0, anchor, 20.0),
      OverlayRect::new(40.0, 0.0, 200.0, 0.0)
    );

    let nan = OverlayRect::new(f32::NAN, 0.0, f32::NAN, f32::NAN);
    let rect = suggestion_popup_rect(nan, 200.0, 120.0, anchor, f32::NAN);
    assert_eq!(rect, OverlayRect::new(0.0, 0.0, 0.0, 0.0));

    let rect = suggestion_popup_rect(AREA, 200.0, 120.0, Anchor::new(f32::NAN, f32::INFINITY), 20.0);
    assert_eq!(rect, OverlayRect::new(0.0, 20.0, 200.0, 120.0));
  }

  #[test]
  fn contains_is_half_open() {
    let rect = OverlayRect::new(10.0, 10.0, 20.0, 20.0);
    assert!(rect.contains(10.0, 10.0));
    assert!(rect.contains(29.9, 29.9));
    assert!(!rect.contains(30.0, 15.0));
    assert!(!rect.contains(15.0, 9.0));
  }
}
