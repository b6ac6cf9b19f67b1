/// A point on the visual grid, counted in rows and cells.
/// 0-indexed as all things should be.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
  pub row: usize,
  pub col: usize,
}

impl Position {
  pub const fn new(row: usize, col: usize) -> Self {
    Self { row, col }
  }

  pub const fn zero() -> Self {
    Self { row: 0, col: 0 }
  }

  /// Moves to the start of the next row.
  pub fn next_row(&mut self) {
    self.row += 1;
    self.col = 0;
  }
}
