//! Cell coordinates on the 9×9 grid.

use std::fmt::{self, Display};

/// A cell position on the 9×9 grid, identified by row and column (0-8).
///
/// # Examples
///
/// ```
/// use solvoku_core::Position;
///
/// let pos = Position::new(4, 7);
/// assert_eq!(pos.row(), 4);
/// assert_eq!(pos.col(), 7);
/// assert_eq!(pos.index(), 4 * 9 + 7);
///
/// // The origin of the containing 3×3 box
/// assert_eq!(pos.box_origin(), Position::new(3, 6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Array containing all 81 positions in row-major order.
    ///
    /// This order defines the solver's cell scan order.
    pub const ALL: [Self; 81] = {
        let mut all = [Self { row: 0, col: 0 }; 81];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 81 {
            all[i] = Self {
                row: (i / 9) as u8,
                col: (i % 9) as u8,
            };
            i += 1;
        }
        all
    };

    /// Creates a position from row and column coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not in the range 0-8.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < 9 && col < 9, "position out of range");
        Self { row, col }
    }

    /// Returns the row coordinate (0-8).
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column coordinate (0-8).
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the row-major index of this position (0-80).
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * 9 + self.col as usize
    }

    /// Returns the top-left position of the 3×3 box containing this cell.
    #[must_use]
    pub const fn box_origin(self) -> Self {
        Self {
            row: self.row - self.row % 3,
            col: self.col - self.col % 3,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}C{}", self.row + 1, self.col + 1)
    }
}
