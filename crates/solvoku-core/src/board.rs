//! The 9×9 board with a parallel given-cell mask.

use std::{
    fmt::{self, Display, Write as _},
    str::FromStr,
};

use crate::{Digit, Position};

/// The canonical example puzzle (medium difficulty, unique solution).
///
/// Row-major, `0` = empty.
const EXAMPLE: [[u8; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// An error from a board mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// The input value is outside the accepted range 0-9.
    #[display("invalid digit value {value} (expected 0-9)")]
    InvalidDigit {
        /// The rejected value.
        value: u8,
    },
}

/// An error from parsing a board from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    /// A character was neither a digit, an empty-cell marker, nor whitespace.
    #[display("invalid board character {character:?}")]
    InvalidCharacter {
        /// The rejected character.
        character: char,
    },
    /// The text did not contain exactly 81 cells.
    #[display("expected 81 cells, found {found}")]
    WrongCellCount {
        /// The number of cells found.
        found: usize,
    },
}

/// A 9×9 sudoku board with a given-cell mask.
///
/// Each cell holds `Option<Digit>` (`None` = empty). A parallel boolean mask
/// records which cells are *givens*: clues supplied through [`Board::set`]
/// rather than filled in by the solver through [`Board::fill`]. The mask is
/// presentation metadata; it never affects solving.
///
/// The 9×9 shape is fixed by construction, and `Clone` produces an
/// independent deep copy, so the solver can mutate a clone without aliasing
/// the caller's board.
///
/// # Examples
///
/// ```
/// use solvoku_core::{Board, Digit, Position};
///
/// let mut board = Board::new();
/// board.set(Position::new(2, 3), 9)?;
/// assert!(board.is_given(Position::new(2, 3)));
///
/// // Setting 0 clears the cell and its given flag
/// board.set(Position::new(2, 3), 0)?;
/// assert_eq!(board.digit(Position::new(2, 3)), None);
/// assert!(!board.is_given(Position::new(2, 3)));
///
/// // Out-of-range input is rejected without touching the board
/// assert!(board.set(Position::new(0, 0), 12).is_err());
/// # Ok::<(), solvoku_core::BoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Digit>; 81],
    givens: [bool; 81],
}

impl Board {
    /// Creates an empty board with no givens.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [None; 81],
            givens: [false; 81],
        }
    }

    /// Creates a board loaded with the canonical example puzzle.
    ///
    /// All 30 clue cells are marked as givens. The puzzle has a unique
    /// solution whose first row is `5 3 4 6 7 8 9 1 2`.
    #[must_use]
    pub fn example() -> Self {
        let mut board = Self::new();
        for pos in Position::ALL {
            let value = EXAMPLE[pos.row() as usize][pos.col() as usize];
            if let Some(digit) = Digit::new(value) {
                board.cells[pos.index()] = Some(digit);
                board.givens[pos.index()] = true;
            }
        }
        board
    }

    /// Returns the digit at `pos`, or `None` if the cell is empty.
    #[must_use]
    pub const fn digit(&self, pos: Position) -> Option<Digit> {
        self.cells[pos.index()]
    }

    /// Returns `true` if the cell at `pos` holds a user-supplied given.
    #[must_use]
    pub const fn is_given(&self, pos: Position) -> bool {
        self.givens[pos.index()]
    }

    /// Sets a cell from raw user input.
    ///
    /// `1..=9` places the digit and marks the cell as a given; `0` clears
    /// the cell and its given flag.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidDigit`] for values above 9. The board
    /// is left unchanged.
    pub fn set(&mut self, pos: Position, value: u8) -> Result<(), BoardError> {
        if value == 0 {
            self.cells[pos.index()] = None;
            self.givens[pos.index()] = false;
            return Ok(());
        }
        let digit = Digit::new(value).ok_or(BoardError::InvalidDigit { value })?;
        self.cells[pos.index()] = Some(digit);
        self.givens[pos.index()] = true;
        Ok(())
    }

    /// Places a solver-filled digit without marking the cell as a given.
    pub const fn fill(&mut self, pos: Position, digit: Digit) {
        self.cells[pos.index()] = Some(digit);
    }

    /// Empties a cell without touching its given flag.
    ///
    /// Used by the solver to undo a [`fill`](Self::fill) while backtracking.
    pub const fn erase(&mut self, pos: Position) {
        self.cells[pos.index()] = None;
    }

    /// Resets every cell to empty and every given flag to false.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns `true` if every cell holds a digit.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns the number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses a board from grid text.
    ///
    /// Cells are read in row-major order: `1`-`9` are digits (marked as
    /// givens), while `_`, `.`, and `0` are empty cells. All whitespace is
    /// ignored, so rows and 3×3 groups may be laid out freely:
    ///
    /// ```
    /// use solvoku_core::Board;
    ///
    /// let board: Board = "
    ///     53_ _7_ ___
    ///     6__ 195 ___
    ///     _98 ___ _6_
    ///     8__ _6_ __3
    ///     4__ 8_3 __1
    ///     7__ _2_ __6
    ///     _6_ ___ 28_
    ///     ___ 419 __5
    ///     ___ _8_ _79
    /// "
    /// .parse()?;
    /// assert_eq!(board.empty_count(), 51);
    /// # Ok::<(), solvoku_core::ParseBoardError>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Self::new();
        let mut count = 0;
        for character in s.chars() {
            if character.is_whitespace() {
                continue;
            }
            let cell = match character {
                '_' | '.' | '0' => None,
                '1'..='9' => Digit::new(character as u8 - b'0'),
                _ => return Err(ParseBoardError::InvalidCharacter { character }),
            };
            if count < 81 {
                if let Some(digit) = cell {
                    let pos = Position::ALL[count];
                    board.cells[pos.index()] = Some(digit);
                    board.givens[pos.index()] = true;
                }
            }
            count += 1;
        }
        if count != 81 {
            return Err(ParseBoardError::WrongCellCount { found: count });
        }
        Ok(board)
    }
}

impl Display for Board {
    /// Formats the board as nine rows of `53_ _7_ ___` style grid text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..9 {
            for col in 0..9 {
                if col > 0 && col % 3 == 0 {
                    f.write_char(' ')?;
                }
                match self.digit(Position::new(row, col)) {
                    Some(digit) => write!(f, "{digit}")?,
                    None => f.write_char('_')?,
                }
            }
            if row < 8 {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.empty_count(), 81);
        assert!(!board.is_complete());
        for pos in Position::ALL {
            assert_eq!(board.digit(pos), None);
            assert!(!board.is_given(pos));
        }
    }

    #[test]
    fn test_set_marks_given() {
        let mut board = Board::new();
        let pos = Position::new(3, 4);
        board.set(pos, 7).unwrap();
        assert_eq!(board.digit(pos), Some(Digit::D7));
        assert!(board.is_given(pos));
    }

    #[test]
    fn test_set_zero_clears_given() {
        let mut board = Board::new();
        let pos = Position::new(3, 4);
        board.set(pos, 7).unwrap();
        board.set(pos, 0).unwrap();
        assert_eq!(board.digit(pos), None);
        assert!(!board.is_given(pos));
    }

    #[test]
    fn test_set_rejects_out_of_range() {
        let mut board = Board::new();
        let pos = Position::new(0, 0);
        board.set(pos, 5).unwrap();
        let err = board.set(pos, 10).unwrap_err();
        assert_eq!(err, BoardError::InvalidDigit { value: 10 });
        // Rejection leaves the board unchanged
        assert_eq!(board.digit(pos), Some(Digit::D5));
        assert!(board.is_given(pos));
    }

    #[test]
    fn test_fill_and_erase_do_not_touch_given_mask() {
        let mut board = Board::new();
        let pos = Position::new(5, 5);
        board.fill(pos, Digit::D2);
        assert_eq!(board.digit(pos), Some(Digit::D2));
        assert!(!board.is_given(pos));
        board.erase(pos);
        assert_eq!(board.digit(pos), None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut board = Board::example();
        board.fill(Position::new(0, 2), Digit::D4);
        board.clear();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_example_clues() {
        let board = Board::example();
        assert_eq!(board.empty_count(), 51);
        assert_eq!(board.digit(Position::new(0, 0)), Some(Digit::D5));
        assert_eq!(board.digit(Position::new(8, 8)), Some(Digit::D9));
        for pos in Position::ALL {
            assert_eq!(board.is_given(pos), board.digit(pos).is_some());
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::example();
        let mut copy = board.clone();
        copy.fill(Position::new(0, 2), Digit::D4);
        assert_eq!(board.digit(Position::new(0, 2)), None);
    }

    #[test]
    fn test_parse_display_round_trip() {
        let board = Board::example();
        let text = board.to_string();
        let reparsed: Board = text.parse().unwrap();
        for pos in Position::ALL {
            assert_eq!(reparsed.digit(pos), board.digit(pos));
        }
    }

    #[test]
    fn test_parse_rejects_bad_character() {
        let err = "x".repeat(81).parse::<Board>().unwrap_err();
        assert_eq!(err, ParseBoardError::InvalidCharacter { character: 'x' });
    }

    #[test]
    fn test_parse_rejects_wrong_cell_count() {
        let err = "123".parse::<Board>().unwrap_err();
        assert_eq!(err, ParseBoardError::WrongCellCount { found: 3 });
    }

    proptest! {
        #[test]
        fn prop_set_accepts_exactly_0_to_9(row in 0u8..9, col in 0u8..9, value: u8) {
            let mut board = Board::new();
            let pos = Position::new(row, col);
            let result = board.set(pos, value);
            if value <= 9 {
                prop_assert!(result.is_ok());
                prop_assert_eq!(board.digit(pos).map_or(0, Digit::value), value);
                prop_assert_eq!(board.is_given(pos), value != 0);
            } else {
                prop_assert!(result.is_err());
                prop_assert_eq!(board, Board::new());
            }
        }

        #[test]
        fn prop_set_then_zero_restores_empty(row in 0u8..9, col in 0u8..9, value in 1u8..=9) {
            let mut board = Board::new();
            let pos = Position::new(row, col);
            board.set(pos, value).unwrap();
            board.set(pos, 0).unwrap();
            prop_assert_eq!(board, Board::new());
        }
    }
}
