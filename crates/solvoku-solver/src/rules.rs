//! Placement rules and grid validation.

use solvoku_core::{Board, Digit, Position};

/// A conflict among the filled cells of a board.
///
/// Reports the first cell (in row-major order) whose digit also appears
/// elsewhere in its row, column, or 3×3 box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("conflicting digit {digit} at {position}")]
pub struct GivensConflict {
    /// The first conflicting cell in row-major order.
    pub position: Position,
    /// The digit involved in the conflict.
    pub digit: Digit,
}

/// Returns `true` if `digit` appears in the row, column, or box of `pos`,
/// excluding `pos` itself.
fn digit_visible_from(board: &Board, pos: Position, digit: Digit) -> bool {
    for i in 0..9 {
        let row_peer = Position::new(pos.row(), i);
        if row_peer != pos && board.digit(row_peer) == Some(digit) {
            return true;
        }
        let col_peer = Position::new(i, pos.col());
        if col_peer != pos && board.digit(col_peer) == Some(digit) {
            return true;
        }
    }
    let origin = pos.box_origin();
    for row in origin.row()..origin.row() + 3 {
        for col in origin.col()..origin.col() + 3 {
            let box_peer = Position::new(row, col);
            if box_peer != pos && board.digit(box_peer) == Some(digit) {
                return true;
            }
        }
    }
    false
}

/// Returns `true` if placing `digit` at the empty cell `pos` would not
/// duplicate it in the cell's row, column, or 3×3 box.
///
/// This is a fixed 27-cell scan with no allocation.
///
/// # Examples
///
/// ```
/// use solvoku_core::{Board, Digit, Position};
/// use solvoku_solver::placement_allowed;
///
/// let mut board = Board::new();
/// board.set(Position::new(0, 0), 5)?;
///
/// assert!(!placement_allowed(&board, Position::new(0, 8), Digit::D5));
/// assert!(placement_allowed(&board, Position::new(0, 8), Digit::D6));
/// # Ok::<(), solvoku_core::BoardError>(())
/// ```
#[must_use]
pub fn placement_allowed(board: &Board, pos: Position, digit: Digit) -> bool {
    !digit_visible_from(board, pos, digit)
}

/// Returns the first empty cell in row-major order, or `None` if the board
/// is complete.
///
/// The fixed scan order is part of the solver contract: together with the
/// ascending digit order it makes the search deterministic.
#[must_use]
pub fn first_empty_cell(board: &Board) -> Option<Position> {
    Position::ALL
        .into_iter()
        .find(|&pos| board.digit(pos).is_none())
}

/// Checks that no filled cell conflicts with another in its row, column,
/// or 3×3 box.
///
/// This rejects duplicate-clue puzzles (for example two 5s in one row)
/// before a search is attempted. The scan is row-major and stops at the
/// first conflict. The board is only inspected, never mutated.
///
/// # Errors
///
/// Returns [`GivensConflict`] for the first conflicting cell.
pub fn check_givens(board: &Board) -> Result<(), GivensConflict> {
    for pos in Position::ALL {
        let Some(digit) = board.digit(pos) else {
            continue;
        };
        if digit_visible_from(board, pos, digit) {
            return Err(GivensConflict {
                position: pos,
                digit,
            });
        }
    }
    Ok(())
}

/// Returns `true` if the board is complete and every row, column, and box
/// contains each digit exactly once.
#[must_use]
pub fn is_solved(board: &Board) -> bool {
    board.is_complete() && check_givens(board).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(cells: &[(u8, u8, u8)]) -> Board {
        let mut board = Board::new();
        for &(row, col, value) in cells {
            board.set(Position::new(row, col), value).unwrap();
        }
        board
    }

    #[test]
    fn test_placement_blocked_by_row() {
        let board = board_with(&[(0, 0, 5)]);
        assert!(!placement_allowed(&board, Position::new(0, 8), Digit::D5));
    }

    #[test]
    fn test_placement_blocked_by_column() {
        let board = board_with(&[(0, 0, 5)]);
        assert!(!placement_allowed(&board, Position::new(8, 0), Digit::D5));
    }

    #[test]
    fn test_placement_blocked_by_box() {
        let board = board_with(&[(0, 0, 5)]);
        assert!(!placement_allowed(&board, Position::new(2, 2), Digit::D5));
    }

    #[test]
    fn test_placement_allowed_outside_houses() {
        let board = board_with(&[(0, 0, 5)]);
        assert!(placement_allowed(&board, Position::new(3, 3), Digit::D5));
        assert!(placement_allowed(&board, Position::new(0, 1), Digit::D6));
    }

    #[test]
    fn test_first_empty_cell_row_major() {
        let mut board = Board::new();
        assert_eq!(first_empty_cell(&board), Some(Position::new(0, 0)));
        for col in 0..9 {
            board.set(Position::new(0, col), col + 1).unwrap();
        }
        assert_eq!(first_empty_cell(&board), Some(Position::new(1, 0)));
    }

    #[test]
    fn test_first_empty_cell_none_when_complete() {
        let mut board = Board::new();
        for pos in Position::ALL {
            board.fill(pos, Digit::D1);
        }
        assert_eq!(first_empty_cell(&board), None);
    }

    #[test]
    fn test_check_givens_accepts_example() {
        assert_eq!(check_givens(&Board::example()), Ok(()));
    }

    #[test]
    fn test_check_givens_rejects_row_duplicate() {
        let board = board_with(&[(0, 0, 5), (0, 1, 5)]);
        let conflict = check_givens(&board).unwrap_err();
        assert_eq!(conflict.position, Position::new(0, 0));
        assert_eq!(conflict.digit, Digit::D5);
    }

    #[test]
    fn test_check_givens_rejects_box_duplicate() {
        let board = board_with(&[(0, 0, 7), (2, 2, 7)]);
        assert!(check_givens(&board).is_err());
    }

    #[test]
    fn test_check_givens_does_not_mutate() {
        let board = board_with(&[(0, 0, 5), (0, 1, 5), (4, 4, 3)]);
        let before = board.clone();
        let _ = check_givens(&board);
        assert_eq!(board, before);
    }

    #[test]
    fn test_is_solved_rejects_incomplete_board() {
        assert!(!is_solved(&Board::example()));
    }
}
