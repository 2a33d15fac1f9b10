//! Core data structures for the solvoku solving engine.
//!
//! This crate provides the grid model shared by the solver, the session
//! layer, and the browser boundary:
//!
//! - [`digit`]: Type-safe representation of sudoku digits 1-9
//! - [`position`]: Row/column cell coordinates on the 9×9 grid
//! - [`board`]: The 9×9 board with a parallel given-cell mask
//!
//! # Overview
//!
//! A [`Board`] stores each cell as `Option<Digit>`, so an empty cell is
//! unrepresentable as an out-of-range value. User input enters through
//! [`Board::set`], which accepts the raw `0..=9` convention of the input
//! boundary (`0` clears a cell) and rejects anything else. Cells written
//! by [`Board::set`] are marked as *givens*; cells written by the solver
//! through [`Board::fill`] are not, so the given mask always distinguishes
//! user-supplied clues from solver-filled values.
//!
//! # Examples
//!
//! ```
//! use solvoku_core::{Board, Digit, Position};
//!
//! let mut board = Board::new();
//! board.set(Position::new(0, 0), 5)?;
//!
//! assert_eq!(board.digit(Position::new(0, 0)), Some(Digit::D5));
//! assert!(board.is_given(Position::new(0, 0)));
//! # Ok::<(), solvoku_core::BoardError>(())
//! ```

pub mod board;
pub mod digit;
pub mod position;

pub use self::{
    board::{Board, BoardError, ParseBoardError},
    digit::Digit,
    position::Position,
};
