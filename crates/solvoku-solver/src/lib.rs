//! Backtracking solver for the solvoku engine.
//!
//! This crate implements the constraint-satisfaction core: placement rule
//! checks, given-grid validation, and an exhaustive depth-first search with
//! backtracking.
//!
//! # Overview
//!
//! The search is deterministic: empty cells are visited in row-major order
//! and candidate digits are tried in ascending order, so a puzzle with a
//! unique solution always produces that solution and a puzzle with several
//! solutions always produces the same first one.
//!
//! The search is also *resumable*. [`Search`] keeps an explicit stack of
//! placements instead of recursing, and [`Search::advance`] performs exactly
//! one observable decision (a placement or a backtrack) per call. Callers
//! that want animated solving interleave `advance` with their own pacing;
//! callers that do not use [`solve`] or [`Search::run`] and never see a
//! suspension point.
//!
//! # Examples
//!
//! ```
//! use solvoku_core::Board;
//! use solvoku_solver::{SolveOutcome, solve};
//!
//! let board = Board::example();
//! match solve(&board)? {
//!     SolveOutcome::Solved(solution) => println!("{solution}"),
//!     SolveOutcome::Unsolvable => println!("no solution exists"),
//! }
//! # Ok::<(), solvoku_solver::GivensConflict>(())
//! ```

pub mod event;
pub mod rules;
pub mod search;

pub use self::{
    event::{EventKind, SearchEvent},
    rules::{GivensConflict, check_givens, first_empty_cell, is_solved, placement_allowed},
    search::{Search, SearchStats, SearchStep, SolveOutcome, solve, solve_with_observer},
};
