//! WebAssembly boundary for the solvoku engine.
//!
//! Exposes a [`SolverHandle`] to the browser UI: cell editing, validation,
//! blocking solve, and a tick-driven animated solve. The UI owns all
//! rendering and pacing; this crate only hands it serialized step data.
//!
//! Typical JavaScript usage:
//!
//! ```js
//! const handle = new SolverHandle();
//! handle.load_example();
//! handle.start_animated(50, 30);
//! while (true) {
//!   const tick = handle.tick();
//!   if (tick.status !== "step") break;
//!   renderStep(tick);
//!   await sleep(tick.delay_ms);
//! }
//! ```

use serde::Serialize;
use solvoku_core::{Board, Position};
use solvoku_session::{Progress, SolveOptions, SolveSession, StartOutcome};
use solvoku_solver::{EventKind, SearchEvent, SolveOutcome, check_givens};
use wasm_bindgen::prelude::*;

/// Installs the panic hook so panics reach `console.error`.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// One animated search step, as handed to the UI.
#[derive(Debug, Serialize)]
struct StepDto {
    row: u8,
    col: u8,
    digit: u8,
    kind: &'static str,
    delay_ms: u64,
}

impl StepDto {
    fn new(event: SearchEvent, delay_ms: u64) -> Self {
        Self {
            row: event.position.row(),
            col: event.position.col(),
            digit: event.digit.value(),
            kind: match event.kind {
                EventKind::Place => "place",
                EventKind::Backtrack => "backtrack",
            },
            delay_ms,
        }
    }
}

/// The result of a tick or a blocking solve.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum TickDto {
    Step(StepDto),
    Solved {
        /// Row-major cell values of the solution (always 81 entries).
        cells: Vec<u8>,
    },
    Unsolvable,
}

fn cell_values(board: &Board) -> Vec<u8> {
    Position::ALL
        .into_iter()
        .map(|pos| board.digit(pos).map_or(0, solvoku_core::Digit::value))
        .collect()
}

fn position(row: u8, col: u8) -> Result<Position, JsValue> {
    if row < 9 && col < 9 {
        Ok(Position::new(row, col))
    } else {
        Err(JsValue::from_str("cell out of range"))
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn serialize<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

/// The engine handle owned by the browser UI.
///
/// Holds the user-visible board and the solve session. Methods taking a
/// cell coordinate reject out-of-range rows or columns; value errors use
/// the boundary convention of the grid model (`0` clears, `1..=9` sets,
/// anything else throws).
#[wasm_bindgen]
#[derive(Default)]
pub struct SolverHandle {
    board: Board,
    session: SolveSession,
}

#[wasm_bindgen]
impl SolverHandle {
    /// Creates a handle with an empty board.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a cell from user input (`0` clears, `1..=9` places a given).
    ///
    /// # Errors
    ///
    /// Throws if the coordinates are out of range or the value is above 9.
    pub fn set_cell(&mut self, row: u8, col: u8, value: u8) -> Result<(), JsValue> {
        let pos = position(row, col)?;
        self.board.set(pos, value).map_err(to_js_error)
    }

    /// Returns the value of a cell (`0` = empty).
    ///
    /// # Errors
    ///
    /// Throws if the coordinates are out of range.
    pub fn cell(&self, row: u8, col: u8) -> Result<u8, JsValue> {
        let pos = position(row, col)?;
        Ok(self.board.digit(pos).map_or(0, |digit| digit.value()))
    }

    /// Returns `true` if the cell holds a user-supplied given.
    ///
    /// # Errors
    ///
    /// Throws if the coordinates are out of range.
    pub fn is_given(&self, row: u8, col: u8) -> Result<bool, JsValue> {
        Ok(self.board.is_given(position(row, col)?))
    }

    /// Resets the board to empty and discards any active animated search.
    pub fn clear(&mut self) {
        self.session.abort();
        self.board.clear();
    }

    /// Loads the bundled example puzzle, replacing the current board.
    pub fn load_example(&mut self) {
        self.session.abort();
        self.board = Board::example();
    }

    /// Returns `true` if the current givens contain no row, column, or box
    /// conflict.
    #[must_use]
    pub fn validate(&self) -> bool {
        check_givens(&self.board).is_ok()
    }

    /// Solves the current board synchronously.
    ///
    /// On success the handle's board is replaced with the solution (the
    /// given mask is preserved) and a `{status: "solved", cells}` object is
    /// returned; an exhausted search returns `{status: "unsolvable"}` and
    /// leaves the board unchanged.
    ///
    /// # Errors
    ///
    /// Throws if the givens conflict or a search is already in progress.
    pub fn solve(&mut self) -> Result<JsValue, JsValue> {
        match self.session.solve(&self.board).map_err(to_js_error)? {
            SolveOutcome::Solved(solution) => {
                let dto = TickDto::Solved {
                    cells: cell_values(&solution),
                };
                self.board = solution;
                serialize(&dto)
            }
            SolveOutcome::Unsolvable => serialize(&TickDto::Unsolvable),
        }
    }

    /// Arms an animated search over the current board.
    ///
    /// Drive it with [`tick`](Self::tick); the board is only replaced when
    /// the search finishes with a solution.
    ///
    /// # Errors
    ///
    /// Throws if the givens conflict or a search is already in progress.
    pub fn start_animated(
        &mut self,
        place_delay_ms: u64,
        backtrack_delay_ms: u64,
    ) -> Result<(), JsValue> {
        let options = SolveOptions {
            animate: true,
            place_delay_ms,
            backtrack_delay_ms,
        };
        match self.session.start(&self.board, options) {
            Ok(StartOutcome::Animating) => Ok(()),
            Ok(StartOutcome::Completed(_)) => {
                unreachable!("animated start never completes synchronously")
            }
            Err(err) => Err(to_js_error(err)),
        }
    }

    /// Advances the animated search by one step.
    ///
    /// Returns `{status: "step", row, col, digit, kind, delay_ms}` while
    /// searching, then `{status: "solved", cells}` or
    /// `{status: "unsolvable"}` once finished.
    ///
    /// # Errors
    ///
    /// Throws if no animated search is active.
    pub fn tick(&mut self) -> Result<JsValue, JsValue> {
        match self.session.tick().map_err(to_js_error)? {
            Progress::Step { event, delay_ms } => serialize(&TickDto::Step(StepDto::new(
                event, delay_ms,
            ))),
            Progress::Finished(SolveOutcome::Solved(solution)) => {
                let dto = TickDto::Solved {
                    cells: cell_values(&solution),
                };
                self.board = solution;
                serialize(&dto)
            }
            Progress::Finished(SolveOutcome::Unsolvable) => serialize(&TickDto::Unsolvable),
        }
    }

    /// Discards the active animated search, if any, leaving the board as
    /// the user entered it.
    pub fn abort(&mut self) -> bool {
        self.session.abort()
    }
}
