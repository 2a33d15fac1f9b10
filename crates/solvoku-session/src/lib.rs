//! Solve session management for the solvoku engine.
//!
//! A [`SolveSession`] owns the lifecycle of a solve request: it validates
//! the givens, runs the search, and enforces that at most one search is
//! active at a time. A second start request while a search is running is
//! rejected as a no-op, never queued or interrupted.
//!
//! In non-animated mode [`SolveSession::start`] runs to completion
//! synchronously. In animated mode it arms a resumable search that the
//! caller drives with [`SolveSession::tick`], one placement or backtrack
//! per call. Each step carries the pacing delay configured in
//! [`SolveOptions`]; sleeping for that delay is the caller's concern (a
//! browser rendering loop, a test that skips delays entirely), so the
//! session never blocks.
//!
//! Whatever happens, the caller's board is untouched: the search operates
//! on a clone, and a solution is only ever handed back as a new board.
//!
//! # Examples
//!
//! ```
//! use solvoku_core::Board;
//! use solvoku_session::{SolveOptions, SolveSession, StartOutcome};
//! use solvoku_solver::SolveOutcome;
//!
//! let mut session = SolveSession::new();
//! let outcome = session.start(&Board::example(), SolveOptions::default())?;
//! match outcome {
//!     StartOutcome::Completed(SolveOutcome::Solved(solution)) => println!("{solution}"),
//!     StartOutcome::Completed(SolveOutcome::Unsolvable) => println!("no solution"),
//!     StartOutcome::Animating => unreachable!("default options are not animated"),
//! }
//! # Ok::<(), solvoku_session::SessionError>(())
//! ```

use solvoku_core::Board;
use solvoku_solver::{GivensConflict, Search, SearchEvent, SearchStep, SolveOutcome};

/// Options for a solve request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveOptions {
    /// Drive the search step by step through [`SolveSession::tick`] instead
    /// of running it to completion synchronously.
    pub animate: bool,
    /// Pacing delay after a placement, in milliseconds.
    pub place_delay_ms: u64,
    /// Pacing delay after a backtrack, in milliseconds.
    pub backtrack_delay_ms: u64,
}

impl Default for SolveOptions {
    /// Non-animated, with the standard animation pacing (50 ms per
    /// placement, 30 ms per backtrack) should animation be enabled.
    fn default() -> Self {
        Self {
            animate: false,
            place_delay_ms: 50,
            backtrack_delay_ms: 30,
        }
    }
}

/// An error from a session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SessionError {
    /// A solve request arrived while another search was active.
    #[display("a search is already in progress")]
    SearchInProgress,
    /// The starting grid has conflicting givens; no search was attempted.
    #[display("invalid puzzle: {conflict}")]
    InvalidGivens {
        /// The first conflict found.
        conflict: GivensConflict,
    },
    /// [`SolveSession::tick`] was called with no animated search active.
    #[display("no animated search is active")]
    NoActiveSearch,
}

/// The observable state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// No search is active; a new solve request will be accepted.
    Idle,
    /// An animated search is in flight and waiting to be ticked.
    Searching,
}

/// The immediate result of [`SolveSession::start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The search ran to completion synchronously (non-animated mode).
    Completed(SolveOutcome),
    /// An animated search was armed; drive it with [`SolveSession::tick`].
    Animating,
}

/// One tick of an animated search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The search made one decision; pause for `delay_ms` before the next
    /// tick to pace the animation.
    Step {
        /// The placement or backtrack just performed.
        event: SearchEvent,
        /// The pacing delay configured for this kind of step.
        delay_ms: u64,
    },
    /// The search finished; the session is `Idle` again.
    Finished(SolveOutcome),
}

#[derive(Debug)]
struct ActiveSearch {
    search: Search,
    options: SolveOptions,
}

/// A solve session enforcing a single active search.
///
/// See the [crate documentation](crate) for the lifecycle.
#[derive(Debug, Default)]
pub struct SolveSession {
    active: Option<ActiveSearch>,
}

impl SolveSession {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the observable state of the session.
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.active.is_some() {
            SessionState::Searching
        } else {
            SessionState::Idle
        }
    }

    /// Starts a solve request for a clone of `board`.
    ///
    /// The givens are validated first; a conflicting grid is rejected
    /// without searching. With `options.animate` unset the search runs to
    /// completion and the outcome is returned directly. With it set, the
    /// session moves to `Searching` and the caller drives the search with
    /// [`tick`](Self::tick).
    ///
    /// # Errors
    ///
    /// - [`SessionError::SearchInProgress`] if a search is already active;
    ///   the request is dropped and the active search is unaffected.
    /// - [`SessionError::InvalidGivens`] if the grid fails validation.
    pub fn start(
        &mut self,
        board: &Board,
        options: SolveOptions,
    ) -> Result<StartOutcome, SessionError> {
        if self.active.is_some() {
            log::debug!("solve request rejected: search already in progress");
            return Err(SessionError::SearchInProgress);
        }

        log::debug!("validating givens");
        let search = Search::new(board).map_err(|conflict| {
            log::debug!("solve request rejected: {conflict}");
            SessionError::InvalidGivens { conflict }
        })?;

        if options.animate {
            log::debug!("animated search started");
            self.active = Some(ActiveSearch { search, options });
            return Ok(StartOutcome::Animating);
        }

        let (outcome, stats) = search.run();
        log::info!(
            "search finished after {} steps: {}",
            stats.total_steps(),
            outcome_label(&outcome)
        );
        Ok(StartOutcome::Completed(outcome))
    }

    /// Solves `board` synchronously with default options.
    ///
    /// Convenience wrapper around [`start`](Self::start) for callers that
    /// never animate.
    ///
    /// # Errors
    ///
    /// Same as [`start`](Self::start).
    pub fn solve(&mut self, board: &Board) -> Result<SolveOutcome, SessionError> {
        match self.start(board, SolveOptions::default())? {
            StartOutcome::Completed(outcome) => Ok(outcome),
            StartOutcome::Animating => unreachable!("default options are not animated"),
        }
    }

    /// Advances the active animated search by one step.
    ///
    /// On [`Progress::Finished`] the session returns to `Idle` and a new
    /// solve request will be accepted.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveSearch`] if no animated search is
    /// active.
    pub fn tick(&mut self) -> Result<Progress, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveSearch)?;
        let progress = match active.search.advance() {
            SearchStep::Placed(event) => Progress::Step {
                event,
                delay_ms: active.options.place_delay_ms,
            },
            SearchStep::Backtracked(event) => Progress::Step {
                event,
                delay_ms: active.options.backtrack_delay_ms,
            },
            SearchStep::Solved => {
                Progress::Finished(SolveOutcome::Solved(active.search.board().clone()))
            }
            SearchStep::Exhausted => Progress::Finished(SolveOutcome::Unsolvable),
        };
        if let Progress::Finished(outcome) = &progress {
            let stats = active.search.stats();
            log::info!(
                "animated search finished after {} steps: {}",
                stats.total_steps(),
                outcome_label(outcome)
            );
            self.active = None;
        }
        Ok(progress)
    }

    /// Discards the active animated search, returning the session to `Idle`.
    ///
    /// Returns `true` if a search was discarded. The caller's board was
    /// never touched by the search, so nothing needs to be restored.
    pub fn abort(&mut self) -> bool {
        let aborted = self.active.take().is_some();
        if aborted {
            log::debug!("animated search aborted");
        }
        aborted
    }
}

fn outcome_label(outcome: &SolveOutcome) -> &'static str {
    match outcome {
        SolveOutcome::Solved(_) => "solved",
        SolveOutcome::Unsolvable => "unsolvable",
    }
}
