//! Resumable backtracking search.

use solvoku_core::{Board, Digit, Position};

use crate::{
    event::{EventKind, SearchEvent},
    rules::{self, GivensConflict},
};

/// The outcome of an exhaustive search.
///
/// `Unsolvable` is a normal outcome, not a fault: it means every branch of
/// the finite search space was exhausted without completing the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// The search found a completed grid.
    Solved(Board),
    /// No completion of the starting grid exists.
    Unsolvable,
}

/// The result of advancing the search by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStep {
    /// A candidate digit was placed in the first empty cell.
    Placed(SearchEvent),
    /// The most recent placement was undone.
    Backtracked(SearchEvent),
    /// The grid is complete; the search is finished.
    Solved,
    /// Every branch was exhausted without a solution; the search is finished.
    Exhausted,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    placements: usize,
    backtracks: usize,
    max_depth: usize,
}

impl SearchStats {
    /// Returns the number of digits placed.
    #[must_use]
    pub fn placements(&self) -> usize {
        self.placements
    }

    /// Returns the number of placements undone.
    #[must_use]
    pub fn backtracks(&self) -> usize {
        self.backtracks
    }

    /// Returns the total number of search steps (placements plus backtracks).
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.placements + self.backtracks
    }

    /// Returns the deepest placement stack reached.
    ///
    /// Bounded by the number of empty cells in the starting grid (at most 81).
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// A committed placement on the search stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    pos: Position,
    digit: Digit,
}

/// Where the next call to [`Search::advance`] resumes.
#[derive(Debug, Clone, Copy)]
enum Resume {
    /// Scan for the first empty cell and try digits from 1.
    NextCell,
    /// Try candidates from this digit upward at a backtracked cell.
    TryFrom(Position, Digit),
    /// Undo the most recent placement.
    Backtrack,
    /// Terminal: the grid is complete.
    Solved,
    /// Terminal: all branches were exhausted.
    Exhausted,
}

/// A depth-first backtracking search over a board snapshot.
///
/// The search owns a clone of the starting board, so the caller's board is
/// never touched, whatever happens during the search. Choice points are kept
/// on an explicit stack (at most one frame per empty cell), so the search
/// never recurses and its depth is bounded independently of the call stack.
///
/// Cells are visited in row-major order and digits tried in ascending order,
/// which makes the search fully deterministic.
///
/// [`advance`](Self::advance) performs exactly one observable decision per
/// call, which is what makes animated solving possible: the caller resumes
/// the search after each pacing delay. Terminal states are sticky; advancing
/// a finished search keeps returning the same terminal step.
///
/// # Examples
///
/// ```
/// use solvoku_core::Board;
/// use solvoku_solver::{Search, SearchStep};
///
/// let mut search = Search::new(&Board::example())?;
/// loop {
///     match search.advance() {
///         SearchStep::Placed(event) | SearchStep::Backtracked(event) => {
///             println!("{event:?}");
///         }
///         SearchStep::Solved => break,
///         SearchStep::Exhausted => panic!("example puzzle is solvable"),
///     }
/// }
/// assert!(solvoku_solver::is_solved(search.board()));
/// # Ok::<(), solvoku_solver::GivensConflict>(())
/// ```
#[derive(Debug, Clone)]
pub struct Search {
    board: Board,
    stack: Vec<Frame>,
    resume: Resume,
    stats: SearchStats,
}

impl Search {
    /// Starts a search over a clone of `board`.
    ///
    /// # Errors
    ///
    /// Returns [`GivensConflict`] if the starting grid already contains a
    /// duplicate digit in a row, column, or box. Searching such a grid would
    /// silently fail or produce a grid that violates the rules, so it is
    /// rejected up front.
    pub fn new(board: &Board) -> Result<Self, GivensConflict> {
        rules::check_givens(board)?;
        Ok(Self {
            board: board.clone(),
            stack: Vec::with_capacity(board.empty_count()),
            resume: Resume::NextCell,
            stats: SearchStats::default(),
        })
    }

    /// Returns the board in its current search state.
    ///
    /// After [`advance`](Self::advance) has returned [`SearchStep::Solved`],
    /// this is the completed solution.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the counters collected so far.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Returns the current placement depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` once the search has reached a terminal step.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.resume, Resume::Solved | Resume::Exhausted)
    }

    /// Advances the search by one observable decision.
    ///
    /// Returns [`SearchStep::Placed`] when a candidate digit is committed to
    /// the first empty cell, [`SearchStep::Backtracked`] when the most recent
    /// placement is undone, and a sticky [`SearchStep::Solved`] or
    /// [`SearchStep::Exhausted`] once the search is finished.
    pub fn advance(&mut self) -> SearchStep {
        loop {
            match self.resume {
                Resume::Solved => return SearchStep::Solved,
                Resume::Exhausted => return SearchStep::Exhausted,
                Resume::NextCell => {
                    let Some(pos) = rules::first_empty_cell(&self.board) else {
                        self.resume = Resume::Solved;
                        return SearchStep::Solved;
                    };
                    if let Some(step) = self.try_digits(pos, Digit::D1) {
                        return step;
                    }
                }
                Resume::TryFrom(pos, digit) => {
                    if let Some(step) = self.try_digits(pos, digit) {
                        return step;
                    }
                }
                Resume::Backtrack => {
                    let Some(frame) = self.stack.pop() else {
                        self.resume = Resume::Exhausted;
                        return SearchStep::Exhausted;
                    };
                    self.board.erase(frame.pos);
                    self.stats.backtracks += 1;
                    // Resume after the digit that just failed; a frame that
                    // already tried 9 forces another backtrack.
                    self.resume = match frame.digit.succ() {
                        Some(next) => Resume::TryFrom(frame.pos, next),
                        None => Resume::Backtrack,
                    };
                    return SearchStep::Backtracked(SearchEvent {
                        position: frame.pos,
                        digit: frame.digit,
                        kind: EventKind::Backtrack,
                    });
                }
            }
        }
    }

    /// Tries candidates at `pos` starting from `start`, committing the first
    /// allowed digit. Returns `None` when every remaining candidate is
    /// blocked, leaving the search set to backtrack.
    fn try_digits(&mut self, pos: Position, start: Digit) -> Option<SearchStep> {
        let mut candidate = Some(start);
        while let Some(digit) = candidate {
            if rules::placement_allowed(&self.board, pos, digit) {
                self.board.fill(pos, digit);
                self.stack.push(Frame { pos, digit });
                self.stats.placements += 1;
                self.stats.max_depth = self.stats.max_depth.max(self.stack.len());
                self.resume = Resume::NextCell;
                return Some(SearchStep::Placed(SearchEvent {
                    position: pos,
                    digit,
                    kind: EventKind::Place,
                }));
            }
            candidate = digit.succ();
        }
        self.resume = Resume::Backtrack;
        None
    }

    /// Runs the search to completion.
    pub fn run(mut self) -> (SolveOutcome, SearchStats) {
        loop {
            match self.advance() {
                SearchStep::Placed(_) | SearchStep::Backtracked(_) => {}
                SearchStep::Solved => {
                    let stats = self.stats;
                    return (SolveOutcome::Solved(self.board), stats);
                }
                SearchStep::Exhausted => return (SolveOutcome::Unsolvable, self.stats),
            }
        }
    }
}

/// Solves `board` by exhaustive backtracking search.
///
/// The caller's board is never modified; on success the solution is returned
/// as a new board that preserves the given mask of the input.
///
/// # Errors
///
/// Returns [`GivensConflict`] if the starting grid contains a duplicate
/// digit in a row, column, or box. No search is attempted in that case.
pub fn solve(board: &Board) -> Result<SolveOutcome, GivensConflict> {
    let (outcome, _stats) = Search::new(board)?.run();
    Ok(outcome)
}

/// Solves `board`, invoking `on_step` for every placement and backtrack.
///
/// This is the animation seam: the search itself stays pure, and all
/// presentation concerns (rendering, pacing) live in the observer.
///
/// # Errors
///
/// Returns [`GivensConflict`] if the starting grid contains a duplicate
/// digit in a row, column, or box. The observer is never invoked in that
/// case.
pub fn solve_with_observer<F>(board: &Board, mut on_step: F) -> Result<SolveOutcome, GivensConflict>
where
    F: FnMut(SearchEvent),
{
    let mut search = Search::new(board)?;
    loop {
        match search.advance() {
            SearchStep::Placed(event) | SearchStep::Backtracked(event) => on_step(event),
            SearchStep::Solved => return Ok(SolveOutcome::Solved(search.board().clone())),
            SearchStep::Exhausted => return Ok(SolveOutcome::Unsolvable),
        }
    }
}

#[cfg(test)]
mod tests {
    use solvoku_core::Position;

    use super::*;
    use crate::rules::is_solved;

    /// Caps a search in tests so a regression cannot hang the suite.
    fn run_bounded(mut search: Search, max_steps: usize) -> SolveOutcome {
        for _ in 0..max_steps {
            match search.advance() {
                SearchStep::Placed(_) | SearchStep::Backtracked(_) => {}
                SearchStep::Solved => return SolveOutcome::Solved(search.board().clone()),
                SearchStep::Exhausted => return SolveOutcome::Unsolvable,
            }
        }
        panic!("search did not finish within {max_steps} steps");
    }

    /// An internally consistent grid with no completion: row 0 holds 1-8,
    /// and a 9 in the top-right box blocks the remaining cell.
    fn unsolvable_board() -> Board {
        let mut board = Board::new();
        for col in 0..8 {
            board.set(Position::new(0, col), col + 1).unwrap();
        }
        board.set(Position::new(2, 6), 9).unwrap();
        board
    }

    #[test]
    fn test_example_puzzle_solution() {
        let SolveOutcome::Solved(solution) = solve(&Board::example()).unwrap() else {
            panic!("example puzzle must be solvable");
        };
        assert!(is_solved(&solution));
        let first_row: Vec<u8> = (0..9)
            .map(|col| solution.digit(Position::new(0, col)).unwrap().value())
            .collect();
        assert_eq!(first_row, [5, 3, 4, 6, 7, 8, 9, 1, 2]);
    }

    #[test]
    fn test_solution_preserves_givens() {
        let board = Board::example();
        let SolveOutcome::Solved(solution) = solve(&board).unwrap() else {
            panic!("example puzzle must be solvable");
        };
        for pos in Position::ALL {
            if let Some(digit) = board.digit(pos) {
                assert_eq!(solution.digit(pos), Some(digit));
            }
            assert_eq!(solution.is_given(pos), board.is_given(pos));
        }
    }

    #[test]
    fn test_solve_does_not_modify_input() {
        let board = Board::example();
        let before = board.clone();
        let _ = solve(&board).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn test_solve_is_deterministic() {
        let board = Board::example();
        assert_eq!(solve(&board).unwrap(), solve(&board).unwrap());

        // Multiple solutions: the empty board still solves identically
        let empty = Board::new();
        assert_eq!(solve(&empty).unwrap(), solve(&empty).unwrap());
    }

    #[test]
    fn test_solve_rejects_conflicting_givens() {
        let mut board = Board::new();
        board.set(Position::new(0, 0), 5).unwrap();
        board.set(Position::new(0, 1), 5).unwrap();
        let conflict = solve(&board).unwrap_err();
        assert_eq!(conflict.position, Position::new(0, 0));
    }

    #[test]
    fn test_unsolvable_board_is_detected() {
        let board = unsolvable_board();
        // The board is consistent, so the search itself must run and exhaust
        assert_eq!(solve(&board).unwrap(), SolveOutcome::Unsolvable);
    }

    #[test]
    fn test_empty_board_solves_within_bounded_steps() {
        let search = Search::new(&Board::new()).unwrap();
        let SolveOutcome::Solved(solution) = run_bounded(search, 1_000_000) else {
            panic!("empty board must be solvable");
        };
        assert!(is_solved(&solution));
        // Nothing was a given, so nothing is marked as one
        assert!(Position::ALL.iter().all(|&pos| !solution.is_given(pos)));
    }

    #[test]
    fn test_complete_board_solves_without_placements() {
        let SolveOutcome::Solved(solution) = solve(&Board::new()).unwrap() else {
            panic!("empty board must be solvable");
        };
        let (outcome, stats) = Search::new(&solution).unwrap().run();
        assert_eq!(outcome, SolveOutcome::Solved(solution));
        assert_eq!(stats.total_steps(), 0);
    }

    #[test]
    fn test_terminal_steps_are_sticky() {
        let mut search = Search::new(&unsolvable_board()).unwrap();
        while !search.is_finished() {
            let _ = search.advance();
        }
        assert_eq!(search.advance(), SearchStep::Exhausted);
        assert_eq!(search.advance(), SearchStep::Exhausted);
    }

    #[test]
    fn test_every_backtrack_undoes_last_place() {
        let mut placed: Vec<(Position, Digit)> = Vec::new();
        let outcome = solve_with_observer(&Board::example(), |event| match event.kind {
            EventKind::Place => placed.push((event.position, event.digit)),
            EventKind::Backtrack => {
                let last = placed.pop().expect("backtrack without placement");
                assert_eq!(last, (event.position, event.digit));
            }
        })
        .unwrap();
        let SolveOutcome::Solved(solution) = outcome else {
            panic!("example puzzle must be solvable");
        };
        // The placements never undone are exactly the solved-in cells
        assert_eq!(placed.len(), Board::example().empty_count());
        for (pos, digit) in placed {
            assert_eq!(solution.digit(pos), Some(digit));
        }
    }

    #[test]
    fn test_stats_track_steps_and_depth() {
        let board = Board::example();
        let (outcome, stats) = Search::new(&board).unwrap().run();
        assert!(matches!(outcome, SolveOutcome::Solved(_)));
        assert!(stats.placements() > stats.backtracks());
        assert_eq!(stats.total_steps(), stats.placements() + stats.backtracks());
        assert_eq!(stats.max_depth(), board.empty_count());
    }

    #[test]
    fn test_observer_not_invoked_on_invalid_givens() {
        let mut board = Board::new();
        board.set(Position::new(0, 0), 5).unwrap();
        board.set(Position::new(0, 1), 5).unwrap();
        let mut calls = 0;
        let result = solve_with_observer(&board, |_| calls += 1);
        assert!(result.is_err());
        assert_eq!(calls, 0);
    }
}
