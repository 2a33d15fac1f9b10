//! Search decision events for animated solving.

use solvoku_core::{Digit, Position};

/// The kind of a search decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A candidate digit was placed in an empty cell.
    Place,
    /// A previously placed digit was removed while backtracking.
    Backtrack,
}

/// One search decision: a digit placed in or removed from a cell.
///
/// Events form an ordered log of the search. They are consumed immediately
/// by an observer (typically a renderer pacing an animation) and are never
/// persisted. Every `Backtrack` event undoes the most recent `Place` event
/// that has not already been undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchEvent {
    /// The cell the decision applies to.
    pub position: Position,
    /// The digit placed or removed.
    pub digit: Digit,
    /// Whether the digit was placed or removed.
    pub kind: EventKind,
}
