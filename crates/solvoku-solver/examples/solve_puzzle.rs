//! Example demonstrating the backtracking solver.
//!
//! This example shows how to:
//! - Parse a board from grid text
//! - Validate the givens before searching
//! - Solve the board and display the solution
//! - Trace every placement and backtrack of the search
//!
//! # Usage
//!
//! Solve the bundled example puzzle:
//!
//! ```sh
//! cargo run --example solve_puzzle
//! ```
//!
//! Solve a puzzle given as grid text (`1`-`9` digits, `_`/`.`/`0` empty,
//! whitespace ignored):
//!
//! ```sh
//! cargo run --example solve_puzzle -- --grid "$(cat my_puzzle.txt)"
//! ```
//!
//! Print every search decision while solving:
//!
//! ```sh
//! cargo run --example solve_puzzle -- --trace
//! ```

use std::process;

use clap::Parser;
use solvoku_core::Board;
use solvoku_solver::{EventKind, Search, SearchStep, SolveOutcome};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Grid text for the puzzle to solve. Defaults to the bundled example.
    #[arg(long, value_name = "GRID")]
    grid: Option<String>,

    /// Print every placement and backtrack of the search.
    #[arg(long)]
    trace: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let board = match &args.grid {
        Some(text) => match text.parse::<Board>() {
            Ok(board) => board,
            Err(err) => {
                eprintln!("invalid grid: {err}");
                process::exit(2);
            }
        },
        None => Board::example(),
    };

    println!("Puzzle:\n{board}\n");

    let mut search = match Search::new(&board) {
        Ok(search) => search,
        Err(conflict) => {
            eprintln!("invalid puzzle: {conflict}");
            process::exit(2);
        }
    };

    let outcome = loop {
        match search.advance() {
            SearchStep::Placed(event) | SearchStep::Backtracked(event) => {
                if args.trace {
                    let action = match event.kind {
                        EventKind::Place => "place",
                        EventKind::Backtrack => "undo ",
                    };
                    println!("{action} {} at {}", event.digit, event.position);
                }
            }
            SearchStep::Solved => break SolveOutcome::Solved(search.board().clone()),
            SearchStep::Exhausted => break SolveOutcome::Unsolvable,
        }
    };

    let stats = search.stats();
    log::info!(
        "search finished: {} placements, {} backtracks, max depth {}",
        stats.placements(),
        stats.backtracks(),
        stats.max_depth()
    );

    match outcome {
        SolveOutcome::Solved(solution) => println!("Solution:\n{solution}"),
        SolveOutcome::Unsolvable => {
            eprintln!("no solution exists for this puzzle");
            process::exit(1);
        }
    }
}
