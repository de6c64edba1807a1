//! Depth-first backtracking search.
//!
//! From each board the solver tries every legal fling in generation order,
//! recursing on the result, until one piece is left. The first solution found
//! wins; no attempt is made to find a shorter one, and boards reached along
//! different branches are not deduplicated.

mod trail;

#[cfg(test)]
mod tests;

use crate::board::{Board, Move};
use crate::cache::{self, CacheLookup, SolutionCache};
use crate::movegen::legal_moves;
use crate::physics::{apply, FlingError};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

pub use trail::{Frame, Trail};

/// Errors that abort a search. Running out of moves is not one of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error(transparent)]
    Fling(#[from] FlingError),

    /// Board history and move path disagree in length after a success
    #[error("trail out of step: {history} boards for {path} moves")]
    TrailInconsistency { history: usize, path: usize },

    /// Replaying a solution did not reproduce its recorded boards
    #[error("solution does not replay at step {step}: {reason}")]
    InvalidSolution { step: usize, reason: String },
}

/// Counters for one search run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Legal moves enumerated, summed over every visited board
    pub edges_discovered: u64,
    /// Moves actually applied and recursed into
    pub edges_searched: u64,
    /// Moves in the solution found
    pub solution_depth: u64,
    /// Moves that led to a dead end
    pub backtrack_depth: u64,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Edges discovered : {}", self.edges_discovered)?;
        writeln!(f, "Edges searched   : {}", self.edges_searched)?;
        writeln!(f, "Solution depth   : {}", self.solution_depth)?;
        write!(f, "Backtrack depth  : {}", self.backtrack_depth)
    }
}

/// A sequence of moves that takes a board down to one piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    initial: Board,
    history: Vec<Board>,
    path: Vec<Move>,
}

impl Solution {
    pub fn new(initial: Board, history: Vec<Board>, path: Vec<Move>) -> Self {
        Self {
            initial,
            history,
            path,
        }
    }

    pub fn initial(&self) -> &Board {
        &self.initial
    }

    /// Board after each move
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    pub fn path(&self) -> &[Move] {
        &self.path
    }

    /// Number of moves
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Each move paired with the board it produced
    pub fn steps(&self) -> impl Iterator<Item = (&Move, &Board)> {
        self.path.iter().zip(self.history.iter())
    }

    /// The board left at the end
    pub fn last_board(&self) -> &Board {
        self.history.last().unwrap_or(&self.initial)
    }

    /// Replay the path from the initial board and check it reproduces the
    /// recorded history and ends on a single piece.
    pub fn verify(&self) -> Result<(), SolveError> {
        if self.history.len() != self.path.len() {
            return Err(SolveError::TrailInconsistency {
                history: self.history.len(),
                path: self.path.len(),
            });
        }

        let mut current = self.initial.clone();
        for (step, (mv, expected)) in self.steps().enumerate() {
            let next = apply(mv, &current).map_err(|e| SolveError::InvalidSolution {
                step,
                reason: e.to_string(),
            })?;
            if next != *expected {
                return Err(SolveError::InvalidSolution {
                    step,
                    reason: format!("{mv} does not produce the recorded board"),
                });
            }
            current = next;
        }

        if current.len() != 1 {
            return Err(SolveError::InvalidSolution {
                step: self.path.len(),
                reason: format!("{} pieces left", current.len()),
            });
        }

        Ok(())
    }
}

/// How a search ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Solution),
    /// Every move sequence was tried and none left a single piece
    Exhausted,
}

impl Outcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            Outcome::Exhausted => None,
        }
    }
}

/// Result of [`Solver::solve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: Outcome,
    /// Zero when the outcome came from the cache
    pub stats: Stats,
    /// Whether the outcome was read from the cache instead of searched
    pub cached: bool,
}

/// Unit struct solver. Stateless, all state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Solve `board`, consulting `cache` first and recording the outcome in it
    /// afterwards.
    ///
    /// The cache is best-effort: a failed or corrupt lookup falls back to a
    /// fresh search and a failed store is only logged.
    pub fn solve(
        &self,
        board: &Board,
        cache: Option<&dyn SolutionCache>,
    ) -> Result<SearchReport, SolveError> {
        if let Some(cache) = cache {
            match cache::lookup(cache, board) {
                Ok(CacheLookup::Solved(solution)) => {
                    info!(backend = cache.backend_name(), moves = solution.len(), "using cached solution");
                    return Ok(SearchReport {
                        outcome: Outcome::Solved(solution),
                        stats: Stats::default(),
                        cached: true,
                    });
                }
                Ok(CacheLookup::Unsolvable) => {
                    info!(backend = cache.backend_name(), "cached as unsolvable");
                    return Ok(SearchReport {
                        outcome: Outcome::Exhausted,
                        stats: Stats::default(),
                        cached: true,
                    });
                }
                Ok(CacheLookup::Absent) => {}
                Err(err) => {
                    warn!(backend = cache.backend_name(), error = %err, "cache lookup failed, searching");
                }
            }
        }

        let (outcome, stats) = self.search(board)?;

        if let Some(cache) = cache {
            match cache::store(cache, board, &outcome) {
                Ok(()) => info!(backend = cache.backend_name(), "stored outcome"),
                Err(err) => warn!(backend = cache.backend_name(), error = %err, "failed to store outcome"),
            }
        }

        Ok(SearchReport {
            outcome,
            stats,
            cached: false,
        })
    }

    /// Search `board` without any cache.
    pub fn search(&self, board: &Board) -> Result<(Outcome, Stats), SolveError> {
        debug!(pieces = board.len(), "starting search");

        let mut trail = Trail::new();
        let mut stats = Stats::default();
        let solved = self.search_recursive(board, &mut trail, &mut stats)?;

        let outcome = if solved {
            if !trail.is_consistent() {
                return Err(SolveError::TrailInconsistency {
                    history: trail.history().len(),
                    path: trail.path().len(),
                });
            }
            let (history, path) = trail.into_parts();
            Outcome::Solved(Solution::new(board.clone(), history, path))
        } else {
            debug_assert!(trail.is_empty());
            Outcome::Exhausted
        };

        debug!(solved, ?stats, "search finished");
        Ok((outcome, stats))
    }

    fn search_recursive(
        &self,
        board: &Board,
        trail: &mut Trail,
        stats: &mut Stats,
    ) -> Result<bool, SolveError> {
        if board.len() == 1 {
            return Ok(true);
        }

        let moves = legal_moves(board);
        stats.edges_discovered += moves.len() as u64;

        for mv in moves {
            stats.edges_searched += 1;
            let next = apply(&mv, board)?;
            trace!(depth = trail.len(), %mv, "trying");

            let mut frame = trail.enter(next.clone(), mv);
            if self.search_recursive(&next, frame.trail(), stats)? {
                stats.solution_depth += 1;
                frame.commit();
                return Ok(true);
            }

            stats.backtrack_depth += 1;
        }

        Ok(false)
    }
}
