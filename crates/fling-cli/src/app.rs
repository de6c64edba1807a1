//! One solver run: show the puzzle, solve it (or recall it), report.

use crate::render::Renderer;
use fling_core::{Board, Outcome, SearchReport, SolutionCache, SolveError, Solver};
use std::io::{self, Write};
use thiserror::Error;

pub struct App {
    board: Board,
    cache: Option<Box<dyn SolutionCache>>,
    renderer: Renderer,
}

impl App {
    pub fn new(board: Board, cache: Option<Box<dyn SolutionCache>>, color: bool) -> Self {
        Self {
            board,
            cache,
            renderer: Renderer::new(color),
        }
    }

    /// Solve the puzzle and write the report to `out`
    pub fn run(&self, out: &mut impl Write) -> Result<SearchReport, AppError> {
        writeln!(out, "{}", self.renderer.board(&self.board))?;

        let report = Solver::new().solve(&self.board, self.cache.as_deref())?;

        match (&report.outcome, report.cached) {
            (Outcome::Solved(solution), true) => {
                writeln!(out, "Using cached solution...")?;
                write!(out, "{}", self.renderer.solution(solution))?;
            }
            (Outcome::Solved(solution), false) => {
                writeln!(out, "Solved in {} moves\n", solution.len())?;
                write!(out, "{}", self.renderer.solution(solution))?;
                writeln!(out, "{}", report.stats)?;
            }
            (Outcome::Exhausted, true) => {
                writeln!(out, "Using cached...")?;
                writeln!(out, "No solution found")?;
            }
            (Outcome::Exhausted, false) => {
                writeln!(out, "No solution found")?;
                writeln!(out, "{}", report.stats)?;
            }
        }

        Ok(report)
    }
}

/// Errors that end a run
#[derive(Debug, Error)]
pub enum AppError {
    #[error("output error: {0}")]
    Io(#[from] io::Error),

    #[error("solver error: {0}")]
    Solve(#[from] SolveError),
}
