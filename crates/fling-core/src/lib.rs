//! Fling puzzle engine.
//!
//! Pieces sit on a fixed grid. A move flings one piece toward a neighbour on
//! its row or column; the struck piece either falls off the end of the line or
//! passes the impact on, until exactly one piece has been knocked out. The
//! puzzle is solved when a single piece remains.
//!
//! The engine is split the same way the rules are:
//!
//! - [`board`]: piece positions, grid dimensions, moves and canonical encoding
//! - [`movegen`]: which flings are legal on a board
//! - [`physics`]: what a fling does to a board
//! - [`solver`]: depth-first backtracking search over flings
//! - [`cache`]: storage contract for previously solved puzzles

pub mod board;
pub mod cache;
pub mod movegen;
pub mod physics;
pub mod solver;

pub use board::{Axis, Board, BoardError, GridSize, Move, Piece};
pub use cache::{
    CacheError, CacheLookup, CacheRecord, CacheResult, CacheStatus, MemoryCache, SolutionCache,
};
pub use movegen::legal_moves;
pub use physics::{apply, FlingError};
pub use solver::{Outcome, SearchReport, Solution, SolveError, Solver, Stats, Trail};
