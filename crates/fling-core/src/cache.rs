//! Solution cache contract.
//!
//! A cache maps the canonical key of an initial board to the outcome of a
//! previous search: the recorded solution, or a marker saying the board was
//! proven unsolvable. The solver works without one; backends live wherever
//! storage does (see `MemoryCache` here, file storage in the CLI).

use crate::board::{Board, BoardError, Move, Piece};
use crate::solver::{Outcome, Solution};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use thiserror::Error;

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur during cache operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("corrupt cache record: {0}")]
    Corrupt(String),

    #[error("cache backend unavailable")]
    Unavailable,

    #[error("cannot key board: {0}")]
    Key(#[from] BoardError),
}

/// Stored outcome of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheStatus {
    Solved,
    Unsolvable,
}

/// One cached puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Canonical key of the initial board
    pub puzzle: String,
    pub status: CacheStatus,
    /// Canonical pieces of the board after each move (empty when unsolvable)
    #[serde(default)]
    pub history: Vec<Vec<Piece>>,
    /// Moves of the solution (empty when unsolvable)
    #[serde(default)]
    pub path: Vec<Move>,
}

impl CacheRecord {
    pub fn solved(solution: &Solution) -> CacheResult<Self> {
        Ok(Self {
            puzzle: solution.initial().canonical_key()?,
            status: CacheStatus::Solved,
            history: solution.history().iter().map(Board::canonical).collect(),
            path: solution.path().to_vec(),
        })
    }

    pub fn unsolvable(board: &Board) -> CacheResult<Self> {
        Ok(Self {
            puzzle: board.canonical_key()?,
            status: CacheStatus::Unsolvable,
            history: Vec::new(),
            path: Vec::new(),
        })
    }

    /// Turn the record back into a lookup result for `initial`.
    ///
    /// Solutions are rebuilt on `initial`'s grid and replayed; a record that
    /// does not replay is reported as corrupt.
    pub fn into_lookup(self, initial: &Board) -> CacheResult<CacheLookup> {
        let key = initial.canonical_key()?;
        if self.puzzle != key {
            return Err(CacheError::Corrupt(format!(
                "record for {} returned for {}",
                self.puzzle, key
            )));
        }

        match self.status {
            CacheStatus::Unsolvable => Ok(CacheLookup::Unsolvable),
            CacheStatus::Solved => {
                let history = self
                    .history
                    .into_iter()
                    .map(|pieces| Board::new(initial.size(), pieces))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| CacheError::Corrupt(e.to_string()))?;

                let solution = Solution::new(initial.clone(), history, self.path);
                solution
                    .verify()
                    .map_err(|e| CacheError::Corrupt(e.to_string()))?;
                Ok(CacheLookup::Solved(solution))
            }
        }
    }
}

/// What the cache knows about a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Solved(Solution),
    Unsolvable,
    Absent,
}

/// Trait for solution cache backends
pub trait SolutionCache: Send + Sync {
    /// Fetch the record stored under a canonical key
    fn get(&self, puzzle: &str) -> CacheResult<Option<CacheRecord>>;

    /// Store a record, replacing any earlier one with the same key
    fn put(&self, record: CacheRecord) -> CacheResult<()>;

    /// Get backend name for display
    fn backend_name(&self) -> &'static str;
}

/// Look `board` up in `cache`
pub fn lookup(cache: &dyn SolutionCache, board: &Board) -> CacheResult<CacheLookup> {
    match cache.get(&board.canonical_key()?)? {
        Some(record) => record.into_lookup(board),
        None => Ok(CacheLookup::Absent),
    }
}

/// Record the outcome of searching `board`
pub fn store(cache: &dyn SolutionCache, board: &Board, outcome: &Outcome) -> CacheResult<()> {
    let record = match outcome {
        Outcome::Solved(solution) => CacheRecord::solved(solution)?,
        Outcome::Exhausted => CacheRecord::unsolvable(board)?,
    };
    cache.put(record)
}

// ==================== In-Memory Backend ====================

/// In-memory cache, for tests and throwaway runs
pub struct MemoryCache {
    records: Mutex<HashMap<String, CacheRecord>>,
    available: AtomicBool,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Make every operation fail with [`CacheError::Unavailable`]
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored records
    pub fn count(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    fn check_available(&self) -> CacheResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(CacheError::Unavailable)
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SolutionCache for MemoryCache {
    fn get(&self, puzzle: &str) -> CacheResult<Option<CacheRecord>> {
        self.check_available()?;
        let records = self
            .records
            .lock()
            .map_err(|_| CacheError::Storage("cache lock poisoned".into()))?;
        Ok(records.get(puzzle).cloned())
    }

    fn put(&self, record: CacheRecord) -> CacheResult<()> {
        self.check_available()?;
        let mut records = self
            .records
            .lock()
            .map_err(|_| CacheError::Storage("cache lock poisoned".into()))?;
        records.insert(record.puzzle.clone(), record);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "Memory"
    }
}
