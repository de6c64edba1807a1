//! Solution cache backends for the command line.
//!
//! Supports different backends based on environment:
//! - Local: JSON file in the user's data directory
//! - Test: in-memory, nothing persisted

use fling_core::{CacheError, CacheRecord, CacheResult, MemoryCache, SolutionCache};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Environment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// File-based storage
    Local,
    /// In-memory storage
    Test,
}

impl Environment {
    /// Detect environment from FLING_ENV variable
    pub fn detect() -> Self {
        Self::from_value(std::env::var("FLING_ENV").ok().as_deref())
    }

    fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("test") | Some("testing") => Environment::Test,
            _ => Environment::Local,
        }
    }
}

/// Open the cache backend for `env`, at `path` if given
pub fn open_cache(env: Environment, path: Option<PathBuf>) -> CacheResult<Box<dyn SolutionCache>> {
    match env {
        Environment::Test => Ok(Box::new(MemoryCache::new())),
        Environment::Local => {
            let path = path.unwrap_or_else(LocalCache::default_path);
            Ok(Box::new(LocalCache::open(path)?))
        }
    }
}

// ==================== Local File Backend ====================

/// All cached puzzles in one JSON file
pub struct LocalCache {
    path: PathBuf,
    data: Mutex<LocalCacheData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LocalCacheData {
    records: Vec<CacheRecord>,
}

impl LocalCache {
    /// Get the default cache file path
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fling_solutions.json")
    }

    /// Open the cache file, starting empty if it does not exist yet.
    ///
    /// An unreadable file is also treated as empty; the next `put` rewrites it.
    pub fn open(path: impl Into<PathBuf>) -> CacheResult<Self> {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "discarding corrupt solution cache");
                LocalCacheData::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => LocalCacheData::default(),
            Err(e) => return Err(CacheError::Storage(format!("{}: {}", path.display(), e))),
        };
        debug!(path = %path.display(), records = data.records.len(), "opened solution cache");

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    fn save(&self, data: &LocalCacheData) -> CacheResult<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| CacheError::Storage(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CacheError::Storage(e.to_string()))?;
        }
        std::fs::write(&self.path, json).map_err(|e| CacheError::Storage(e.to_string()))
    }
}

impl SolutionCache for LocalCache {
    fn get(&self, puzzle: &str) -> CacheResult<Option<CacheRecord>> {
        let data = self
            .data
            .lock()
            .map_err(|_| CacheError::Storage("cache lock poisoned".into()))?;
        Ok(data.records.iter().find(|r| r.puzzle == puzzle).cloned())
    }

    fn put(&self, record: CacheRecord) -> CacheResult<()> {
        let mut data = self
            .data
            .lock()
            .map_err(|_| CacheError::Storage("cache lock poisoned".into()))?;

        match data.records.iter_mut().find(|r| r.puzzle == record.puzzle) {
            Some(existing) => *existing = record,
            None => data.records.push(record),
        }

        self.save(&data)
    }

    fn backend_name(&self) -> &'static str {
        "Local"
    }
}
