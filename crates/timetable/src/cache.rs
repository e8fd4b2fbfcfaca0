//! Persistent schedule cache keyed by content fingerprint.
//!
//! A hit lets the store publish a schedule without re-extracting or
//! re-parsing a document it has already seen, including across restarts when
//! [`JsonFileCache`] points at persistent storage.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use timetable_core::ScheduleIndex;

use crate::error::CacheError;

/// Storage for built schedules.
pub trait ScheduleCache: Send + Sync {
    /// Look up the schedule stored under `key`.
    ///
    /// # Errors
    ///
    /// [`CacheError`] when the entry exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<ScheduleIndex>, CacheError>;

    /// Store `index` under `key`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// [`CacheError`] when the entry cannot be written.
    fn put(&self, key: &str, index: &ScheduleIndex) -> Result<(), CacheError>;
}

/// Process-local cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, ScheduleIndex>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ScheduleCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<ScheduleIndex>, CacheError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, index: &ScheduleIndex) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), index.clone());
        Ok(())
    }
}

/// One `<key>.json` file per schedule in a directory.
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    dir: PathBuf,
}

impl JsonFileCache {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CacheError + '_ {
    move |source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl ScheduleCache for JsonFileCache {
    fn get(&self, key: &str) -> Result<Option<ScheduleIndex>, CacheError> {
        let path = self.entry_path(key);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path)(e)),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn put(&self, key: &str, index: &ScheduleIndex) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let path = self.entry_path(key);
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_vec(index)?;
        std::fs::write(&tmp, json).map_err(io_error(&tmp))?;
        // readers never observe a half-written entry
        std::fs::rename(&tmp, &path).map_err(io_error(&path))
    }
}
