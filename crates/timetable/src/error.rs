//! Error types for the fetch → extract → assemble pipeline.
//!
//! Uses [`thiserror`] for ergonomic error derivation. [`RefreshError`] is the
//! reason recorded when a schedule rebuild fails; the previously published
//! schedule stays in place.

use std::path::PathBuf;

use thiserror::Error;
use timetable_core::ScheduleError;

/// Failure to retrieve a source document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Reading a local document failed.
    #[error("cannot read {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    /// The remote end answered with a non-success status.
    #[error("{resource} answered with status {status}")]
    Status { resource: String, status: u16 },

    /// The remote end could not be reached.
    #[error("network failure: {0}")]
    Network(String),
}

/// Failure to turn document bytes into table matrices.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The matrices document is not valid JSON of the expected shape.
    #[error("invalid tables document: {0}")]
    Json(#[from] serde_json::Error),

    /// The bytes are not something this extractor understands.
    #[error("unsupported document: {0}")]
    Unsupported(String),
}

/// Failure of the persistent schedule cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt cache entry: {0}")]
    Json(#[from] serde_json::Error),
}

/// Invalid settings in the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidSeconds { var: &'static str, value: String },
}

/// Why a schedule rebuild did not publish a new index.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}
