//! Store options and environment settings.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Default freshness window of a published schedule.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(60 * 60);

pub const FRESHNESS_VAR: &str = "TIMETABLE_FRESHNESS_SECS";
pub const DATA_DIR_VAR: &str = "TIMETABLE_DATA_DIR";

/// Per-store behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// How long a published schedule is served without re-fetching.
    pub freshness: Duration,
    /// Group token for the cell parser. `None` recognises only the literal
    /// `"1 группа"` / `"2 группа"` markers.
    pub class_token: Option<String>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            freshness: DEFAULT_FRESHNESS,
            class_token: None,
        }
    }
}

impl StoreOptions {
    pub fn with_class_token(mut self, token: impl Into<String>) -> Self {
        self.class_token = Some(token.into());
        self
    }

    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }
}

/// Process-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub freshness: Duration,
    /// Persistent storage mount; the schedule cache lives under it.
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            freshness: DEFAULT_FRESHNESS,
            data_dir: None,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    /// - `TIMETABLE_FRESHNESS_SECS` (optional, default: 3600)
    /// - `TIMETABLE_DATA_DIR` (optional): persistent storage directory
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if the freshness is not a whole number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`Settings::from_env`] with a custom variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let freshness = match lookup(FRESHNESS_VAR) {
            Some(value) => {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeconds {
                        var: FRESHNESS_VAR,
                        value: value.clone(),
                    })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_FRESHNESS,
        };
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);
        Ok(Self {
            freshness,
            data_dir,
        })
    }

    /// Directory of the persistent schedule cache.
    pub fn cache_dir(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join("schedules"))
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            freshness: self.freshness,
            class_token: None,
        }
    }
}
