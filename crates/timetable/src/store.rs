//! Memoized, atomically published schedules.
//!
//! A [`ScheduleStore`] owns the schedule of one class. Readers get the
//! currently published [`ScheduleIndex`] by cloning an `Arc`; a rebuild
//! assembles a fresh index off to the side and swaps it in only when the
//! whole document parsed. A failed rebuild leaves the previous index in place
//! and records why.
//!
//! Rebuilds are time-boxed by [`StoreOptions::freshness`] and short-circuited
//! by the content fingerprint: an unchanged document renews the published
//! index, and a fingerprint found in the [`ScheduleCache`] is published
//! without extraction. At most one rebuild per store runs at a time.

use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

use chrono::NaiveDate;
use serde::Serialize;
use timetable_core::{ScheduleIndex, parse_document};
use tracing::{debug, info, warn};

use crate::cache::ScheduleCache;
use crate::class::SchoolClass;
use crate::config::StoreOptions;
use crate::error::RefreshError;
use crate::extract::TableExtractor;
use crate::source::{DocumentSource, fingerprint};

/// The collaborators a store rebuilds with.
#[derive(Clone)]
pub struct Pipeline {
    pub source: Arc<dyn DocumentSource>,
    pub extractor: Arc<dyn TableExtractor>,
    pub cache: Option<Arc<dyn ScheduleCache>>,
}

impl Pipeline {
    pub fn new(source: Arc<dyn DocumentSource>, extractor: Arc<dyn TableExtractor>) -> Self {
        Self {
            source,
            extractor,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn ScheduleCache>) -> Self {
        self.cache = Some(cache);
        self
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("cache", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

/// What readers see: the last good index and, if the latest attempt failed,
/// the reason.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub index: Option<Arc<ScheduleIndex>>,
    pub stale_reason: Option<String>,
}

impl Snapshot {
    pub fn is_stale(&self) -> bool {
        self.stale_reason.is_some()
    }
}

/// Descriptive state of a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleInfo {
    pub class_name: String,
    pub department: Option<String>,
    pub resource: String,
    pub fingerprint: Option<String>,
    pub created: Option<NaiveDate>,
    pub lessons: usize,
    /// Outcome of the latest attempt, `None` before the first one.
    pub parse_result: Option<bool>,
    pub parse_error: Option<String>,
}

#[derive(Debug, Clone)]
struct Published {
    index: Arc<ScheduleIndex>,
    fingerprint: String,
    created: Option<NaiveDate>,
    checked_at: Instant,
}

#[derive(Debug, Default)]
struct Attempt {
    ok: Option<bool>,
    error: Option<String>,
}

/// Memoizing holder of one class's schedule.
#[derive(Debug)]
pub struct ScheduleStore {
    class: SchoolClass,
    resource: String,
    options: StoreOptions,
    pipeline: Arc<Pipeline>,
    published: RwLock<Option<Arc<Published>>>,
    attempt: Mutex<Attempt>,
    build: Mutex<()>,
}

impl ScheduleStore {
    /// A store for `class` reading `resource`.
    ///
    /// Without an explicit class token in `options`, the class's own token is
    /// used.
    pub fn new(
        class: SchoolClass,
        resource: impl Into<String>,
        pipeline: Arc<Pipeline>,
        mut options: StoreOptions,
    ) -> Self {
        if options.class_token.is_none() && !class.token().is_empty() {
            options.class_token = Some(class.token().to_string());
        }
        Self {
            class,
            resource: resource.into(),
            options,
            pipeline,
            published: RwLock::new(None),
            attempt: Mutex::new(Attempt::default()),
            build: Mutex::new(()),
        }
    }

    /// A store reading the class's own link, if it has one.
    pub fn for_class(
        class: SchoolClass,
        pipeline: Arc<Pipeline>,
        options: StoreOptions,
    ) -> Option<Self> {
        let resource = class.link.clone()?;
        Some(Self::new(class, resource, pipeline, options))
    }

    pub fn class(&self) -> &SchoolClass {
        &self.class
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// The published index, without refreshing.
    pub fn current(&self) -> Option<Arc<ScheduleIndex>> {
        self.published().map(|p| Arc::clone(&p.index))
    }

    /// The published index and latest failure, without refreshing.
    pub fn snapshot(&self) -> Snapshot {
        let attempt = self.attempt.lock().unwrap_or_else(PoisonError::into_inner);
        Snapshot {
            index: self.current(),
            stale_reason: match attempt.ok {
                Some(false) => attempt.error.clone(),
                _ => None,
            },
        }
    }

    /// The schedule, rebuilding first if the published one is missing or
    /// older than the freshness window.
    ///
    /// Callers arriving while a rebuild is in flight wait for it and reuse
    /// its result.
    pub fn get(&self) -> Snapshot {
        if self.is_fresh() {
            return self.snapshot();
        }
        let _build = self.build.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.is_fresh() {
            // recorded in the snapshot
            let _ = self.attempt_locked();
        }
        self.snapshot()
    }

    /// Rebuild now regardless of freshness.
    ///
    /// # Errors
    ///
    /// [`RefreshError`] if the attempt failed; the previously published index
    /// is still served.
    pub fn refresh(&self) -> Result<Arc<ScheduleIndex>, RefreshError> {
        let _build = self.build.lock().unwrap_or_else(PoisonError::into_inner);
        self.attempt_locked()
    }

    pub fn info(&self) -> ScheduleInfo {
        let published = self.published();
        let attempt = self.attempt.lock().unwrap_or_else(PoisonError::into_inner);
        ScheduleInfo {
            class_name: self.class.name.clone(),
            department: self.class.department.clone(),
            resource: self.resource.clone(),
            fingerprint: published.as_ref().map(|p| p.fingerprint.clone()),
            created: published.as_ref().and_then(|p| p.created),
            lessons: published.as_ref().map_or(0, |p| p.index.len()),
            parse_result: attempt.ok,
            parse_error: attempt.error.clone(),
        }
    }

    fn published(&self) -> Option<Arc<Published>> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn publish(&self, published: Published) {
        *self
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(published));
    }

    fn is_fresh(&self) -> bool {
        self.published()
            .is_some_and(|p| p.checked_at.elapsed() < self.options.freshness)
    }

    /// Cache entries depend on the parser's class token as well as the bytes.
    fn cache_key(&self, document_fingerprint: &str) -> String {
        match &self.options.class_token {
            Some(token) => format!(
                "{document_fingerprint}-{}",
                &fingerprint(token.as_bytes())[..8]
            ),
            None => document_fingerprint.to_string(),
        }
    }

    /// Must be called with the build lock held.
    fn attempt_locked(&self) -> Result<Arc<ScheduleIndex>, RefreshError> {
        let result = self.rebuild();
        let mut attempt = self.attempt.lock().unwrap_or_else(PoisonError::into_inner);
        match &result {
            Ok(_) => {
                *attempt = Attempt {
                    ok: Some(true),
                    error: None,
                };
            }
            Err(e) => {
                warn!(
                    class = %self.class.name,
                    resource = %self.resource,
                    error = %e,
                    "schedule rebuild failed"
                );
                *attempt = Attempt {
                    ok: Some(false),
                    error: Some(e.to_string()),
                };
            }
        }
        result
    }

    fn rebuild(&self) -> Result<Arc<ScheduleIndex>, RefreshError> {
        let document = self.pipeline.source.fetch(&self.resource)?;

        let previous = self
            .published()
            .filter(|p| p.fingerprint == document.fingerprint);
        if let Some(previous) = previous {
            debug!(
                class = %self.class.name,
                fingerprint = %document.fingerprint,
                "document unchanged"
            );
            let index = Arc::clone(&previous.index);
            self.publish(Published {
                checked_at: Instant::now(),
                ..(*previous).clone()
            });
            return Ok(index);
        }

        let key = self.cache_key(&document.fingerprint);
        if let Some(cache) = &self.pipeline.cache {
            match cache.get(&key) {
                Ok(Some(index)) => {
                    info!(
                        class = %self.class.name,
                        key = %key,
                        lessons = index.len(),
                        "published cached schedule"
                    );
                    let index = Arc::new(index);
                    self.publish(Published {
                        index: Arc::clone(&index),
                        fingerprint: document.fingerprint,
                        created: None,
                        checked_at: Instant::now(),
                    });
                    return Ok(index);
                }
                Ok(None) => {}
                Err(e) => warn!(key = %key, error = %e, "schedule cache read failed"),
            }
        }

        let extracted = self.pipeline.extractor.extract(&document.bytes)?;
        let index = parse_document(&extracted.pages, self.options.class_token.as_deref())?;

        if let Some(cache) = &self.pipeline.cache {
            if let Err(e) = cache.put(&key, &index) {
                warn!(key = %key, error = %e, "schedule cache write failed");
            }
        }

        info!(
            class = %self.class.name,
            fingerprint = %document.fingerprint,
            lessons = index.len(),
            "published schedule"
        );
        let index = Arc::new(index);
        self.publish(Published {
            index: Arc::clone(&index),
            fingerprint: document.fingerprint,
            created: extracted.created,
            checked_at: Instant::now(),
        });
        Ok(index)
    }
}
