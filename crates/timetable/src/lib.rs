//! timetable: weekly class timetables from extracted document tables.
//!
//! This is the facade crate. It wires the extraction engine in
//! [`timetable_core`] to the outside world:
//!
//! - [`DocumentSource`] fetches document bytes and fingerprints them
//! - [`TableExtractor`] turns bytes into per-page table matrices
//! - [`ScheduleCache`] remembers built schedules by fingerprint
//! - [`ScheduleStore`] memoizes one class's schedule and publishes it
//!   atomically; [`Registry`] holds the stores of a whole school
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use timetable::{
//!     FileSource, JsonTableExtractor, Pipeline, ScheduleStore, SchoolClass, StoreOptions, Weekday,
//! };
//!
//! let pipeline = Pipeline::new(Arc::new(FileSource::new()), Arc::new(JsonTableExtractor));
//! let class = SchoolClass::new("10А", None);
//! let store = ScheduleStore::new(class, "10a.json", Arc::new(pipeline), StoreOptions::default());
//! if let Some(index) = store.get().index {
//!     for lesson in index.lesson_list(1, Weekday::Monday) {
//!         println!("{}", timetable::render_lesson(lesson, &Default::default()));
//!     }
//! }
//! ```

pub mod cache;
pub mod class;
pub mod config;
pub mod error;
pub mod extract;
pub mod registry;
pub mod source;
pub mod store;

pub use cache::{JsonFileCache, MemoryCache, ScheduleCache};
pub use class::SchoolClass;
pub use config::{DEFAULT_FRESHNESS, Settings, StoreOptions};
pub use error::{CacheError, ConfigError, ExtractError, FetchError, RefreshError};
pub use extract::{
    ExtractedDocument, JsonTableExtractor, TableExtractor, TablesDocument, TablesPage,
    parse_created,
};
pub use registry::{RefreshOutcome, Registry};
pub use source::{DocumentSource, FileSource, SourceDocument, fingerprint};
pub use store::{Pipeline, ScheduleInfo, ScheduleStore, Snapshot};

// Re-export the engine so consumers need only this crate.
pub use timetable_core::{
    Assembler, AssemblyStats, CellParser, HeaderLayout, Lesson, LessonIdent, Matrix, Orientation,
    PageContent, RenderOptions, ScheduleError, ScheduleIndex, TableLayoutError, WEEKDAYS, Weekday,
    detect_matrix, detect_page, hour_range, parse_document, render_day, render_lesson,
};
