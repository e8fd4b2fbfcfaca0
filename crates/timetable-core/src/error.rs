//! Error types for timetable extraction.
//!
//! Provides [`TableLayoutError`] for a matrix or page whose weekday headers
//! cannot be located or classified, and [`ScheduleError`] for a document-level
//! failure that prevents a schedule index from being published.
//!
//! Cells whose room, teacher or group cannot be recognized are not errors:
//! the field is left empty and assembly continues.

use thiserror::Error;

/// Failure to classify the layout of a page's tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableLayoutError {
    /// No cell of any matrix on the page names a weekday.
    #[error("weekday headers not found")]
    HeadersNotFound,

    /// Weekday cells were found but share neither one row nor one column.
    #[error("ambiguous header orientation")]
    AmbiguousOrientation,
}

/// Failure to build a schedule from a whole document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A page's tables could not be classified (page is 0-indexed).
    #[error("page {}: table layout error: {source}", .page + 1)]
    Layout {
        /// Page index (0-based).
        page: usize,
        /// The detector's reason.
        #[source]
        source: TableLayoutError,
    },

    /// A page carries only a scanned image, so there is no text grid to read.
    #[error("page {} is a scanned image without a text layer", .page + 1)]
    ScannedPage {
        /// Page index (0-based).
        page: usize,
    },

    /// The document contains no pages at all.
    #[error("document has no pages")]
    EmptyDocument,
}

impl ScheduleError {
    /// The layout reason, if this failure came from the orientation detector.
    pub fn layout(&self) -> Option<&TableLayoutError> {
        match self {
            ScheduleError::Layout { source, .. } => Some(source),
            _ => None,
        }
    }
}
