//! timetable-core: Backend-independent data types and algorithms.
//!
//! This crate turns the text grids of a weekly class timetable into a
//! queryable [`ScheduleIndex`]:
//!
//! - [`orientation`]: locate the weekday header row or column
//! - [`cell`]: decompose one cell into subject, room, teacher and group
//! - [`assembler`]: walk a matrix, merging multi-hour and split-group cells
//! - [`index`]: the frozen (week, weekday, hour) → lesson map and its queries
//!
//! It performs no I/O. Fetching documents and turning pages into matrices is
//! left to the caller.

pub mod assembler;
pub mod cell;
pub mod error;
pub mod grid;
pub mod index;
pub mod lesson;
pub mod orientation;
pub mod render;
pub mod weekday;

pub use assembler::{Assembler, AssemblyStats, DEFAULT_WEEK};
pub use cell::{Accumulator, CellParser, Field, ParsedCell, Step};
pub use error::{ScheduleError, TableLayoutError};
pub use grid::{Matrix, PageContent};
pub use index::{Placement, ScheduleIndex, ScheduleIndexBuilder};
pub use lesson::{Lesson, LessonIdent};
pub use orientation::{HeaderLayout, Orientation, detect_matrix, detect_page};
pub use render::{RenderOptions, hour_range, render_day, render_lesson};
pub use weekday::{WEEKDAYS, Weekday};

/// Parse a whole document with a parser for `class_token`.
///
/// Convenience for [`Assembler::assemble_document`].
///
/// # Errors
///
/// See [`Assembler::assemble_document`].
pub fn parse_document(
    pages: &[PageContent],
    class_token: Option<&str>,
) -> Result<ScheduleIndex, ScheduleError> {
    let parser = CellParser::new(class_token);
    Assembler::new(&parser).assemble_document(pages)
}
