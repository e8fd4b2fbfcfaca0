//! Lesson assembler: walks a classified matrix and fills a
//! [`ScheduleIndexBuilder`].
//!
//! Row-oriented tables (days across the header row) are laid out as
//!
//! ```text
//!            | hour | Пн        | Вт        | …
//!   week     | 1    | Химия 305 | Алгебра   |
//!            | 2    |           | Физика    |   <- empty under "Химия 305":
//!   week     | 1    | …                          continuation, Химия ends at 2
//! ```
//!
//! with an optional week-parity column left of the hour column. Column-oriented
//! tables transpose this: days run down the header column, hour labels sit in
//! the row directly above the first day, and the parity column is left of the
//! day column.
//!
//! Week parity is sticky inside one matrix: a row (or day block) without a
//! readable parity value inherits the previous one. Every matrix starts again
//! at week 1.

use crate::cell::CellParser;
use crate::error::ScheduleError;
use crate::grid::{Matrix, PageContent, cell_text, column_count, raw_cell};
use crate::index::{Placement, ScheduleIndex, ScheduleIndexBuilder};
use crate::lesson::{Lesson, LessonIdent};
use crate::orientation::{HeaderLayout, Orientation, detect_page};
use crate::weekday::Weekday;

/// Parity assumed until a matrix states one.
pub const DEFAULT_WEEK: u32 = 1;

/// Counters from assembling one or more matrices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    /// Lessons inserted as top-level entries.
    pub lessons: usize,
    /// Lessons attached as group splits.
    pub group_children: usize,
    /// Empty cells that extended an earlier lesson's hour-end.
    pub continuations: usize,
    /// Non-empty cells that carried no lesson (decorative text, repeated
    /// headers).
    pub skipped: usize,
}

impl AssemblyStats {
    fn add(&mut self, other: AssemblyStats) {
        self.lessons += other.lessons;
        self.group_children += other.group_children;
        self.continuations += other.continuations;
        self.skipped += other.skipped;
    }
}

/// Walks matrices with one cell parser.
#[derive(Debug, Clone)]
pub struct Assembler<'p> {
    parser: &'p CellParser,
}

impl<'p> Assembler<'p> {
    pub fn new(parser: &'p CellParser) -> Self {
        Self { parser }
    }

    /// Assemble one matrix whose header has been located.
    pub fn assemble_matrix(
        &self,
        matrix: &Matrix,
        layout: &HeaderLayout,
        builder: &mut ScheduleIndexBuilder,
    ) -> AssemblyStats {
        match layout.orientation() {
            Orientation::Rows => self.walk_rows(matrix, layout, builder),
            Orientation::Columns => self.walk_columns(matrix, layout, builder),
        }
    }

    /// Classify and assemble every matrix of a page.
    ///
    /// # Errors
    ///
    /// The detector's [`TableLayoutError`](crate::TableLayoutError); nothing
    /// is added to `builder` in that case.
    pub fn assemble_page(
        &self,
        matrices: &[Matrix],
        builder: &mut ScheduleIndexBuilder,
    ) -> Result<AssemblyStats, crate::TableLayoutError> {
        let layouts = detect_page(matrices)?;
        let mut stats = AssemblyStats::default();
        for (i, layout) in &layouts {
            stats.add(self.assemble_matrix(&matrices[*i], layout, builder));
        }
        Ok(stats)
    }

    /// Assemble a whole document into a fresh index.
    ///
    /// Every page is attempted; a page that fails contributes nothing. If
    /// any page failed, the first failure is returned and the partial index
    /// is discarded.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::EmptyDocument`] when `pages` is empty.
    /// - [`ScheduleError::ScannedPage`] for an image-only page.
    /// - [`ScheduleError::Layout`] when a page's headers cannot be classified.
    pub fn assemble_document(&self, pages: &[PageContent]) -> Result<ScheduleIndex, ScheduleError> {
        if pages.is_empty() {
            return Err(ScheduleError::EmptyDocument);
        }
        let mut builder = ScheduleIndexBuilder::new();
        let mut stats = AssemblyStats::default();
        let mut first_error = None;

        for (page, content) in pages.iter().enumerate() {
            let result = match content {
                PageContent::Tables(matrices) => self
                    .assemble_page(matrices, &mut builder)
                    .map_err(|source| ScheduleError::Layout { page, source }),
                PageContent::ScannedImage => Err(ScheduleError::ScannedPage { page }),
            };
            match result {
                Ok(page_stats) => stats.add(page_stats),
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(page, error = %err, "page dropped");
                    first_error.get_or_insert(err);
                }
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            lessons = stats.lessons,
            group_children = stats.group_children,
            continuations = stats.continuations,
            skipped = stats.skipped,
            "document assembled"
        );
        Ok(builder.freeze())
    }

    fn walk_rows(
        &self,
        matrix: &Matrix,
        layout: &HeaderLayout,
        builder: &mut ScheduleIndexBuilder,
    ) -> AssemblyStats {
        let mut stats = AssemblyStats::default();
        let Some(header_row) = layout.row_index() else {
            return stats;
        };
        let first_day_col = layout.first_day_index();
        let hour_col = first_day_col.checked_sub(1);
        let week_col = first_day_col.checked_sub(2);
        let width = column_count(matrix);
        let first_data_row = header_row + 1;

        let mut week = DEFAULT_WEEK;
        let mut prev_hour: Option<String> = None;
        let mut carries: Vec<Option<Carry<'_>>> = vec![None; width];

        for (n, r) in (first_data_row..matrix.len()).enumerate() {
            // a blank cell in the hour column is merged with the one above
            let hour = match hour_col {
                Some(c) => cell_text(matrix, r, c)
                    .map(hour_label)
                    .or_else(|| prev_hour.clone())
                    .unwrap_or_else(|| (n + 1).to_string()),
                None => (n + 1).to_string(),
            };
            if let Some(w) = week_col.and_then(|c| cell_text(matrix, r, c)).and_then(parse_week) {
                week = w;
            }

            let mut covered: Vec<Weekday> = Vec::new();
            for c in first_day_col..width {
                let Some(day) = layout.owning_weekday(c) else {
                    continue;
                };
                match raw_cell(matrix, r, c) {
                    Some(raw) => {
                        let ident = LessonIdent::new(week, &hour, day);
                        let placed = self.place(builder, ident.clone(), raw, &mut stats);
                        if placed == Placed::WholeClass {
                            covered.push(day);
                        }
                        carries[c] = Some(Carry { ident, raw });
                    }
                    // spanned horizontally by a whole-class cell of this row
                    None if covered.contains(&day) => carries[c] = None,
                    None => {
                        let Some(carry) = carries[c].as_ref() else {
                            continue;
                        };
                        if carry.ident.week != week {
                            carries[c] = None;
                        } else if carry.ident.hour_start != hour
                            && !continue_lesson(builder, carry, &hour, &mut stats)
                        {
                            carries[c] = None;
                        }
                    }
                }
            }
            prev_hour = Some(hour);
        }
        stats
    }

    fn walk_columns(
        &self,
        matrix: &Matrix,
        layout: &HeaderLayout,
        builder: &mut ScheduleIndexBuilder,
    ) -> AssemblyStats {
        let mut stats = AssemblyStats::default();
        let Some(day_col) = layout.column_index() else {
            return stats;
        };
        let first_day_row = layout.first_day_index();
        let hour_row = first_day_row.checked_sub(1);
        let week_col = day_col.checked_sub(1);
        let width = column_count(matrix);

        let hours: Vec<String> = (day_col + 1..width)
            .map(|c| {
                hour_row
                    .and_then(|r| cell_text(matrix, r, c))
                    .map(hour_label)
                    .unwrap_or_else(|| (c - day_col).to_string())
            })
            .collect();

        let mut week = DEFAULT_WEEK;
        for r in first_day_row..matrix.len() {
            let Some(day) = layout.owning_weekday(r) else {
                continue;
            };
            if let Some(w) = week_col.and_then(|c| cell_text(matrix, r, c)).and_then(parse_week) {
                week = w;
            }

            let mut carry: Option<Carry<'_>> = None;
            for (k, hour) in hours.iter().enumerate() {
                let c = day_col + 1 + k;
                match raw_cell(matrix, r, c) {
                    Some(raw) => {
                        let ident = LessonIdent::new(week, hour, day);
                        self.place(builder, ident.clone(), raw, &mut stats);
                        carry = Some(Carry { ident, raw });
                    }
                    None => {
                        if carry
                            .as_ref()
                            .is_some_and(|held| !continue_lesson(builder, held, hour, &mut stats))
                        {
                            carry = None;
                        }
                    }
                }
            }
        }
        stats
    }

    fn place(
        &self,
        builder: &mut ScheduleIndexBuilder,
        ident: LessonIdent,
        raw: &str,
        stats: &mut AssemblyStats,
    ) -> Placed {
        // a repeated weekday header inside the grid is not a lesson
        if Weekday::from_label(raw).is_some() {
            stats.skipped += 1;
            return Placed::Nothing;
        }
        let cell = self.parser.parse(raw);
        if !cell.is_lesson() {
            stats.skipped += 1;
            return Placed::Nothing;
        }
        let placed = if cell.group.is_empty() {
            Placed::WholeClass
        } else {
            Placed::Group
        };
        match builder.insert(Lesson::new(ident, cell)) {
            Placement::TopLevel => stats.lessons += 1,
            Placement::GroupChild => stats.group_children += 1,
        }
        placed
    }
}

/// What a non-empty cell contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placed {
    Nothing,
    WholeClass,
    Group,
}

/// The last lesson cell of a column (or row), which empty cells after it
/// keep extending until one of them fails to.
#[derive(Debug, Clone)]
struct Carry<'m> {
    ident: LessonIdent,
    raw: &'m str,
}

fn continue_lesson(
    builder: &mut ScheduleIndexBuilder,
    carry: &Carry<'_>,
    hour: &str,
    stats: &mut AssemblyStats,
) -> bool {
    let extended = builder.extend(&carry.ident, carry.raw, hour);
    if extended {
        #[cfg(feature = "tracing")]
        tracing::debug!(ident = %carry.ident, hour_end = hour, "lesson continues");
        stats.continuations += 1;
    }
    extended
}

/// Collapse internal whitespace of an hour cell ("8:30\n9:15" -> "8:30 9:15").
fn hour_label(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First run of ASCII digits in a parity cell ("2", "2 неделя").
fn parse_week(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
