//! Orientation detection: find the weekday header line of a timetable.
//!
//! A timetable either lists the days across one header row (each day owns
//! one or more columns) or down one header column (each day owns one or
//! more rows). The detector locates every cell that names a weekday and
//! classifies the matrix by whether those cells line up in a row or in a
//! column.

use std::collections::BTreeMap;

use crate::error::TableLayoutError;
use crate::grid::{Matrix, cell_text};
use crate::weekday::Weekday;

/// How weekdays are laid out in a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Weekday names share one header row; days are columns.
    Rows,
    /// Weekday names share one header column; days are rows.
    Columns,
}

/// The located weekday header of one matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    orientation: Orientation,
    /// Header row (for [`Orientation::Rows`]) or header column.
    line: usize,
    /// First position each weekday was discovered at, as (row, column).
    positions: BTreeMap<Weekday, (usize, usize)>,
    /// Weekday by index along the header line: column index for
    /// [`Orientation::Rows`], row index for [`Orientation::Columns`].
    along: BTreeMap<usize, Weekday>,
}

impl HeaderLayout {
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The header row, for row-oriented tables. `None` for column-oriented
    /// ones.
    pub fn row_index(&self) -> Option<usize> {
        match self.orientation {
            Orientation::Rows => Some(self.line),
            Orientation::Columns => None,
        }
    }

    /// The header column, for column-oriented tables. `None` for
    /// row-oriented ones.
    pub fn column_index(&self) -> Option<usize> {
        match self.orientation {
            Orientation::Rows => None,
            Orientation::Columns => Some(self.line),
        }
    }

    /// Weekday whose header sits at `index` along the header line: a column
    /// index for row-oriented tables, a row index for column-oriented ones.
    pub fn weekday_at(&self, index: usize) -> Option<Weekday> {
        self.along.get(&index).copied()
    }

    /// Weekday owning `index`: its own header, or the nearest header before
    /// it along the line (multi-column or multi-row day blocks).
    pub fn owning_weekday(&self, index: usize) -> Option<Weekday> {
        self.along.range(..=index).next_back().map(|(_, day)| *day)
    }

    /// First index along the header line that carries a weekday.
    pub fn first_day_index(&self) -> usize {
        self.along.keys().next().copied().unwrap_or(0)
    }

    /// Where `day` was first found, as (row, column).
    pub fn position(&self, day: Weekday) -> Option<(usize, usize)> {
        self.positions.get(&day).copied()
    }

    /// Ordinals of the weekdays present, ascending regardless of the order
    /// they appear in the table.
    pub fn weekday_ordinals(&self) -> Vec<u8> {
        self.positions.keys().map(|day| day.ordinal()).collect()
    }
}

/// Classify a single matrix.
///
/// Returns `Ok(None)` when no cell names a weekday, so the caller can decide
/// whether that is fatal for the page.
///
/// # Errors
///
/// [`TableLayoutError::AmbiguousOrientation`] when weekday cells exist but
/// share neither a row nor a column.
pub fn detect_matrix(matrix: &Matrix) -> Result<Option<HeaderLayout>, TableLayoutError> {
    let mut hits: Vec<(usize, usize, Weekday)> = Vec::new();
    for (r, row) in matrix.iter().enumerate() {
        for c in 0..row.len() {
            if let Some(day) = cell_text(matrix, r, c).and_then(Weekday::from_label) {
                hits.push((r, c, day));
            }
        }
    }
    if hits.is_empty() {
        return Ok(None);
    }

    let mut positions = BTreeMap::new();
    for &(r, c, day) in &hits {
        positions.entry(day).or_insert((r, c));
    }

    let (first_row, first_col) = (hits[0].0, hits[0].1);
    let (orientation, line) = if positions.values().all(|&(r, _)| r == first_row) {
        (Orientation::Rows, first_row)
    } else if positions.values().all(|&(_, c)| c == first_col) {
        (Orientation::Columns, first_col)
    } else {
        return Err(TableLayoutError::AmbiguousOrientation);
    };

    let along = hits
        .iter()
        .filter_map(|&(r, c, day)| match orientation {
            Orientation::Rows if r == line => Some((c, day)),
            Orientation::Columns if c == line => Some((r, day)),
            _ => None,
        })
        .collect();

    Ok(Some(HeaderLayout {
        orientation,
        line,
        positions,
        along,
    }))
}

/// Classify every matrix of a page.
///
/// Returns the index and layout of each matrix that carries weekday headers;
/// matrices without any are skipped.
///
/// # Errors
///
/// - [`TableLayoutError::AmbiguousOrientation`] if any matrix is ambiguous.
/// - [`TableLayoutError::HeadersNotFound`] if no matrix on the page names a
///   weekday.
pub fn detect_page(matrices: &[Matrix]) -> Result<Vec<(usize, HeaderLayout)>, TableLayoutError> {
    let mut found = Vec::new();
    for (i, matrix) in matrices.iter().enumerate() {
        if let Some(layout) = detect_matrix(matrix)? {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                matrix = i,
                orientation = ?layout.orientation,
                line = layout.line,
                days = layout.positions.len(),
                "weekday headers located"
            );
            found.push((i, layout));
        }
    }
    if found.is_empty() {
        return Err(TableLayoutError::HeadersNotFound);
    }
    Ok(found)
}
