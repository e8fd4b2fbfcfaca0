//! Grid input types: the matrices a table extractor produces for a page.

/// A rectangular table of optional cell strings, row-major.
///
/// `None` marks a cell the extractor could not attribute any text to
/// (typically the covered part of a merged cell).
pub type Matrix = Vec<Vec<Option<String>>>;

/// What a table extractor found on one document page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageContent {
    /// Zero or more tables with a text layer.
    Tables(Vec<Matrix>),
    /// The page is an image without text; it cannot be read.
    ScannedImage,
}

/// Trimmed text of the cell at (`row`, `col`), or `None` when the cell is
/// out of range, absent, or blank.
pub fn cell_text(matrix: &Matrix, row: usize, col: usize) -> Option<&str> {
    matrix
        .get(row)?
        .get(col)?
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Untrimmed text of the cell, as the extractor produced it, when the cell
/// carries any non-whitespace text.
pub fn raw_cell(matrix: &Matrix, row: usize, col: usize) -> Option<&str> {
    matrix
        .get(row)?
        .get(col)?
        .as_deref()
        .filter(|text| !text.trim().is_empty())
}

/// Width of the widest row.
pub fn column_count(matrix: &Matrix) -> usize {
    matrix.iter().map(Vec::len).max().unwrap_or(0)
}
