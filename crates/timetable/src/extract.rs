//! Turning document bytes into per-page table matrices.
//!
//! [`TableExtractor`] is the seam to the table extraction backend. The
//! provided [`JsonTableExtractor`] reads matrices that were extracted ahead of
//! time and saved as JSON, in one of two shapes:
//!
//! ```json
//! {"created": "01.09.2026",
//!  "pages": [{"page": 1, "tables": [[["", "Пн"], ["1", "Химия 305"]]]},
//!            {"page": 2, "scanned": true}]}
//! ```
//!
//! or the flat table list written by `pdfplumber tables --format json`:
//!
//! ```json
//! [{"page": 1, "bbox": {...}, "rows": [["", "Пн"], ["1", "Химия 305"]]}]
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use timetable_core::{Matrix, PageContent};

use crate::error::ExtractError;

/// Pages extracted from one source document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedDocument {
    pub pages: Vec<PageContent>,
    /// Date the timetable was issued, when the document states it.
    pub created: Option<NaiveDate>,
}

/// Converts raw document bytes into page contents.
pub trait TableExtractor: Send + Sync {
    /// # Errors
    ///
    /// [`ExtractError`] when the bytes cannot be interpreted.
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument, ExtractError>;
}

/// Paged matrices document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TablesDocument {
    /// Issue date as `dd.mm.yyyy`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    pub pages: Vec<TablesPage>,
}

/// One page of a [`TablesDocument`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TablesPage {
    /// 1-based page number, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default)]
    pub tables: Vec<Matrix>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub scanned: bool,
}

/// One entry of the flat table list.
#[derive(Debug, Clone, Deserialize)]
struct FlatTable {
    page: usize,
    rows: Matrix,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Input {
    Paged(TablesDocument),
    Flat(Vec<FlatTable>),
}

impl From<TablesPage> for PageContent {
    fn from(page: TablesPage) -> Self {
        if page.scanned {
            PageContent::ScannedImage
        } else {
            PageContent::Tables(page.tables)
        }
    }
}

/// Reads pre-extracted matrices from JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTableExtractor;

impl JsonTableExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TableExtractor for JsonTableExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument, ExtractError> {
        if bytes.starts_with(b"%PDF") {
            return Err(ExtractError::Unsupported(
                "PDF input needs a table extraction backend; pass a JSON matrices document"
                    .to_string(),
            ));
        }

        match serde_json::from_slice::<Input>(bytes)? {
            Input::Paged(doc) => Ok(ExtractedDocument {
                created: doc.created.as_deref().and_then(parse_created),
                pages: doc.pages.into_iter().map(PageContent::from).collect(),
            }),
            Input::Flat(tables) => {
                let mut by_page: BTreeMap<usize, Vec<Matrix>> = BTreeMap::new();
                for table in tables {
                    by_page.entry(table.page).or_default().push(table.rows);
                }
                Ok(ExtractedDocument {
                    created: None,
                    pages: by_page.into_values().map(PageContent::Tables).collect(),
                })
            }
        }
    }
}

/// Parse a `dd.mm.yyyy` issue date, tolerating surrounding text.
pub fn parse_created(text: &str) -> Option<NaiveDate> {
    text.split_whitespace()
        .find_map(|word| NaiveDate::parse_from_str(word.trim_matches(','), "%d.%m.%Y").ok())
}
