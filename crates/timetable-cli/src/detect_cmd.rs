use std::path::Path;

use timetable::{HeaderLayout, Orientation, PageContent, detect_matrix};

use crate::cli::OutputFormat;
use crate::shared::{print_json, read_document};

fn orientation_str(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Rows => "rows",
        Orientation::Columns => "columns",
    }
}

fn weekday_labels(layout: &HeaderLayout) -> Vec<&'static str> {
    layout
        .weekday_ordinals()
        .into_iter()
        .filter_map(timetable::Weekday::from_ordinal)
        .map(timetable::Weekday::abbreviation)
        .collect()
}

pub fn run(file: &Path, format: OutputFormat) -> Result<(), i32> {
    let document = read_document(file)?;

    match format {
        OutputFormat::Text => write_text(&document.pages),
        OutputFormat::Json => write_json(&document.pages),
    }
}

fn write_text(pages: &[PageContent]) -> Result<(), i32> {
    for (idx, page) in pages.iter().enumerate() {
        let tables = match page {
            PageContent::ScannedImage => {
                println!("Page {}: scanned image", idx + 1);
                continue;
            }
            PageContent::Tables(tables) => tables,
        };
        println!("Page {}:", idx + 1);
        if tables.is_empty() {
            println!("  No tables found.");
        }
        for (t, matrix) in tables.iter().enumerate() {
            match detect_matrix(matrix) {
                Ok(Some(layout)) => {
                    let position = match (layout.row_index(), layout.column_index()) {
                        (Some(row), _) => format!("header row {row}"),
                        (_, Some(column)) => format!("header column {column}"),
                        (None, None) => String::new(),
                    };
                    println!(
                        "  Table {}: {}, {}: {}",
                        t + 1,
                        orientation_str(layout.orientation()),
                        position,
                        weekday_labels(&layout).join(" ")
                    );
                }
                Ok(None) => println!("  Table {}: no weekday headers", t + 1),
                Err(e) => println!("  Table {}: {e}", t + 1),
            }
        }
    }
    Ok(())
}

fn write_json(pages: &[PageContent]) -> Result<(), i32> {
    let mut out = Vec::new();
    for (idx, page) in pages.iter().enumerate() {
        let tables = match page {
            PageContent::ScannedImage => {
                out.push(serde_json::json!({ "page": idx + 1, "scanned": true }));
                continue;
            }
            PageContent::Tables(tables) => tables,
        };
        let tables: Vec<serde_json::Value> = tables
            .iter()
            .map(|matrix| match detect_matrix(matrix) {
                Ok(Some(layout)) => serde_json::json!({
                    "orientation": orientation_str(layout.orientation()),
                    "row": layout.row_index(),
                    "column": layout.column_index(),
                    "weekdays": layout.weekday_ordinals(),
                }),
                Ok(None) => serde_json::json!({ "orientation": null }),
                Err(e) => serde_json::json!({ "orientation": null, "error": e.to_string() }),
            })
            .collect();
        out.push(serde_json::json!({ "page": idx + 1, "tables": tables }));
    }
    print_json(&serde_json::Value::Array(out))
}
