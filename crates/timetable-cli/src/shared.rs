use std::path::Path;
use std::sync::Arc;

use timetable::{
    ExtractedDocument, FileSource, JsonFileCache, JsonTableExtractor, Pipeline, RenderOptions,
    ScheduleIndex, ScheduleStore, SchoolClass, Settings, TableExtractor, Weekday,
};

use crate::cli::SourceArgs;

/// Fail with a user-friendly message if `file` does not exist.
fn ensure_exists(file: &Path) -> Result<(), i32> {
    if file.exists() {
        Ok(())
    } else {
        eprintln!("Error: file not found: {}", file.display());
        Err(1)
    }
}

/// Read and extract a matrices document without assembling it.
pub fn read_document(file: &Path) -> Result<ExtractedDocument, i32> {
    ensure_exists(file)?;
    let bytes = std::fs::read(file).map_err(|e| {
        eprintln!("Error: cannot read {}: {e}", file.display());
        1
    })?;
    JsonTableExtractor.extract(&bytes).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

/// A store for the document named by `source`, honouring the environment
/// settings and the cache directory.
pub fn open_store(source: &SourceArgs) -> Result<ScheduleStore, i32> {
    ensure_exists(&source.file)?;
    let settings = Settings::from_env().map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let mut pipeline = Pipeline::new(Arc::new(FileSource::new()), Arc::new(JsonTableExtractor));
    if let Some(dir) = source.cache_dir.clone().or_else(|| settings.cache_dir()) {
        pipeline = pipeline.with_cache(Arc::new(JsonFileCache::new(dir)));
    }

    let class = SchoolClass::new(source.class.clone().unwrap_or_default(), None);
    Ok(ScheduleStore::new(
        class,
        source.file.display().to_string(),
        Arc::new(pipeline),
        settings.store_options(),
    ))
}

/// Build the schedule for `source`, printing the failure reason on error.
pub fn load_index(source: &SourceArgs) -> Result<Arc<ScheduleIndex>, i32> {
    let store = open_store(source)?;
    store.refresh().map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

/// Parse a weekday name or abbreviation.
pub fn parse_weekday(text: &str) -> Result<Weekday, i32> {
    Weekday::from_label(text).ok_or_else(|| {
        eprintln!("Error: invalid weekday: {text}");
        1
    })
}

pub fn render_options(html: bool) -> RenderOptions {
    RenderOptions { emphasis: html }
}

/// Lesson as JSON, children included.
pub fn lesson_json(lesson: &timetable::Lesson) -> serde_json::Value {
    serde_json::json!({
        "hours": timetable::hour_range(lesson),
        "subject": lesson.subject,
        "room": lesson.room,
        "group": lesson.group,
        "teacher": lesson.teacher,
        "raw": lesson.raw,
        "content_id": lesson.content_key(),
        "groups": lesson.groups.iter().map(lesson_json).collect::<Vec<_>>(),
    })
}

pub fn print_json(value: &serde_json::Value) -> Result<(), i32> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    println!("{json_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_weekday_accepts_abbreviation() {
        assert_eq!(parse_weekday("Пн"), Ok(Weekday::Monday));
        assert_eq!(parse_weekday("пятница"), Ok(Weekday::Friday));
    }

    #[test]
    fn parse_weekday_rejects_unknown() {
        assert_eq!(parse_weekday("Funday"), Err(1));
    }

    #[test]
    fn render_options_from_flag() {
        assert!(render_options(true).emphasis);
        assert!(!render_options(false).emphasis);
    }
}
