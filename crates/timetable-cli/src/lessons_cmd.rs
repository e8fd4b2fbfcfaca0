use timetable::render_day;

use crate::cli::{OutputFormat, SourceArgs};
use crate::shared::{lesson_json, load_index, parse_weekday, print_json, render_options};

pub fn run(
    source: &SourceArgs,
    week: u32,
    day: &str,
    html: bool,
    format: OutputFormat,
) -> Result<(), i32> {
    let day = parse_weekday(day)?;
    let index = load_index(source)?;
    let lessons = index.lesson_list(week, day);

    match format {
        OutputFormat::Text => {
            if lessons.is_empty() {
                println!("No lessons.");
            } else {
                println!("{}", render_day(&lessons, &render_options(html)));
            }
            Ok(())
        }
        OutputFormat::Json => {
            let lessons: Vec<serde_json::Value> =
                lessons.into_iter().map(lesson_json).collect();
            print_json(&serde_json::json!({
                "week": week,
                "day": day.label(),
                "lessons": lessons,
            }))
        }
    }
}
