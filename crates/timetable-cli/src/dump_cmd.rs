use timetable::{ScheduleIndex, render_day};

use crate::cli::{OutputFormat, SourceArgs};
use crate::shared::{lesson_json, load_index, print_json, render_options};

pub fn run(source: &SourceArgs, html: bool, format: OutputFormat) -> Result<(), i32> {
    let index = load_index(source)?;

    match format {
        OutputFormat::Text => {
            write_text(&index, html);
            Ok(())
        }
        OutputFormat::Json => print_json(&to_json(&index)),
    }
}

fn write_text(index: &ScheduleIndex, html: bool) {
    let options = render_options(html);
    for week in index.week_list() {
        println!("Week {week}");
        for day in index.day_of_week_list(week) {
            println!("  {}", day.label());
            let text = render_day(&index.lesson_list(week, day), &options);
            for line in text.lines() {
                println!("    {line}");
            }
        }
    }
}

fn to_json(index: &ScheduleIndex) -> serde_json::Value {
    let weeks: Vec<serde_json::Value> = index
        .week_list()
        .into_iter()
        .map(|week| {
            let days: Vec<serde_json::Value> = index
                .day_of_week_list(week)
                .into_iter()
                .map(|day| {
                    let lessons: Vec<serde_json::Value> = index
                        .lesson_list(week, day)
                        .into_iter()
                        .map(lesson_json)
                        .collect();
                    serde_json::json!({ "day": day.label(), "lessons": lessons })
                })
                .collect();
            serde_json::json!({ "week": week, "days": days })
        })
        .collect();
    serde_json::json!({ "weeks": weeks })
}
