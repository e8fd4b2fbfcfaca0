use crate::cli::{OutputFormat, SourceArgs};
use crate::shared::{load_index, print_json};

pub fn run(source: &SourceArgs, week: u32, format: OutputFormat) -> Result<(), i32> {
    let index = load_index(source)?;
    let days = index.day_of_week_list(week);

    match format {
        OutputFormat::Text => {
            if days.is_empty() {
                println!("No lessons in week {week}.");
            }
            for day in days {
                println!("{}", day.label());
            }
            Ok(())
        }
        OutputFormat::Json => {
            let days: Vec<serde_json::Value> = days
                .into_iter()
                .map(|day| {
                    serde_json::json!({
                        "ordinal": day.ordinal(),
                        "label": day.label(),
                        "abbreviation": day.abbreviation(),
                    })
                })
                .collect();
            print_json(&serde_json::Value::Array(days))
        }
    }
}
