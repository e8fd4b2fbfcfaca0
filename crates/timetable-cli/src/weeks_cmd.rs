use crate::cli::{OutputFormat, SourceArgs};
use crate::shared::{load_index, print_json};

pub fn run(source: &SourceArgs, format: OutputFormat) -> Result<(), i32> {
    let index = load_index(source)?;
    let weeks = index.week_list();

    match format {
        OutputFormat::Text => {
            for week in weeks {
                println!("{week}");
            }
            Ok(())
        }
        OutputFormat::Json => print_json(&serde_json::json!(weeks)),
    }
}
