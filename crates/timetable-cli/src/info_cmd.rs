use crate::cli::{OutputFormat, SourceArgs};
use crate::shared::{open_store, print_json};

pub fn run(source: &SourceArgs, format: OutputFormat) -> Result<(), i32> {
    let store = open_store(source)?;
    let index = store.refresh().map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    let info = store.info();

    match format {
        OutputFormat::Text => {
            if !info.class_name.is_empty() {
                println!("Class: {}", info.class_name);
            }
            println!("Resource: {}", info.resource);
            if let Some(fingerprint) = &info.fingerprint {
                println!("Fingerprint: {fingerprint}");
            }
            if let Some(created) = info.created {
                println!("Created: {}", created.format("%d.%m.%Y"));
            }
            println!("Lessons: {}", info.lessons);
            let weeks: Vec<String> = index.week_list().iter().map(u32::to_string).collect();
            println!("Weeks: {}", weeks.join(", "));
            Ok(())
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_value(&info).map_err(|e| {
                eprintln!("Error: {e}");
                1
            })?;
            json["weeks"] = serde_json::json!(index.week_list());
            print_json(&json)
        }
    }
}
