use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use lg_core::Topic;

pub fn run(data: &Path) -> Result<(), String> {
    let store = super::load_store(data)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Name", "Aliases", "Topics"]);

    for record in store.records() {
        let aliases = if record.aliases().is_empty() {
            "-".to_string()
        } else {
            record.aliases().join(", ")
        };
        let topics: Vec<&str> = record
            .topics()
            .filter(|t| *t != Topic::General)
            .map(|t| t.label())
            .collect();
        let topics = if topics.is_empty() {
            "overview only".to_string()
        } else {
            topics.join(", ")
        };
        table.add_row(vec![
            record.key().as_str(),
            record.name(),
            aliases.as_str(),
            topics.as_str(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} landmarks", store.len());

    Ok(())
}
