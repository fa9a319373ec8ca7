use std::path::Path;

pub fn run(data: &Path) -> Result<(), String> {
    let store = super::load_store(data)?;

    let aliases = store.alias_index().count();
    let topics: usize = store.records().map(|r| r.topics().count()).sum();

    println!("  All checks passed for '{}'.", data.display());
    println!("  {} landmarks, {aliases} aliases, {topics} topics", store.len());

    Ok(())
}
