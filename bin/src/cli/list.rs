use anyhow::Result;
use catalog::registry::Catalog;

/// Prints the registered algorithms, grouped by their group.
pub fn run(catalog: &Catalog) -> Result<()> {
    let mut current_group = None;
    for entry in catalog.entries() {
        let description = entry.description;
        if current_group != Some(description.group) {
            println!("{}:", description.group);
            current_group = Some(description.group);
        }
        println!("  {:<20} {}", description.cmd_name, description.name);
    }
    Ok(())
}
