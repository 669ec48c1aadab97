use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use gb_core::{ContentSource, Roster};

use super::ContentDir;

pub fn run(dir: &Path) -> Result<(), String> {
    let content = ContentDir::new(dir).load().map_err(|e| e.to_string())?;
    content
        .require_roster(&Roster::standard())
        .map_err(|e| e.to_string())?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Collection", "Count"]);
    table.add_row(vec!["Investigators".to_string(), content.investigator_count().to_string()]);
    table.add_row(vec!["Entries".to_string(), content.entry_count().to_string()]);
    table.add_row(vec!["Location tables".to_string(), content.location_table_count().to_string()]);
    println!("{table}");
    println!();

    let warnings = content.validate();
    if warnings.is_empty() {
        println!("  All links resolve in '{}'.", dir.display());
        return Ok(());
    }
    for warning in &warnings {
        println!("  {} {warning}", "warning:".yellow().bold());
    }
    println!(
        "  {} warning{}",
        warnings.len(),
        if warnings.len() == 1 { "" } else { "s" }
    );
    Ok(())
}
