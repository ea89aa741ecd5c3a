//! The `funktrainer categories` command.

use std::path::PathBuf;

use anyhow::Result;

use funktrainer_core::catalog;

pub fn execute(catalog_path: PathBuf) -> Result<()> {
    let cat = catalog::load(&catalog_path)?;
    let questions = catalog::flatten(&cat);
    let entries = catalog::categories(&questions);

    if entries.is_empty() {
        println!("No categories found.");
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{}{} ({})",
            "  ".repeat(entry.depth),
            entry.title,
            entry.count
        );
    }

    Ok(())
}
