//! The `funktrainer validate` command.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use rand::thread_rng;

use funktrainer_core::scheme::ExamType;
use funktrainer_core::{catalog, shuffle};

pub fn execute(catalog_path: PathBuf) -> Result<()> {
    let cat = catalog::load(&catalog_path)?;
    let questions = catalog::flatten(&cat);
    let category_count = catalog::categories(&questions).len();
    println!(
        "Catalog: {} questions, {} categories",
        questions.len(),
        category_count
    );

    let mut total_warnings = 0;

    let warnings = catalog::validate(&questions);
    for w in &warnings {
        let prefix = w
            .number
            .as_ref()
            .map(|n| format!("  [{n}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
    total_warnings += warnings.len();

    // Exam coverage: every distinct part must be able to fill its draw.
    let mut rng = thread_rng();
    let pool = shuffle::shuffle_all(&questions, &mut rng);
    let mut seen = HashSet::new();
    for exam_type in ExamType::ALL {
        for definition in exam_type.parts() {
            if !seen.insert(definition.label) {
                continue;
            }
            let matching = pool.iter().filter(|q| definition.matches(q)).count();
            if matching == 0 {
                println!(
                    "  WARNING: part '{}' has no matching questions",
                    definition.label
                );
                total_warnings += 1;
            } else if matching < definition.count {
                println!(
                    "  WARNING: part '{}' has only {} of {} required questions (draws will repeat)",
                    definition.label, matching, definition.count
                );
                total_warnings += 1;
            }
        }
    }

    if total_warnings == 0 {
        println!("Catalog is valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
