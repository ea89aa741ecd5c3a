//! The `funktrainer report` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use funktrainer_core::report::ExamReport;

pub fn execute(path: PathBuf, format: String) -> Result<()> {
    let report = ExamReport::load_json(&path)?;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Prüfung {} vom {}",
                report.exam_type,
                report.created_at.format("%Y-%m-%d %H:%M")
            );
            print_report(&report);
        }
    }

    Ok(())
}

/// Print the per-part result table shared by `exam` and `report`.
pub fn print_report(report: &ExamReport) {
    let mut table = Table::new();
    table.set_header(vec!["Teil", "Richtig", "Prozent", "Ergebnis"]);

    for part in &report.parts {
        let verdict = match part.passed {
            Some(true) => "Bestanden",
            Some(false) => "Nicht bestanden",
            None => "Nicht wertbar",
        };
        table.add_row(vec![
            part.label.clone(),
            format!("{} / {}", part.correct, part.total),
            format!("{}%", part.percent),
            verdict.to_string(),
        ]);
    }

    println!("{table}");

    if report.all_passed {
        println!("Prüfung bestanden.");
    }
}
