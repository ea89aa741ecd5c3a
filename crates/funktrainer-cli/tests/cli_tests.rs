//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn funktrainer() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("funktrainer").unwrap()
}

/// Write a small catalog with Vorschriften and class-2 technical
/// questions to a temp directory.
fn write_catalog(dir: &TempDir) -> std::path::PathBuf {
    let mut sections = String::new();

    let mut technik_questions = Vec::new();
    for i in 0..3 {
        technik_questions.push(make_question(&format!("TE{i:03}"), "2"));
    }
    let mut vorschriften_questions = Vec::new();
    for i in 0..3 {
        vorschriften_questions.push(make_question(&format!("VB{i:03}"), "1"));
    }

    sections.push_str(&format!(
        r#"{{
            "sections": [
                {{
                    "title": "Technische Kenntnisse",
                    "sections": [
                        {{ "title": "Klasse E", "questions": [{}] }}
                    ]
                }},
                {{
                    "title": "Vorschriften",
                    "questions": [{}]
                }}
            ]
        }}"#,
        technik_questions.join(","),
        vorschriften_questions.join(",")
    ));

    let path = dir.path().join("katalog.json");
    std::fs::write(&path, sections).unwrap();
    path
}

fn make_question(number: &str, class: &str) -> String {
    format!(
        r#"{{
            "number": "{number}",
            "class": "{class}",
            "question": "Frage {number}?",
            "answer_a": "richtig",
            "answer_b": "falsch 1",
            "answer_c": "falsch 2",
            "answer_d": "falsch 3"
        }}"#
    )
}

#[test]
fn help_output() {
    funktrainer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Amateur-radio exam trainer"));
}

#[test]
fn version_output() {
    funktrainer()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("funktrainer"));
}

#[test]
fn validate_reports_counts_and_coverage() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(&dir);

    funktrainer()
        .arg("validate")
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("6 questions"))
        .stdout(predicate::str::contains("Technik N (N)"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_nonexistent_catalog() {
    funktrainer()
        .arg("validate")
        .arg("--catalog")
        .arg("no_such_catalog.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn categories_lists_indented_tree() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(&dir);

    funktrainer()
        .arg("categories")
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Technische Kenntnisse (3)"))
        .stdout(predicate::str::contains("  Klasse E (3)"))
        .stdout(predicate::str::contains("Vorschriften (3)"));
}

#[test]
fn exam_upgrade_path_shows_only_incremental_part() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(&dir);

    // Closed stdin aborts the simulation after the first question is shown.
    funktrainer()
        .arg("exam")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--exam-type")
        .arg("N->E")
        .arg("--seed")
        .arg("7")
        .assert()
        .success()
        .stdout(predicate::str::contains("Technik E (E)"))
        .stdout(predicate::str::contains("Vorschriften").not())
        .stdout(predicate::str::contains("Frage 1 / 25"));
}

#[test]
fn exam_rejects_unknown_exam_type() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(&dir);

    funktrainer()
        .arg("exam")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--exam-type")
        .arg("Z")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown exam type"));
}

#[test]
fn report_prints_saved_results() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(&path, make_test_report()).unwrap();

    funktrainer()
        .arg("report")
        .arg("--path")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Technik E (E)"))
        .stdout(predicate::str::contains("80%"))
        .stdout(predicate::str::contains("Bestanden"));
}

#[test]
fn report_json_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(&path, make_test_report()).unwrap();

    funktrainer()
        .arg("report")
        .arg("--path")
        .arg(&path)
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"all_passed\": true"));
}

#[test]
fn report_nonexistent_file() {
    funktrainer()
        .arg("report")
        .arg("--path")
        .arg("no_such_report.json")
        .assert()
        .failure();
}

/// Create a minimal valid JSON report for testing.
fn make_test_report() -> String {
    r#"{
    "id": "00000000-0000-0000-0000-000000000000",
    "created_at": "2026-01-01T00:00:00Z",
    "exam_type": "N->E",
    "parts": [
        {
            "label": "Technik E (E)",
            "correct": 20,
            "answered": 25,
            "total": 25,
            "percent": 80,
            "passed": true
        }
    ],
    "all_passed": true
}"#
    .to_string()
}
