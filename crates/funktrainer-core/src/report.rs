//! Exam report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scheme::ExamType;
use crate::score::PartScore;

/// Outcome of one exam part, as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartReport {
    pub label: String,
    pub correct: usize,
    pub answered: usize,
    pub total: usize,
    /// Integer percentage of correct answers.
    pub percent: u32,
    /// `None` when the part was left incomplete or had no questions.
    pub passed: Option<bool>,
}

/// A finished (or aborted) exam simulation, persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Exam type key, e.g. "N->E".
    pub exam_type: String,
    /// Per-part outcomes in exam order.
    pub parts: Vec<PartReport>,
    /// Whether every part was completed and passed.
    pub all_passed: bool,
}

impl ExamReport {
    /// Build a report from the scorer's per-part summaries.
    pub fn from_scores(exam_type: ExamType, scores: &[PartScore]) -> Self {
        let parts: Vec<PartReport> = scores
            .iter()
            .map(|score| PartReport {
                label: score.label.clone(),
                correct: score.correct,
                answered: score.answered,
                total: score.total,
                percent: score.percent(),
                passed: score.passed(),
            })
            .collect();
        let all_passed = !parts.is_empty() && parts.iter().all(|p| p.passed == Some(true));

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            exam_type: exam_type.to_string(),
            parts,
            all_passed,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ExamReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
