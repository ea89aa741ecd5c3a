//! Per-part scoring and the pass threshold.

use serde::{Deserialize, Serialize};

use crate::builder::ExamPart;
use crate::sim::Simulation;

/// Minimum fraction of correct answers required to pass a part
/// (inclusive).
pub const PASS_THRESHOLD: f64 = 0.75;

/// Scoring state of one exam part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartScore {
    pub label: String,
    /// Correctly answered questions.
    pub correct: usize,
    /// Questions resolved so far; trails `total` when the timer skipped
    /// unanswered questions.
    pub answered: usize,
    /// Question count of the part.
    pub total: usize,
}

impl PartScore {
    pub fn of(part: &ExamPart, results: &[bool]) -> Self {
        Self {
            label: part.label.clone(),
            correct: results.iter().filter(|&&correct| correct).count(),
            answered: results.len(),
            total: part.questions.len(),
        }
    }

    /// Pass verdict. `None` while the part is incomplete or has no
    /// questions to score.
    pub fn passed(&self) -> Option<bool> {
        if self.total == 0 || self.answered < self.total {
            return None;
        }
        Some(self.correct as f64 / self.total as f64 >= PASS_THRESHOLD)
    }

    /// Correct answers as an integer percentage of the part size,
    /// rounded to the nearest whole percent.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct as f64 / self.total as f64 * 100.0).round() as u32
    }
}

/// Score every part of a simulation, in exam order.
pub fn summarize(sim: &Simulation) -> Vec<PartScore> {
    sim.parts()
        .iter()
        .zip(sim.results())
        .map(|(part, results)| PartScore::of(part, results))
        .collect()
}
