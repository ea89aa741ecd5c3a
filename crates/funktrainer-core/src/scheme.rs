//! Exam scheme registry.
//!
//! Maps each of the six exam types to its ordered list of graded parts.
//! Part sizes and time budgets are regulation-mandated and fixed; the
//! registry is static configuration, read-only at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::ShuffledQuestion;

/// One graded, timed section of an exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartDefinition {
    /// Display label, e.g. "Technik E (E)".
    pub label: &'static str,
    /// Required number of questions.
    pub count: usize,
    /// Category-path substring the questions must match.
    pub category: &'static str,
    /// Exact class requirement for technical parts.
    pub class: Option<&'static str>,
    /// Time budget in minutes.
    pub duration_min: u32,
}

impl PartDefinition {
    /// Whether a question belongs to this part.
    pub fn matches(&self, q: &ShuffledQuestion) -> bool {
        q.category_path.iter().any(|p| p.contains(self.category))
            && self.class.map_or(true, |class| q.class == class)
    }

    /// Time budget in whole seconds.
    pub fn duration_secs(&self) -> u32 {
        self.duration_min * 60
    }
}

const VORSCHRIFTEN: PartDefinition = PartDefinition {
    label: "Vorschriften (V)",
    count: 25,
    category: "Vorschriften",
    class: None,
    duration_min: 45,
};

const BETRIEB: PartDefinition = PartDefinition {
    label: "Betriebliche Kenntnisse (B)",
    count: 25,
    category: "Betriebliche Kenntnisse",
    class: None,
    duration_min: 45,
};

const TECHNIK_N: PartDefinition = PartDefinition {
    label: "Technik N (N)",
    count: 25,
    category: "Technische Kenntnisse",
    class: Some("1"),
    duration_min: 45,
};

const TECHNIK_E: PartDefinition = PartDefinition {
    label: "Technik E (E)",
    count: 25,
    category: "Technische Kenntnisse",
    class: Some("2"),
    duration_min: 45,
};

const TECHNIK_A: PartDefinition = PartDefinition {
    label: "Technik A (A)",
    count: 25,
    category: "Technische Kenntnisse",
    class: Some("3"),
    duration_min: 60,
};

/// One of the six certification or upgrade paths.
///
/// Full certifications are cumulative (`A` covers everything `E` does,
/// `E` everything `N` does); upgrade paths carry only the parts beyond
/// the prerequisite certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamType {
    N,
    E,
    A,
    #[serde(rename = "N->E")]
    NToE,
    #[serde(rename = "N->A")]
    NToA,
    #[serde(rename = "E->A")]
    EToA,
}

impl ExamType {
    /// All exam types, in selector order.
    pub const ALL: [ExamType; 6] = [
        ExamType::N,
        ExamType::E,
        ExamType::A,
        ExamType::NToE,
        ExamType::NToA,
        ExamType::EToA,
    ];

    /// The ordered graded parts of this exam.
    pub fn parts(&self) -> &'static [PartDefinition] {
        match self {
            ExamType::N => &[VORSCHRIFTEN, BETRIEB, TECHNIK_N],
            ExamType::E => &[VORSCHRIFTEN, BETRIEB, TECHNIK_N, TECHNIK_E],
            ExamType::A => &[VORSCHRIFTEN, BETRIEB, TECHNIK_N, TECHNIK_E, TECHNIK_A],
            ExamType::NToE => &[TECHNIK_E],
            ExamType::NToA => &[TECHNIK_E, TECHNIK_A],
            ExamType::EToA => &[TECHNIK_A],
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamType::N => write!(f, "N"),
            ExamType::E => write!(f, "E"),
            ExamType::A => write!(f, "A"),
            ExamType::NToE => write!(f, "N->E"),
            ExamType::NToA => write!(f, "N->A"),
            ExamType::EToA => write!(f, "E->A"),
        }
    }
}

impl FromStr for ExamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "N" => Ok(ExamType::N),
            "E" => Ok(ExamType::E),
            "A" => Ok(ExamType::A),
            "N->E" => Ok(ExamType::NToE),
            "N->A" => Ok(ExamType::NToA),
            "E->A" => Ok(ExamType::EToA),
            other => Err(format!("unknown exam type: {other}")),
        }
    }
}
