//! Core data model types for funktrainer.
//!
//! These are the fundamental types the entire funktrainer system uses to
//! represent catalog questions, category paths, and shuffled answer sets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single multiple-choice question as stored in the catalog.
///
/// `answer_a` is the canonically correct answer; the other three are
/// distractors. Question and answer texts may embed `$...$` or `$$...$$`
/// math markup, which every layer passes through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Catalog question number (e.g. "TD205").
    pub number: String,
    /// Certification tier this question belongs to ("1", "2" or "3").
    pub class: String,
    /// Prompt text.
    pub question: String,
    /// The correct answer text.
    pub answer_a: String,
    pub answer_b: String,
    pub answer_c: String,
    pub answer_d: String,
    /// Image reference shown with the prompt.
    #[serde(default)]
    pub picture_question: Option<String>,
    #[serde(default)]
    pub picture_a: Option<String>,
    #[serde(default)]
    pub picture_b: Option<String>,
    #[serde(default)]
    pub picture_c: Option<String>,
    #[serde(default)]
    pub picture_d: Option<String>,
}

/// A node in the catalog's category tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Category title.
    pub title: String,
    /// Questions attached directly to this section.
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Nested subsections.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// The question bank as loaded from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub sections: Vec<Section>,
}

/// A question annotated with its category path.
///
/// The path is the chain of section titles from the catalog root down to
/// the question's containing section. It is derived once when the catalog
/// is flattened and never mutated; it is always non-empty.
#[derive(Debug, Clone)]
pub struct CategorizedQuestion {
    pub question: Question,
    pub category_path: Vec<String>,
}

/// The original answer slot of an option.
///
/// Stable across display reordering: `A` always names the slot that held
/// the correct answer in the catalog, wherever the shuffle put it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerId {
    A,
    B,
    C,
    D,
}

impl AnswerId {
    /// All slots in catalog order.
    pub const ALL: [AnswerId; 4] = [AnswerId::A, AnswerId::B, AnswerId::C, AnswerId::D];
}

impl fmt::Display for AnswerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerId::A => write!(f, "A"),
            AnswerId::B => write!(f, "B"),
            AnswerId::C => write!(f, "C"),
            AnswerId::D => write!(f, "D"),
        }
    }
}

impl FromStr for AnswerId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" => Ok(AnswerId::A),
            "b" => Ok(AnswerId::B),
            "c" => Ok(AnswerId::C),
            "d" => Ok(AnswerId::D),
            other => Err(format!("unknown answer slot: {other}")),
        }
    }
}

/// One display option of a shuffled question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Original slot this option came from.
    pub id: AnswerId,
    /// Answer text.
    pub text: String,
    /// Whether this option is the correct answer.
    pub correct: bool,
    /// Image reference belonging to this answer, carried along so lookups
    /// never have to go back to the original slot fields.
    #[serde(default)]
    pub picture: Option<String>,
}

/// A categorized question with its answers in randomized display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffledQuestion {
    pub number: String,
    pub class: String,
    /// Prompt text.
    pub text: String,
    /// Image reference shown with the prompt.
    #[serde(default)]
    pub picture: Option<String>,
    pub category_path: Vec<String>,
    /// Always four options, exactly one of them correct.
    pub answers: Vec<AnswerOption>,
}

impl ShuffledQuestion {
    /// Look up an option by its original slot.
    pub fn option(&self, id: AnswerId) -> Option<&AnswerOption> {
        self.answers.iter().find(|a| a.id == id)
    }

    /// The option currently holding the correct answer.
    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.answers.iter().find(|a| a.correct)
    }
}
