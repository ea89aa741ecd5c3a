//! Exam part construction.
//!
//! Draws each part's questions from the shuffled pool, padding by cyclic
//! repetition when the filtered pool is smaller than the mandated count.

use rand::Rng;

use crate::model::ShuffledQuestion;
use crate::scheme::{ExamType, PartDefinition};
use crate::shuffle::shuffle_pool;

/// A runtime exam part: the mandated number of questions in draw order.
#[derive(Debug, Clone)]
pub struct ExamPart {
    pub label: String,
    pub questions: Vec<ShuffledQuestion>,
}

/// Build a single part from the full pool.
///
/// The filtered pool is shuffled for draw order and the first `count`
/// questions are taken. A pool smaller than `count` is padded by cyclic
/// repetition: part sizes are regulation-fixed, so duplicates within a
/// part are the accepted tradeoff for a sparse question bank. An empty
/// filtered pool yields a zero-length part, which consumers must treat
/// as unscorable.
pub fn build_part(
    pool: &[ShuffledQuestion],
    definition: &PartDefinition,
    rng: &mut impl Rng,
) -> ExamPart {
    let mut filtered: Vec<&ShuffledQuestion> =
        pool.iter().filter(|q| definition.matches(q)).collect();
    shuffle_pool(&mut filtered, rng);

    if filtered.is_empty() {
        tracing::warn!(
            part = definition.label,
            "no questions match this part; it cannot be scored"
        );
        return ExamPart {
            label: definition.label.to_string(),
            questions: Vec::new(),
        };
    }

    let mut questions: Vec<ShuffledQuestion> = filtered
        .iter()
        .take(definition.count)
        .map(|q| (*q).clone())
        .collect();
    while questions.len() < definition.count {
        questions.push(filtered[questions.len() % filtered.len()].clone());
    }

    tracing::debug!(
        part = definition.label,
        matching = filtered.len(),
        drawn = questions.len(),
        "built exam part"
    );
    ExamPart {
        label: definition.label.to_string(),
        questions,
    }
}

/// Build every part of an exam, in scheme order.
pub fn build_exam(
    pool: &[ShuffledQuestion],
    exam_type: ExamType,
    rng: &mut impl Rng,
) -> Vec<ExamPart> {
    exam_type
        .parts()
        .iter()
        .map(|definition| build_part(pool, definition, rng))
        .collect()
}
