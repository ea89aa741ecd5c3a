//! Fair shuffling of answer sets and question pools.
//!
//! Uses Fisher–Yates via `rand::seq::SliceRandom`, so every permutation is
//! equally likely. All entry points take a caller-supplied [`Rng`]: the CLI
//! passes a thread or seeded RNG, tests pass a deterministic one.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{AnswerId, AnswerOption, CategorizedQuestion, ShuffledQuestion};

/// Turn a catalog question into display form with randomly ordered answers.
///
/// The option built from `answer_a` is the correct one. Each option carries
/// its own image reference, so later lookups never go back to the original
/// slot fields.
pub fn shuffle_answers(q: &CategorizedQuestion, rng: &mut impl Rng) -> ShuffledQuestion {
    let src = &q.question;
    let mut answers = vec![
        AnswerOption {
            id: AnswerId::A,
            text: src.answer_a.clone(),
            correct: true,
            picture: src.picture_a.clone(),
        },
        AnswerOption {
            id: AnswerId::B,
            text: src.answer_b.clone(),
            correct: false,
            picture: src.picture_b.clone(),
        },
        AnswerOption {
            id: AnswerId::C,
            text: src.answer_c.clone(),
            correct: false,
            picture: src.picture_c.clone(),
        },
        AnswerOption {
            id: AnswerId::D,
            text: src.answer_d.clone(),
            correct: false,
            picture: src.picture_d.clone(),
        },
    ];
    answers.shuffle(rng);

    ShuffledQuestion {
        number: src.number.clone(),
        class: src.class.clone(),
        text: src.question.clone(),
        picture: src.picture_question.clone(),
        category_path: q.category_path.clone(),
        answers,
    }
}

/// Shuffle every question of a freshly flattened catalog.
pub fn shuffle_all(questions: &[CategorizedQuestion], rng: &mut impl Rng) -> Vec<ShuffledQuestion> {
    questions.iter().map(|q| shuffle_answers(q, rng)).collect()
}

/// Shuffle a pool in place, e.g. to randomize draw order.
pub fn shuffle_pool<T>(items: &mut [T], rng: &mut impl Rng) {
    items.shuffle(rng);
}
