//! The exam simulation state machine.
//!
//! A [`Simulation`] owns all mutable exam state: the built parts, one
//! result vector per part, the current phase, the pending selection, and
//! the remaining whole seconds of the part timer. Every user or timer
//! event is a `&mut self` method, so transitions are always sequenced.
//!
//! The machine performs no side effects itself. Events that may affect
//! the countdown return a [`TimerAction`] for the caller's effect runner
//! to apply, keeping the state machine testable without any runtime:
//! there is one active timer at a time, tied to the currently running
//! part, torn down on every transition out of it.

use rand::Rng;

use crate::builder::{build_exam, ExamPart};
use crate::model::{AnswerId, ShuffledQuestion};
use crate::scheme::ExamType;

/// Where the simulation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Asking question `question` of part `part`.
    Running { part: usize, question: usize },
    /// Showing the summary of part `part`.
    PartSummary { part: usize },
    /// All parts done; terminal until the simulation is discarded.
    Finished,
}

/// Timer instruction returned by state transitions.
///
/// The effect runner must apply it before delivering further events:
/// `Arm` replaces any active countdown with a fresh one, `Cancel` tears
/// the active one down, `Keep` leaves it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    Arm { seconds: u32 },
    Cancel,
    Keep,
}

/// View of the question currently being asked.
#[derive(Debug, Clone, Copy)]
pub struct CurrentQuestion<'a> {
    pub part_label: &'a str,
    pub part_index: usize,
    pub question: &'a ShuffledQuestion,
    /// 1-based ordinal within the part.
    pub ordinal: usize,
    /// Question count of the part.
    pub part_total: usize,
}

/// A running exam simulation.
#[derive(Debug, Clone)]
pub struct Simulation {
    exam_type: ExamType,
    parts: Vec<ExamPart>,
    results: Vec<Vec<bool>>,
    phase: Phase,
    selected: Option<AnswerId>,
    resolved: bool,
    time_left: u32,
}

impl Simulation {
    /// Start a new simulation: build every part of the selected scheme,
    /// reset all results, and enter the first part with a fresh timer.
    ///
    /// This is also the reset path: replacing an old simulation with the
    /// returned one discards all previous parts and results.
    pub fn start(
        pool: &[ShuffledQuestion],
        exam_type: ExamType,
        rng: &mut impl Rng,
    ) -> (Self, TimerAction) {
        let parts = build_exam(pool, exam_type, rng);
        let results = parts.iter().map(|_| Vec::new()).collect();
        let mut sim = Self {
            exam_type,
            parts,
            results,
            phase: Phase::Finished,
            selected: None,
            resolved: false,
            time_left: 0,
        };
        let action = sim.enter_part(0);
        (sim, action)
    }

    /// Enter part `index`. A zero-question part cannot be asked and skips
    /// straight to its summary; an out-of-range index finishes the exam.
    fn enter_part(&mut self, index: usize) -> TimerAction {
        self.selected = None;
        self.resolved = false;
        self.time_left = 0;
        match self.parts.get(index) {
            None => {
                self.phase = Phase::Finished;
                TimerAction::Cancel
            }
            Some(part) if part.questions.is_empty() => {
                self.phase = Phase::PartSummary { part: index };
                TimerAction::Cancel
            }
            Some(_) => {
                self.phase = Phase::Running {
                    part: index,
                    question: 0,
                };
                self.time_left = self.exam_type.parts()[index].duration_secs();
                TimerAction::Arm {
                    seconds: self.time_left,
                }
            }
        }
    }

    /// Record an answer selection. Ignored once the current question is
    /// resolved or outside a running part.
    pub fn select(&mut self, id: AnswerId) {
        if matches!(self.phase, Phase::Running { .. }) && !self.resolved {
            self.selected = Some(id);
        }
    }

    /// Check the current selection against the correct answer, append the
    /// verdict to the part's results, and freeze further selection.
    ///
    /// Returns `None` without any state change when there is nothing to
    /// resolve: no selection yet, already resolved, or no running part.
    pub fn resolve(&mut self) -> Option<bool> {
        let Phase::Running { part, question } = self.phase else {
            return None;
        };
        if self.resolved {
            return None;
        }
        let selected = self.selected?;
        let correct = self.parts[part].questions[question]
            .option(selected)
            .map_or(false, |option| option.correct);
        self.results[part].push(correct);
        self.resolved = true;
        Some(correct)
    }

    /// Advance to the next question, or to the part summary after the
    /// last one. The part timer keeps running between questions.
    pub fn next(&mut self) -> TimerAction {
        let Phase::Running { part, question } = self.phase else {
            return TimerAction::Keep;
        };
        self.selected = None;
        self.resolved = false;
        if question + 1 < self.parts[part].questions.len() {
            self.phase = Phase::Running {
                part,
                question: question + 1,
            };
            TimerAction::Keep
        } else {
            self.phase = Phase::PartSummary { part };
            self.time_left = 0;
            TimerAction::Cancel
        }
    }

    /// Leave a part summary for the next part (with a freshly armed
    /// timer) or for the final result. A no-op anywhere else, so an early
    /// "continue" while questions are still open cannot corrupt state.
    pub fn continue_exam(&mut self) -> TimerAction {
        match self.phase {
            Phase::PartSummary { part } => self.enter_part(part + 1),
            _ => TimerAction::Keep,
        }
    }

    /// One-second countdown tick.
    ///
    /// On expiry the current question is force-advanced exactly once: a
    /// pending selection is resolved first, an unselected question gets
    /// no result entry. The returned `Cancel` retires the timer until the
    /// next part is entered; a stale tick arriving after that is a no-op,
    /// so the countdown can neither double-fire nor go negative.
    pub fn tick(&mut self) -> TimerAction {
        if !matches!(self.phase, Phase::Running { .. }) {
            return TimerAction::Keep;
        }
        match self.time_left {
            0 => TimerAction::Cancel,
            1 => {
                self.time_left = 0;
                if !self.resolved && self.selected.is_some() {
                    self.resolve();
                }
                self.next();
                TimerAction::Cancel
            }
            _ => {
                self.time_left -= 1;
                TimerAction::Keep
            }
        }
    }

    pub fn exam_type(&self) -> ExamType {
        self.exam_type
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn parts(&self) -> &[ExamPart] {
        &self.parts
    }

    /// Per-part result vectors, one verdict per resolved question.
    pub fn results(&self) -> &[Vec<bool>] {
        &self.results
    }

    /// Remaining seconds of the running part, 0 outside of one.
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn selection(&self) -> Option<AnswerId> {
        self.selected
    }

    /// Whether the current question has been resolved (answer revealed).
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// The question currently on screen, if a part is running.
    pub fn current(&self) -> Option<CurrentQuestion<'_>> {
        let Phase::Running { part, question } = self.phase else {
            return None;
        };
        let p = self.parts.get(part)?;
        let q = p.questions.get(question)?;
        Some(CurrentQuestion {
            part_label: &p.label,
            part_index: part,
            question: q,
            ordinal: question + 1,
            part_total: p.questions.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerOption;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool_question(number: &str, path: &[&str], class: &str) -> ShuffledQuestion {
        // Fixed display order with the correct option first, so tests can
        // select deliberately right or wrong answers.
        ShuffledQuestion {
            number: number.into(),
            class: class.into(),
            text: format!("Frage {number}"),
            picture: None,
            category_path: path.iter().map(|p| p.to_string()).collect(),
            answers: vec![
                AnswerOption {
                    id: AnswerId::A,
                    text: "richtig".into(),
                    correct: true,
                    picture: None,
                },
                AnswerOption {
                    id: AnswerId::B,
                    text: "falsch".into(),
                    correct: false,
                    picture: None,
                },
                AnswerOption {
                    id: AnswerId::C,
                    text: "falsch".into(),
                    correct: false,
                    picture: None,
                },
                AnswerOption {
                    id: AnswerId::D,
                    text: "falsch".into(),
                    correct: false,
                    picture: None,
                },
            ],
        }
    }

    fn technik_pool(n: usize, class: &str) -> Vec<ShuffledQuestion> {
        (0..n)
            .map(|i| {
                pool_question(
                    &format!("T{class}{i:03}"),
                    &["Technische Kenntnisse"],
                    class,
                )
            })
            .collect()
    }

    fn start_n_to_e(pool_size: usize) -> (Simulation, TimerAction) {
        let pool = technik_pool(pool_size, "2");
        let mut rng = StdRng::seed_from_u64(11);
        Simulation::start(&pool, ExamType::NToE, &mut rng)
    }

    fn answer_part(sim: &mut Simulation, correct: usize, total: usize) {
        for i in 0..total {
            sim.select(if i < correct { AnswerId::A } else { AnswerId::B });
            assert!(sim.resolve().is_some());
            sim.next();
        }
    }

    #[test]
    fn start_enters_first_part_with_armed_timer() {
        let (sim, action) = start_n_to_e(30);
        assert_eq!(
            sim.phase(),
            Phase::Running {
                part: 0,
                question: 0
            }
        );
        assert_eq!(action, TimerAction::Arm { seconds: 45 * 60 });
        assert_eq!(sim.time_left(), 45 * 60);
        assert_eq!(sim.parts().len(), 1);
        assert_eq!(sim.parts()[0].questions.len(), 25);
        assert!(sim.results().iter().all(|r| r.is_empty()));
    }

    #[test]
    fn resolve_without_selection_is_rejected() {
        let (mut sim, _) = start_n_to_e(30);
        assert_eq!(sim.resolve(), None);
        assert!(sim.results()[0].is_empty());
        assert!(!sim.is_resolved());
    }

    #[test]
    fn resolve_records_verdict_and_freezes_selection() {
        let (mut sim, _) = start_n_to_e(30);
        sim.select(AnswerId::B);
        sim.select(AnswerId::A);
        assert_eq!(sim.resolve(), Some(true));
        assert!(sim.is_resolved());
        assert_eq!(sim.results()[0], vec![true]);

        // Changing the answer after the reveal must not work.
        sim.select(AnswerId::B);
        assert_eq!(sim.selection(), Some(AnswerId::A));
        assert_eq!(sim.resolve(), None);
        assert_eq!(sim.results()[0], vec![true]);
    }

    #[test]
    fn wrong_selection_resolves_to_false() {
        let (mut sim, _) = start_n_to_e(30);
        sim.select(AnswerId::C);
        assert_eq!(sim.resolve(), Some(false));
        assert_eq!(sim.results()[0], vec![false]);
    }

    #[test]
    fn next_walks_through_the_part_and_into_the_summary() {
        let (mut sim, _) = start_n_to_e(30);
        for expected in 1..25 {
            assert_eq!(sim.next(), TimerAction::Keep);
            assert_eq!(
                sim.phase(),
                Phase::Running {
                    part: 0,
                    question: expected
                }
            );
        }
        assert_eq!(sim.next(), TimerAction::Cancel);
        assert_eq!(sim.phase(), Phase::PartSummary { part: 0 });
    }

    #[test]
    fn continue_while_running_is_a_no_op() {
        let (mut sim, _) = start_n_to_e(30);
        assert_eq!(sim.continue_exam(), TimerAction::Keep);
        assert_eq!(
            sim.phase(),
            Phase::Running {
                part: 0,
                question: 0
            }
        );
    }

    #[test]
    fn continue_from_last_summary_finishes_the_exam() {
        let (mut sim, _) = start_n_to_e(30);
        answer_part(&mut sim, 25, 25);
        assert_eq!(sim.phase(), Phase::PartSummary { part: 0 });
        assert_eq!(sim.continue_exam(), TimerAction::Cancel);
        assert_eq!(sim.phase(), Phase::Finished);

        // Terminal: further events change nothing.
        assert_eq!(sim.next(), TimerAction::Keep);
        assert_eq!(sim.tick(), TimerAction::Keep);
        assert_eq!(sim.phase(), Phase::Finished);
    }

    #[test]
    fn continue_arms_the_next_parts_timer() {
        let pool = [technik_pool(30, "2"), technik_pool(30, "3")].concat();
        let mut rng = StdRng::seed_from_u64(12);
        let (mut sim, _) = Simulation::start(&pool, ExamType::NToA, &mut rng);

        answer_part(&mut sim, 20, 25);
        assert_eq!(sim.phase(), Phase::PartSummary { part: 0 });

        // Technik A is the 60-minute part.
        assert_eq!(sim.continue_exam(), TimerAction::Arm { seconds: 60 * 60 });
        assert_eq!(
            sim.phase(),
            Phase::Running {
                part: 1,
                question: 0
            }
        );
        assert_eq!(sim.time_left(), 60 * 60);
    }

    #[test]
    fn tick_counts_down_while_running() {
        let (mut sim, _) = start_n_to_e(30);
        assert_eq!(sim.tick(), TimerAction::Keep);
        assert_eq!(sim.time_left(), 45 * 60 - 1);
    }

    #[test]
    fn timer_expiry_skips_an_unanswered_question() {
        let (mut sim, _) = start_n_to_e(30);
        // Simulate a one-minute budget by draining the countdown.
        while sim.time_left() > 60 {
            sim.tick();
        }
        for _ in 0..59 {
            assert_eq!(sim.tick(), TimerAction::Keep);
        }
        assert_eq!(sim.tick(), TimerAction::Cancel);
        assert_eq!(
            sim.phase(),
            Phase::Running {
                part: 0,
                question: 1
            }
        );
        // No answer was resolved, so no result entry was appended.
        assert!(sim.results()[0].is_empty());
        assert_eq!(sim.time_left(), 0);
    }

    #[test]
    fn timer_expiry_resolves_a_pending_selection_first() {
        let (mut sim, _) = start_n_to_e(30);
        sim.select(AnswerId::A);
        while sim.time_left() > 1 {
            sim.tick();
        }
        assert_eq!(sim.tick(), TimerAction::Cancel);
        assert_eq!(sim.results()[0], vec![true]);
        assert_eq!(
            sim.phase(),
            Phase::Running {
                part: 0,
                question: 1
            }
        );
    }

    #[test]
    fn stale_ticks_after_expiry_fire_nothing() {
        let (mut sim, _) = start_n_to_e(30);
        while sim.time_left() > 1 {
            sim.tick();
        }
        assert_eq!(sim.tick(), TimerAction::Cancel);
        let phase = sim.phase();
        assert_eq!(sim.tick(), TimerAction::Cancel);
        assert_eq!(sim.tick(), TimerAction::Cancel);
        assert_eq!(sim.phase(), phase);
        assert!(sim.results()[0].is_empty());
    }

    #[test]
    fn empty_part_skips_straight_to_its_summary() {
        // No class-3 questions: the Technik A part of E->A stays empty.
        let pool = technik_pool(30, "2");
        let mut rng = StdRng::seed_from_u64(13);
        let (sim, action) = Simulation::start(&pool, ExamType::EToA, &mut rng);
        assert_eq!(sim.phase(), Phase::PartSummary { part: 0 });
        assert_eq!(action, TimerAction::Cancel);
        assert_eq!(sim.time_left(), 0);
    }

    #[test]
    fn empty_pool_runs_through_all_summaries_to_finished() {
        let mut rng = StdRng::seed_from_u64(14);
        let (mut sim, _) = Simulation::start(&[], ExamType::N, &mut rng);
        assert_eq!(sim.phase(), Phase::PartSummary { part: 0 });
        sim.continue_exam();
        assert_eq!(sim.phase(), Phase::PartSummary { part: 1 });
        sim.continue_exam();
        assert_eq!(sim.phase(), Phase::PartSummary { part: 2 });
        assert_eq!(sim.continue_exam(), TimerAction::Cancel);
        assert_eq!(sim.phase(), Phase::Finished);
    }

    #[test]
    fn current_exposes_part_label_and_ordinal() {
        let (mut sim, _) = start_n_to_e(30);
        let current = sim.current().unwrap();
        assert_eq!(current.part_label, "Technik E (E)");
        assert_eq!(current.ordinal, 1);
        assert_eq!(current.part_total, 25);

        sim.next();
        assert_eq!(sim.current().unwrap().ordinal, 2);

        answer_part(&mut sim, 0, 24);
        assert!(sim.current().is_none());
    }

    #[test]
    fn upgrade_exam_contains_only_its_incremental_part() {
        // 25 Vorschriften questions plus class-2 technical ones: N->E must
        // draw only the technical part.
        let mut pool = technik_pool(25, "2");
        pool.extend((0..25).map(|i| pool_question(&format!("V{i:03}"), &["Vorschriften"], "1")));
        let mut rng = StdRng::seed_from_u64(15);
        let (sim, _) = Simulation::start(&pool, ExamType::NToE, &mut rng);

        assert_eq!(sim.parts().len(), 1);
        let part = &sim.parts()[0];
        assert_eq!(part.label, "Technik E (E)");
        assert_eq!(part.questions.len(), 25);
        for q in &part.questions {
            assert_eq!(q.class, "2");
            assert!(q
                .category_path
                .iter()
                .any(|p| p.contains("Technische Kenntnisse")));
        }
    }
}
