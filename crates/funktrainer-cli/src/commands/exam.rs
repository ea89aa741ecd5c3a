//! The `funktrainer exam` command — timed multi-part simulation.
//!
//! Drives the core state machine interactively. The countdown lives here,
//! as the effect runner: one `tokio` interval at a time, created and torn
//! down only through the [`TimerAction`]s returned by the state machine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{self, Interval, MissedTickBehavior};

use funktrainer_core::report::ExamReport;
use funktrainer_core::scheme::ExamType;
use funktrainer_core::score::summarize;
use funktrainer_core::sim::{Phase, Simulation, TimerAction};
use funktrainer_core::{catalog, shuffle};

use crate::commands::report::print_report;
use crate::render;

/// The single active countdown interval.
struct Countdown(Option<Interval>);

impl Countdown {
    fn apply(&mut self, action: TimerAction) {
        match action {
            TimerAction::Arm { .. } => {
                let period = Duration::from_secs(1);
                let mut interval = time::interval_at(time::Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.0 = Some(interval);
            }
            TimerAction::Cancel => self.0 = None,
            TimerAction::Keep => {}
        }
    }

    async fn tick(&mut self) {
        match self.0.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

pub async fn execute(
    catalog_path: PathBuf,
    exam_type_str: String,
    seed: Option<u64>,
    output: Option<PathBuf>,
    images_dir: PathBuf,
) -> Result<()> {
    let exam_type: ExamType = exam_type_str
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let cat = catalog::load(&catalog_path)?;
    let flattened = catalog::flatten(&cat);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let pool = shuffle::shuffle_all(&flattened, &mut rng);
    tracing::debug!(%exam_type, pool = pool.len(), "starting simulation");

    print_scheme(exam_type);

    let (mut sim, action) = Simulation::start(&pool, exam_type, &mut rng);
    let mut countdown = Countdown(None);
    countdown.apply(action);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut redraw = true;

    loop {
        if redraw {
            draw(&sim, &images_dir);
            redraw = false;
        }
        if sim.phase() == Phase::Finished {
            break;
        }

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    println!("\nEingabe beendet, Simulation abgebrochen.");
                    break;
                };
                let input = line.trim().to_lowercase();
                if input == "q" {
                    println!("Simulation abgebrochen.");
                    break;
                }
                redraw = handle_input(&mut sim, &mut countdown, &input);
            }
            _ = countdown.tick() => {
                let phase_before = sim.phase();
                let action = sim.tick();
                countdown.apply(action);
                if sim.phase() != phase_before {
                    println!("\nZeit abgelaufen!");
                    redraw = true;
                } else if sim.time_left() % 60 == 0 || sim.time_left() <= 10 {
                    println!("  Verbleibende Zeit: {}", render::clock(sim.time_left()));
                }
            }
        }
    }

    let report = ExamReport::from_scores(exam_type, &summarize(&sim));
    println!();
    println!("Endergebnis");
    print_report(&report);

    if let Some(path) = output {
        report.save_json(&path)?;
        println!("Report gespeichert: {}", path.display());
    }

    Ok(())
}

fn print_scheme(exam_type: ExamType) {
    println!("Prüfungssimulation {exam_type}");
    for part in exam_type.parts() {
        println!(
            "  {}: {} Fragen ({} Min.)",
            part.label, part.count, part.duration_min
        );
    }
    println!();
}

/// Apply one line of user input; returns whether to redraw the screen.
fn handle_input(sim: &mut Simulation, countdown: &mut Countdown, input: &str) -> bool {
    match sim.phase() {
        Phase::Running { .. } => match input {
            "a" | "b" | "c" | "d" => {
                let id = sim
                    .current()
                    .and_then(|current| render::option_at(current.question, input))
                    .map(|option| option.id);
                match id {
                    Some(id) => {
                        sim.select(id);
                        println!("Auswahl: {}", input.to_uppercase());
                    }
                    None => println!("Eingabe nicht erkannt."),
                }
                false
            }
            "r" => {
                match sim.resolve() {
                    Some(true) => println!("Richtig!"),
                    Some(false) => {
                        println!("Leider falsch.");
                        if let Some(correct) = sim
                            .current()
                            .and_then(|current| current.question.correct_option())
                        {
                            println!("Richtige Antwort: {}", correct.text);
                        }
                    }
                    None => println!("Bitte zuerst eine Antwort wählen (a-d)."),
                }
                false
            }
            "n" => {
                if sim.is_resolved() {
                    let action = sim.next();
                    countdown.apply(action);
                    true
                } else {
                    println!("Bitte erst auflösen (r).");
                    false
                }
            }
            _ => {
                println!("Eingaben: a-d auswählen, r auflösen, n weiter, q abbrechen.");
                false
            }
        },
        Phase::PartSummary { .. } => match input {
            "c" | "" => {
                let action = sim.continue_exam();
                countdown.apply(action);
                true
            }
            _ => {
                println!("Eingaben: c weiter, q abbrechen.");
                false
            }
        },
        Phase::Finished => false,
    }
}

fn draw(sim: &Simulation, images_dir: &Path) {
    match sim.phase() {
        Phase::Running { .. } => {
            if let Some(current) = sim.current() {
                println!();
                println!(
                    "{} - {}   [{}]",
                    current.question.number,
                    current.part_label,
                    render::clock(sim.time_left())
                );
                println!("Frage {} / {}", current.ordinal, current.part_total);
                render::print_question(current.question, images_dir);
                render::print_options(current.question, images_dir);
                println!("(a-d auswählen, r auflösen, n weiter, q abbrechen)");
            }
        }
        Phase::PartSummary { part } => {
            if let Some(score) = summarize(sim).get(part) {
                println!();
                println!("Auswertung {}", score.label);
                if score.total == 0 {
                    println!("Keine Fragen für diesen Teil vorhanden (nicht wertbar).");
                } else {
                    println!("Richtig: {} / {}", score.correct, score.total);
                }
                println!("(c = weiter)");
            }
        }
        Phase::Finished => {}
    }
}
