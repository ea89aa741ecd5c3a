//! The `funktrainer practice` command (Lernmodus).
//!
//! Cycles through the filtered question pool with wraparound; answers are
//! checked immediately, without timing or scoring.

use std::path::PathBuf;

use anyhow::Result;
use rand::thread_rng;
use tokio::io::{AsyncBufReadExt, BufReader};

use funktrainer_core::model::ShuffledQuestion;
use funktrainer_core::{catalog, shuffle};

use crate::render;

pub async fn execute(
    catalog_path: PathBuf,
    category: Option<String>,
    class: Option<String>,
    images_dir: PathBuf,
) -> Result<()> {
    let cat = catalog::load(&catalog_path)?;
    let flattened = catalog::flatten(&cat);
    let mut rng = thread_rng();
    let pool = shuffle::shuffle_all(&flattened, &mut rng);

    let filtered: Vec<ShuffledQuestion> = pool
        .into_iter()
        .filter(|q| {
            let category_ok = category
                .as_ref()
                .map_or(true, |wanted| q.category_path.iter().any(|p| p == wanted));
            let class_ok = class.as_ref().map_or(true, |wanted| &q.class == wanted);
            category_ok && class_ok
        })
        .collect();

    if filtered.is_empty() {
        println!("Keine Fragen gefunden.");
        return Ok(());
    }

    println!(
        "Lernmodus: {} Fragen. Antworten mit a-d, n = nächste Frage, q = beenden.",
        filtered.len()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut index = 0usize;

    loop {
        let question = &filtered[index];
        println!();
        println!("{} ({})", question.number, question.category_path.join(" > "));
        render::print_question(question, &images_dir);
        render::print_options(question, &images_dir);

        loop {
            let Some(line) = lines.next_line().await? else {
                return Ok(());
            };
            let input = line.trim().to_lowercase();
            match input.as_str() {
                "q" => return Ok(()),
                "n" => break,
                _ => match render::option_at(question, &input) {
                    Some(option) if option.correct => println!("Richtig!"),
                    Some(_) => println!("Leider falsch."),
                    None => println!("Eingabe nicht erkannt (a-d, n, q)."),
                },
            }
        }

        index = (index + 1) % filtered.len();
    }
}
