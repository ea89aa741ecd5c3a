//! Terminal rendering helpers.
//!
//! Question and answer texts may embed `$...$` / `$$...$$` math markup;
//! they are printed verbatim so the markers stay intact for an external
//! renderer. Image identifiers resolve to `<images-dir>/<id>.svg`.

use std::path::{Path, PathBuf};

use funktrainer_core::model::{AnswerOption, ShuffledQuestion};

/// Resolve an image identifier to its SVG path.
pub fn image_path(images_dir: &Path, id: &str) -> PathBuf {
    images_dir.join(format!("{id}.svg"))
}

/// Print a question prompt with its optional image reference.
pub fn print_question(q: &ShuffledQuestion, images_dir: &Path) {
    println!("{}", q.text);
    if let Some(id) = &q.picture {
        println!("  [Abbildung: {}]", image_path(images_dir, id).display());
    }
}

/// Print the four options labeled by display position (A..D).
pub fn print_options(q: &ShuffledQuestion, images_dir: &Path) {
    for (pos, option) in q.answers.iter().enumerate() {
        let letter = (b'A' + pos as u8) as char;
        println!("  {letter}: {}", option.text);
        if let Some(id) = &option.picture {
            println!("     [Abbildung: {}]", image_path(images_dir, id).display());
        }
    }
}

/// Map a typed display letter (a-d) to the option at that position.
///
/// The user addresses options by where they appear on screen; the
/// returned option still carries its original slot id.
pub fn option_at<'a>(q: &'a ShuffledQuestion, input: &str) -> Option<&'a AnswerOption> {
    let pos = match input {
        "a" => 0,
        "b" => 1,
        "c" => 2,
        "d" => 3,
        _ => return None,
    };
    q.answers.get(pos)
}

/// Format remaining seconds as `MM:SS`.
pub fn clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
