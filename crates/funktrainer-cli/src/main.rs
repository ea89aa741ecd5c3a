//! funktrainer CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "funktrainer", version, about = "Amateur-radio exam trainer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Free-form practice over the question catalog (Lernmodus)
    Practice {
        /// Path to the question catalog JSON
        #[arg(long)]
        catalog: PathBuf,

        /// Only questions whose category path contains this title
        #[arg(long)]
        category: Option<String>,

        /// Only questions of this class (1, 2 or 3)
        #[arg(long)]
        class: Option<String>,

        /// Directory holding the catalog's SVG images
        #[arg(long, default_value = "svgs")]
        images_dir: PathBuf,
    },

    /// Timed multi-part exam simulation
    Exam {
        /// Path to the question catalog JSON
        #[arg(long)]
        catalog: PathBuf,

        /// Exam type: N, E, A, N->E, N->A or E->A
        #[arg(long, default_value = "N")]
        exam_type: String,

        /// Seed for reproducible question draws
        #[arg(long)]
        seed: Option<u64>,

        /// Write the final report JSON here
        #[arg(long)]
        output: Option<PathBuf>,

        /// Directory holding the catalog's SVG images
        #[arg(long, default_value = "svgs")]
        images_dir: PathBuf,
    },

    /// Check the catalog for content problems and exam coverage
    Validate {
        /// Path to the question catalog JSON
        #[arg(long)]
        catalog: PathBuf,
    },

    /// List the catalog's category tree with question counts
    Categories {
        /// Path to the question catalog JSON
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Print a previously saved exam report
    Report {
        /// Path to a report JSON written by `exam --output`
        #[arg(long)]
        path: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("funktrainer=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Practice {
            catalog,
            category,
            class,
            images_dir,
        } => commands::practice::execute(catalog, category, class, images_dir).await,
        Commands::Exam {
            catalog,
            exam_type,
            seed,
            output,
            images_dir,
        } => commands::exam::execute(catalog, exam_type, seed, output, images_dir).await,
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Categories { catalog } => commands::categories::execute(catalog),
        Commands::Report { path, format } => commands::report::execute(path, format),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
