//! CLI frontend for Landmark Guide, a conversational guide to campus landmarks.

mod commands;
mod logging;
mod rephrase;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

const DEFAULT_DATA: &str = "data/knowledge_base.json";

#[derive(Parser)]
#[command(
    name = "lg",
    about = "Landmark Guide: chat about the history of campus landmarks",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log matching decisions to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive conversation
    Chat {
        /// Landmark dataset (JSON)
        #[arg(short, long, default_value = DEFAULT_DATA)]
        data: PathBuf,

        /// Reword answers with OpenAI (needs OPENAI_API_KEY)
        #[arg(long)]
        rephrase: bool,

        /// Minimum match score for a landmark or topic (0.0-1.0)
        #[arg(long)]
        threshold: Option<f64>,

        /// Score gap below which two landmarks count as ambiguous (0.0-1.0)
        #[arg(long)]
        tie_gap: Option<f64>,
    },

    /// Answer one or more utterances as consecutive turns of one conversation
    Ask {
        /// The utterances, in order
        #[arg(required = true)]
        utterances: Vec<String>,

        /// Landmark dataset (JSON)
        #[arg(short, long, default_value = DEFAULT_DATA)]
        data: PathBuf,
    },

    /// List the landmarks in a dataset
    List {
        /// Landmark dataset (JSON)
        #[arg(short, long, default_value = DEFAULT_DATA)]
        data: PathBuf,
    },

    /// Validate a dataset
    Check {
        /// Landmark dataset (JSON)
        #[arg(short, long, default_value = DEFAULT_DATA)]
        data: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Chat {
            data,
            rephrase,
            threshold,
            tie_gap,
        } => commands::chat::run(&data, rephrase, threshold, tie_gap),
        Commands::Ask { utterances, data } => commands::ask::run(&data, &utterances),
        Commands::List { data } => commands::list::run(&data),
        Commands::Check { data } => commands::check::run(&data),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
