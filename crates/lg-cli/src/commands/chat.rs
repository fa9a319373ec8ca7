use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use lg_dialogue::{DialogueEngine, rephrase_or_original};

use crate::rephrase::OpenAiRephraser;

pub fn run(
    data: &Path,
    rephrase: bool,
    threshold: Option<f64>,
    tie_gap: Option<f64>,
) -> Result<(), String> {
    let store = super::load_store(data)?;
    let engine = DialogueEngine::new(store, super::dialogue_config(threshold, tie_gap));

    let rephraser = if rephrase {
        match OpenAiRephraser::from_env() {
            Ok(client) => Some(client),
            Err(e) => {
                eprintln!(
                    "{}",
                    format!("warning: {e}; answers will not be rephrased").yellow()
                );
                None
            }
        }
    } else {
        None
    };

    let mut conversation = engine.start_conversation();

    println!("  {} Landmark Guide", "Welcome to".bold());
    println!(
        "  Ask about {}.",
        engine.store().display_names().join(", ")
    );
    println!("  Type 'help' for examples, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("{} ", "You:".bold());
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let response = conversation.submit_turn(input);
        let text = match &rephraser {
            Some(client) if !response.is_terminal => {
                rephrase_or_original(client, &response.display_text)
            }
            _ => response.display_text,
        };
        println!("{} {text}\n", "Bot:".bold().cyan());

        if response.is_terminal {
            break;
        }
    }

    Ok(())
}
