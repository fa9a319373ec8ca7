use std::path::Path;

use colored::Colorize;
use lg_dialogue::{DialogueConfig, DialogueEngine};

pub fn run(data: &Path, utterances: &[String]) -> Result<(), String> {
    let store = super::load_store(data)?;
    let engine = DialogueEngine::new(store, DialogueConfig::default());
    let mut conversation = engine.start_conversation();

    for utterance in utterances {
        let response = engine.submit_turn(&mut conversation, utterance);
        println!("{} {utterance}", "You:".bold());
        println!("{} {}\n", "Bot:".bold().cyan(), response.display_text);
        if response.is_terminal {
            break;
        }
    }

    Ok(())
}
