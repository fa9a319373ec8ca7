pub mod ask;
pub mod chat;
pub mod check;
pub mod list;

use std::path::Path;

use lg_core::KnowledgeStore;
use lg_dialogue::{DialogueConfig, MatcherConfig};

/// Load a dataset, printing a diagnostic report to stderr on failure.
fn load_store(path: &Path) -> Result<KnowledgeStore, String> {
    KnowledgeStore::from_path(path).map_err(|err| {
        eprintln!("{:?}", miette::Report::new(err));
        format!("failed to load dataset '{}'", path.display())
    })
}

/// Default dialogue settings with any command-line overrides applied.
fn dialogue_config(threshold: Option<f64>, tie_gap: Option<f64>) -> DialogueConfig {
    let mut matcher = MatcherConfig::default();
    if let Some(threshold) = threshold {
        matcher = matcher.with_threshold(threshold);
    }
    if let Some(gap) = tie_gap {
        matcher = matcher.with_tie_gap(gap);
    }
    DialogueConfig::default().with_matcher(matcher)
}
