//! Classifying an utterance into an [`Intent`].

use std::sync::Arc;

use lg_core::text::normalize;
use lg_core::{EntityKey, Topic};

use crate::context::ContextTracker;
use crate::matcher::{FuzzyMatcher, MatchCandidate};

/// A conversation control request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// End the conversation.
    Quit,
    /// Show usage help.
    Help,
    /// Forget the active landmark and topic.
    Reset,
}

/// What the user asked for on one turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Both a landmark and a topic were named.
    EntityTopicQuery {
        /// The named landmark.
        entity: EntityKey,
        /// The named topic.
        topic: Topic,
        /// True when the landmark came from an approximate match.
        inferred: bool,
    },
    /// A topic about the landmark already under discussion.
    FollowUpTopicQuery {
        /// The named topic.
        topic: Topic,
    },
    /// A landmark, with the topic carried over (or the overview).
    FollowUpEntityQuery {
        /// The named landmark.
        entity: EntityKey,
        /// True when the landmark came from an approximate match.
        inferred: bool,
    },
    /// Several landmarks matched about equally well.
    Ambiguous {
        /// The tied candidates, best first.
        candidates: Vec<MatchCandidate>,
    },
    /// No landmark could be determined.
    Unresolved,
    /// A control command.
    ControlCommand {
        /// Which command.
        kind: ControlKind,
    },
}

const QUIT_WORDS: &[&str] = &["quit", "exit", "bye", "goodbye", "q"];
const HELP_WORDS: &[&str] = &["help", "?", "commands"];
const RESET_WORDS: &[&str] = &["reset", "start over", "new conversation"];

/// Match a whole utterance against the control vocabulary.
fn control_kind(utterance: &str) -> Option<ControlKind> {
    let raw = utterance.trim();
    if raw == "?" {
        return Some(ControlKind::Help);
    }
    let text = normalize(raw);
    if QUIT_WORDS.contains(&text.as_str()) {
        Some(ControlKind::Quit)
    } else if HELP_WORDS.contains(&text.as_str()) {
        Some(ControlKind::Help)
    } else if RESET_WORDS.contains(&text.as_str()) {
        Some(ControlKind::Reset)
    } else {
        None
    }
}

/// Turns utterances into intents using the matcher and conversation context.
///
/// Precedence: control commands, then explicit mentions, then context.
#[derive(Debug, Clone)]
pub struct IntentResolver {
    matcher: Arc<FuzzyMatcher>,
    max_choices: usize,
}

impl IntentResolver {
    /// Create a resolver offering at most `max_choices` landmarks when ambiguous.
    pub fn new(matcher: Arc<FuzzyMatcher>, max_choices: usize) -> Self {
        Self {
            matcher,
            max_choices: max_choices.max(2),
        }
    }

    /// Classify one utterance. Never fails and never mutates the context.
    pub fn resolve(&self, utterance: &str, context: &ContextTracker) -> Intent {
        let intent = self.classify(utterance, context);
        tracing::debug!(input = utterance, intent = ?intent, "intent resolved");
        intent
    }

    fn classify(&self, utterance: &str, context: &ContextTracker) -> Intent {
        if let Some(kind) = control_kind(utterance) {
            return Intent::ControlCommand { kind };
        }

        let candidates = self.matcher.match_entity(utterance);
        let tied = self.tied(&candidates);
        if tied.len() >= 2 {
            return Intent::Ambiguous { candidates: tied };
        }

        let explicit = candidates.first();
        let topic = self.matcher.match_topic(utterance);

        match (explicit, topic) {
            (Some(best), Some(topic)) => Intent::EntityTopicQuery {
                entity: best.entity_key.clone(),
                topic,
                inferred: best.score < 1.0,
            },
            (Some(best), None) => Intent::FollowUpEntityQuery {
                entity: best.entity_key.clone(),
                inferred: best.score < 1.0,
            },
            (None, Some(topic)) if context.resolve_entity(None).is_some() => {
                Intent::FollowUpTopicQuery { topic }
            }
            _ => Intent::Unresolved,
        }
    }

    /// Candidates whose score is within the tie gap of the best one.
    fn tied(&self, candidates: &[MatchCandidate]) -> Vec<MatchCandidate> {
        let Some(best) = candidates.first() else {
            return Vec::new();
        };
        let gap = self.matcher.config().tie_gap;
        candidates
            .iter()
            .take_while(|c| best.score - c.score < gap)
            .take(self.max_choices)
            .cloned()
            .collect()
    }
}
