//! Conversation engine for the campus landmark guide.
//!
//! Takes free-text utterances, works out which landmark and topic they refer
//! to (tolerating typos, partial names, and follow-ups that lean on earlier
//! turns), and composes grounded answers from a [`lg_core::KnowledgeStore`].
//!
//! ```text
//! utterance → IntentResolver (FuzzyMatcher + ContextTracker) → Intent
//!           → ResponseComposer (KnowledgeStore) → Response
//! ```

/// Turning intents into reply text.
pub mod compose;
/// Matcher and dialogue settings.
pub mod config;
/// Per-conversation memory of the active landmark and topic.
pub mod context;
/// Error types used throughout the crate.
pub mod error;
/// Utterance classification.
pub mod intent;
/// Approximate matching of utterances against aliases and topic keywords.
pub mod matcher;
/// The optional rewording seam applied after composition.
pub mod rephrase;
/// Conversation lifecycle: the shared engine and per-conversation loops.
pub mod session;

/// Re-export the composer and its output.
pub use compose::{Response, ResponseComposer};
/// Re-export configuration types.
pub use config::{DialogueConfig, MatcherConfig};
/// Re-export context types.
pub use context::{ContextTracker, ConversationState};
/// Re-export error types.
pub use error::{RephraseError, RephraseResult};
/// Re-export intent types.
pub use intent::{ControlKind, Intent, IntentResolver};
/// Re-export the matcher.
pub use matcher::{FuzzyMatcher, MatchCandidate};
/// Re-export the rephrasing seam.
pub use rephrase::{Rephrase, rephrase_or_original};
/// Re-export session types.
pub use session::{ConversationId, DialogueEngine, DialogueLoop, LoopState, TurnOutcome};
