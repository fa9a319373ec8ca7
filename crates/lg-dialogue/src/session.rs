//! Conversation lifecycle.
//!
//! A [`DialogueEngine`] owns the shared, read-only pieces (store and matcher)
//! and hands out [`DialogueLoop`]s, one per conversation. Each loop owns its
//! own context, so any number of conversations can run over one engine.

use std::fmt;
use std::sync::Arc;

use lg_core::KnowledgeStore;
use uuid::Uuid;

use crate::compose::{Response, ResponseComposer};
use crate::config::DialogueConfig;
use crate::context::{ContextTracker, ConversationState};
use crate::intent::{ControlKind, Intent, IntentResolver};
use crate::matcher::FuzzyMatcher;

/// Unique identifier for a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationId(pub Uuid);

impl ConversationId {
    /// Generate a new random conversation ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Where a conversation is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Waiting for the next utterance.
    AwaitingInput,
    /// Classifying an utterance.
    Resolving,
    /// Rendering the answer.
    Responding,
    /// The user quit; no further turns are processed.
    Ended,
}

/// The full result of one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// How the utterance was classified (`None` once the conversation has ended).
    pub intent: Option<Intent>,
    /// The reply.
    pub response: Response,
}

/// One conversation.
#[derive(Debug)]
pub struct DialogueLoop {
    id: ConversationId,
    store: Arc<KnowledgeStore>,
    resolver: IntentResolver,
    composer: ResponseComposer,
    context: ContextTracker,
    state: LoopState,
}

impl DialogueLoop {
    fn new(store: Arc<KnowledgeStore>, resolver: IntentResolver) -> Self {
        let id = ConversationId::new();
        tracing::debug!(conversation = %id, "conversation started");
        Self {
            id,
            store,
            resolver,
            composer: ResponseComposer::new(),
            context: ContextTracker::new(),
            state: LoopState::AwaitingInput,
        }
    }

    /// Run one turn: classify, answer, and update the context.
    pub fn process(&mut self, utterance: &str) -> TurnOutcome {
        let span = tracing::debug_span!("turn", conversation = %self.id);
        let _enter = span.enter();

        if self.state == LoopState::Ended {
            tracing::debug!("turn submitted after the conversation ended");
            return TurnOutcome {
                intent: None,
                response: Response::terminal("This conversation has ended."),
            };
        }

        self.transition(LoopState::Resolving);
        let intent = self.resolver.resolve(utterance, &self.context);

        self.transition(LoopState::Responding);
        let response = self
            .composer
            .compose(&intent, &self.store, self.context.state());
        self.apply(&intent);

        if response.is_terminal {
            self.transition(LoopState::Ended);
        } else {
            self.transition(LoopState::AwaitingInput);
        }
        TurnOutcome {
            intent: Some(intent),
            response,
        }
    }

    /// Run one turn and return only the reply.
    pub fn submit_turn(&mut self, utterance: &str) -> Response {
        self.process(utterance).response
    }

    /// Record what an answered turn was about.
    fn apply(&mut self, intent: &Intent) {
        match intent {
            Intent::EntityTopicQuery { entity, topic, .. } => {
                self.context.update(entity.clone(), *topic);
            }
            Intent::FollowUpTopicQuery { topic } => {
                if let Some(entity) = self.context.resolve_entity(None) {
                    self.context.update(entity, *topic);
                }
            }
            Intent::FollowUpEntityQuery { entity, .. } => {
                let topic = self.context.resolve_topic(None);
                self.context.update(entity.clone(), topic);
            }
            Intent::ControlCommand {
                kind: ControlKind::Reset,
            } => self.context.reset(),
            Intent::Ambiguous { .. } | Intent::Unresolved | Intent::ControlCommand { .. } => {}
        }
    }

    fn transition(&mut self, next: LoopState) {
        tracing::trace!(from = ?self.state, to = ?next, "loop state");
        self.state = next;
    }

    /// This conversation's ID.
    pub fn id(&self) -> ConversationId {
        self.id
    }

    /// Where the conversation is in its turn cycle.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// The conversation's context.
    pub fn context(&self) -> &ConversationState {
        self.context.state()
    }

    /// Returns true once the user has quit.
    pub fn is_ended(&self) -> bool {
        self.state == LoopState::Ended
    }
}

/// Shared entry point: one store and matcher, many conversations.
#[derive(Debug, Clone)]
pub struct DialogueEngine {
    store: Arc<KnowledgeStore>,
    matcher: Arc<FuzzyMatcher>,
    config: DialogueConfig,
}

impl DialogueEngine {
    /// Build an engine over a loaded store.
    pub fn new(store: KnowledgeStore, config: DialogueConfig) -> Self {
        Self::from_shared(Arc::new(store), config)
    }

    /// Build an engine over a store that is already shared.
    pub fn from_shared(store: Arc<KnowledgeStore>, config: DialogueConfig) -> Self {
        let matcher = Arc::new(FuzzyMatcher::new(&store, config.matcher));
        Self {
            store,
            matcher,
            config,
        }
    }

    /// Start a conversation with an empty context.
    pub fn start_conversation(&self) -> DialogueLoop {
        let resolver = IntentResolver::new(Arc::clone(&self.matcher), self.config.max_choices);
        DialogueLoop::new(Arc::clone(&self.store), resolver)
    }

    /// Run one turn of `conversation`.
    pub fn submit_turn(&self, conversation: &mut DialogueLoop, utterance: &str) -> Response {
        conversation.submit_turn(utterance)
    }

    /// The knowledge store.
    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    /// The active configuration.
    pub fn config(&self) -> &DialogueConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{campus_store, store_from};
    use lg_core::{EntityKey, Topic};

    fn engine() -> DialogueEngine {
        DialogueEngine::new(campus_store(), DialogueConfig::default())
    }

    fn active(conversation: &DialogueLoop) -> (Option<&str>, Option<Topic>) {
        let state = conversation.context();
        (
            state.active_entity.as_ref().map(EntityKey::as_str),
            state.active_topic,
        )
    }

    #[test]
    fn overview_then_follow_up_topic() {
        let engine = engine();
        let mut chat = engine.start_conversation();

        let first = chat.process("Tell me about EMPAC");
        assert_eq!(
            first.intent,
            Some(Intent::EntityTopicQuery {
                entity: EntityKey::from("empac"),
                topic: Topic::General,
                inferred: false,
            })
        );
        assert!(first.response.display_text.contains("opened in October 2008"));
        assert_eq!(active(&chat), (Some("empac"), Some(Topic::General)));

        let second = chat.process("its architecture");
        assert_eq!(
            second.intent,
            Some(Intent::FollowUpTopicQuery {
                topic: Topic::Architecture
            })
        );
        assert!(second.response.display_text.starts_with("EMPAC features contemporary architecture."));
        assert_eq!(active(&chat), (Some("empac"), Some(Topic::Architecture)));
        assert_eq!(chat.context().turn_count, 2);
        assert_eq!(chat.state(), LoopState::AwaitingInput);
    }

    #[test]
    fn follow_up_entity_keeps_topic() {
        let engine = engine();
        let mut chat = engine.start_conversation();
        chat.submit_turn("what is the architecture of west hall");
        let reply = chat.submit_turn("what about folsom?");
        assert!(reply.display_text.starts_with("Folsom Library features Brutalist architecture."));
        assert_eq!(active(&chat), (Some("folsom_library"), Some(Topic::Architecture)));
    }

    #[test]
    fn nonsense_leaves_context_untouched() {
        let engine = engine();
        let mut chat = engine.start_conversation();
        let outcome = chat.process("asdkfj");
        assert_eq!(outcome.intent, Some(Intent::Unresolved));
        for name in [
            "Russell Sage Laboratory",
            "West Hall",
            "Rensselaer Union",
            "Folsom Library",
            "EMPAC",
        ] {
            assert!(outcome.response.display_text.contains(name), "{name}");
        }
        assert_eq!(chat.context(), &ConversationState::default());
    }

    #[test]
    fn ambiguity_leaves_context_untouched() {
        let engine = DialogueEngine::new(
            store_from(&[("north_hall", "North Hall", &[]), ("north_gate", "North Gate", &[])]),
            DialogueConfig::default(),
        );
        let mut chat = engine.start_conversation();
        chat.submit_turn("north hall");
        let before = chat.context().clone();

        let outcome = chat.process("north");
        assert!(matches!(outcome.intent, Some(Intent::Ambiguous { .. })));
        assert!(outcome.response.display_text.contains("- North Gate"));
        assert_eq!(chat.context(), &before);
    }

    #[test]
    fn missing_topic_falls_back_but_remembers_request() {
        let engine = engine();
        let mut chat = engine.start_conversation();
        let reply = chat.submit_turn("events at russell sage");
        assert!(reply.display_text.contains("so here is an overview"));
        assert_eq!(active(&chat), (Some("russell_sage"), Some(Topic::Events)));
    }

    #[test]
    fn union_facilities_question_lists_them() {
        let engine = engine();
        let mut chat = engine.start_conversation();
        let outcome = chat.process("what facilities does the union have");
        assert_eq!(
            outcome.intent,
            Some(Intent::EntityTopicQuery {
                entity: EntityKey::from("rpi_union"),
                topic: Topic::CurrentUse,
                inferred: false,
            })
        );
        assert!(outcome.response.display_text.contains("the campus bookstore"));
        assert!(!outcome.response.display_text.contains("here is an overview"));

        let rooms = chat.submit_turn("what rooms are there");
        assert!(rooms.display_text.contains("meeting rooms"));
    }

    #[test]
    fn quit_ends_the_conversation() {
        let engine = engine();
        let mut chat = engine.start_conversation();
        chat.submit_turn("tell me about west hall");

        let bye = engine.submit_turn(&mut chat, "quit");
        assert!(bye.is_terminal);
        assert!(chat.is_ended());
        assert_eq!(chat.state(), LoopState::Ended);

        let turns = chat.context().turn_count;
        let after = chat.process("tell me about empac");
        assert_eq!(after.intent, None);
        assert!(after.response.is_terminal);
        assert_eq!(chat.context().turn_count, turns);
    }

    #[test]
    fn reset_clears_context() {
        let engine = engine();
        let mut chat = engine.start_conversation();
        chat.submit_turn("tell me about west hall");
        let reply = chat.submit_turn("start over");
        assert!(!reply.is_terminal);
        assert_eq!(active(&chat), (None, None));
        assert_eq!(
            chat.process("its history").intent,
            Some(Intent::Unresolved)
        );
    }

    #[test]
    fn help_does_not_count_as_a_turn() {
        let engine = engine();
        let mut chat = engine.start_conversation();
        chat.submit_turn("help");
        assert_eq!(chat.context().turn_count, 0);
    }

    #[test]
    fn conversations_are_independent() {
        let engine = engine();
        let mut a = engine.start_conversation();
        let mut b = engine.start_conversation();
        assert_ne!(a.id(), b.id());

        a.submit_turn("tell me about empac");
        assert_eq!(b.process("its history").intent, Some(Intent::Unresolved));
        assert_eq!(active(&a), (Some("empac"), Some(Topic::General)));
    }

    #[test]
    fn conversation_id_display_is_short() {
        assert_eq!(ConversationId::new().to_string().len(), 8);
    }
}
