//! Per-conversation memory of the landmark and topic under discussion.

use lg_core::{EntityKey, Topic};

/// What the conversation is currently about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    /// The landmark most recently answered about.
    pub active_entity: Option<EntityKey>,
    /// The topic most recently asked for.
    pub active_topic: Option<Topic>,
    /// Number of answered turns.
    pub turn_count: u32,
}

/// Owns a [`ConversationState`] and fills gaps in an utterance from it.
///
/// Resolution is read-only; [`ContextTracker::update`] and
/// [`ContextTracker::reset`] are the only mutators.
#[derive(Debug, Clone, Default)]
pub struct ContextTracker {
    state: ConversationState,
}

impl ContextTracker {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// The explicit entity if given, otherwise the active one.
    pub fn resolve_entity(&self, explicit: Option<&EntityKey>) -> Option<EntityKey> {
        explicit.or(self.state.active_entity.as_ref()).cloned()
    }

    /// The explicit topic if given, otherwise the active one, otherwise [`Topic::General`].
    pub fn resolve_topic(&self, explicit: Option<Topic>) -> Topic {
        explicit
            .or(self.state.active_topic)
            .unwrap_or(Topic::General)
    }

    /// Record an answered turn.
    pub fn update(&mut self, entity: EntityKey, topic: Topic) {
        tracing::trace!(
            entity = %entity,
            topic = %topic,
            turn = self.state.turn_count + 1,
            "context updated"
        );
        self.state.active_entity = Some(entity);
        self.state.active_topic = Some(topic);
        self.state.turn_count = self.state.turn_count.saturating_add(1);
    }

    /// Forget the active entity and topic. The turn count is kept.
    pub fn reset(&mut self) {
        tracing::trace!("context reset");
        self.state.active_entity = None;
        self.state.active_topic = None;
    }

    /// The current state.
    pub fn state(&self) -> &ConversationState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empac() -> EntityKey {
        EntityKey::from("empac")
    }

    #[test]
    fn empty_context_resolves_nothing() {
        let ctx = ContextTracker::new();
        assert_eq!(ctx.resolve_entity(None), None);
        assert_eq!(ctx.resolve_topic(None), Topic::General);
        assert_eq!(ctx.state(), &ConversationState::default());
    }

    #[test]
    fn explicit_wins_over_context() {
        let mut ctx = ContextTracker::new();
        ctx.update(empac(), Topic::History);
        let west = EntityKey::from("west_hall");
        assert_eq!(ctx.resolve_entity(Some(&west)), Some(west));
        assert_eq!(ctx.resolve_topic(Some(Topic::Events)), Topic::Events);
    }

    #[test]
    fn resolution_is_side_effect_free() {
        let mut ctx = ContextTracker::new();
        ctx.update(empac(), Topic::Architecture);
        let before = ctx.state().clone();
        for _ in 0..3 {
            assert_eq!(ctx.resolve_topic(None), Topic::Architecture);
            assert_eq!(ctx.resolve_entity(None), Some(empac()));
        }
        assert_eq!(ctx.state(), &before);
    }

    #[test]
    fn update_counts_turns() {
        let mut ctx = ContextTracker::new();
        ctx.update(empac(), Topic::General);
        ctx.update(EntityKey::from("west_hall"), Topic::History);
        assert_eq!(ctx.state().turn_count, 2);
        assert_eq!(ctx.state().active_entity, Some(EntityKey::from("west_hall")));
        assert_eq!(ctx.state().active_topic, Some(Topic::History));
    }

    #[test]
    fn reset_clears_subject_but_keeps_count() {
        let mut ctx = ContextTracker::new();
        ctx.update(empac(), Topic::Events);
        ctx.reset();
        assert_eq!(ctx.resolve_entity(None), None);
        assert_eq!(ctx.resolve_topic(None), Topic::General);
        assert_eq!(ctx.state().turn_count, 1);
    }
}
