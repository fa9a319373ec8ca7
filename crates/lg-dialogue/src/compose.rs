//! Turning intents into the text shown to the user.
//!
//! Answers are assembled from the landmark's topic payload: each known field
//! label has a sentence template, anything else renders as `Label: value.`.
//! Every answer ends with an offer of the landmark's other topics.

use lg_core::{EntityKey, EntityRecord, Field, FieldValue, KnowledgeStore, Topic};

use crate::context::ConversationState;
use crate::intent::{ControlKind, Intent};
use crate::matcher::MatchCandidate;

/// The reply to one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Text to show the user.
    pub display_text: String,
    /// True when the conversation ends with this response.
    pub is_terminal: bool,
}

impl Response {
    /// A reply that keeps the conversation going.
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            display_text: text.into(),
            is_terminal: false,
        }
    }

    /// A reply that ends the conversation.
    pub fn terminal(text: impl Into<String>) -> Self {
        Self {
            display_text: text.into(),
            is_terminal: true,
        }
    }
}

/// Renders intents against the knowledge store.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseComposer;

impl ResponseComposer {
    /// Create a composer.
    pub fn new() -> Self {
        Self
    }

    /// Render the response for `intent`.
    ///
    /// `state` is the context *before* this turn; follow-ups take the missing
    /// landmark or topic from it. Never fails: an internal lookup fault is
    /// logged and rendered as a clarification prompt.
    pub fn compose(
        &self,
        intent: &Intent,
        store: &KnowledgeStore,
        state: &ConversationState,
    ) -> Response {
        match intent {
            Intent::EntityTopicQuery {
                entity,
                topic,
                inferred,
            } => self.answer(store, entity, *topic, *inferred),
            Intent::FollowUpTopicQuery { topic } => match &state.active_entity {
                Some(entity) => self.answer(store, entity, *topic, false),
                None => self.unresolved(store),
            },
            Intent::FollowUpEntityQuery { entity, inferred } => {
                let topic = state.active_topic.unwrap_or(Topic::General);
                self.answer(store, entity, topic, *inferred)
            }
            Intent::Ambiguous { candidates } => self.ambiguous(store, candidates),
            Intent::Unresolved => self.unresolved(store),
            Intent::ControlCommand { kind } => self.control(store, *kind),
        }
    }

    fn answer(
        &self,
        store: &KnowledgeStore,
        key: &EntityKey,
        topic: Topic,
        inferred: bool,
    ) -> Response {
        let record = match store.lookup(key) {
            Ok(record) => record,
            Err(err) => {
                tracing::error!(error = %err, "landmark vanished between match and compose");
                return self.unresolved(store);
            }
        };
        let name = record.name();

        let mut page = Page::default();
        if inferred {
            page.sentence(format!("I think you might be referring to {name}."));
        }

        let (served, payload) = match record.payload(topic) {
            Some(payload) => (topic, payload),
            None => {
                let Some(overview) = record.payload(Topic::General) else {
                    tracing::error!(entity = %key, "landmark has no overview");
                    return self.unresolved(store);
                };
                if topic != Topic::General {
                    page.sentence(format!(
                        "I don't have {} details for {name}, so here is an overview.",
                        topic.label()
                    ));
                }
                (Topic::General, overview)
            }
        };

        for field in payload.fields() {
            match render_field(name, served, field) {
                Some(Piece::Sentence(s)) => page.sentence(s),
                Some(Piece::Block(lines)) => page.block(lines),
                None => {}
            }
        }

        if let Some(offer) = offer(store, record, served) {
            page.block(vec![offer]);
        }
        Response::reply(page.finish())
    }

    fn ambiguous(&self, store: &KnowledgeStore, candidates: &[MatchCandidate]) -> Response {
        let mut text = String::from("I'm not sure which landmark you mean. Are you asking about:\n");
        for candidate in candidates {
            match store.lookup(&candidate.entity_key) {
                Ok(record) => {
                    text.push_str("- ");
                    text.push_str(record.name());
                    text.push('\n');
                }
                Err(err) => tracing::error!(error = %err, "ambiguous candidate not in store"),
            }
        }
        text.push_str("Could you please clarify?");
        Response::reply(text)
    }

    fn unresolved(&self, store: &KnowledgeStore) -> Response {
        Response::reply(format!(
            "I'm not sure which landmark you're asking about. Could you specify one of: {}?",
            join_list(&store.display_names(), "or")
        ))
    }

    fn control(&self, store: &KnowledgeStore, kind: ControlKind) -> Response {
        match kind {
            ControlKind::Quit => Response::terminal("Thank you for chatting about campus history! Goodbye!"),
            ControlKind::Help => {
                let topics: Vec<&str> = Topic::ALL
                    .iter()
                    .filter(|t| **t != Topic::General)
                    .map(|t| t.label())
                    .collect();
                Response::reply(format!(
                    "You can ask me about {}.\n\
                     Ask about their {}, or just name one for an overview.\n\
                     Say \"start over\" to change the subject or \"quit\" to leave.",
                    join_list(&store.display_names(), "and"),
                    join_list(&topics, "or"),
                ))
            }
            ControlKind::Reset => Response::reply(
                "Okay, let's start over. Which landmark would you like to hear about?",
            ),
        }
    }
}

/// The closing offer: the landmark's other topics, or other landmarks.
fn offer(store: &KnowledgeStore, record: &EntityRecord, served: Topic) -> Option<String> {
    let topics: Vec<String> = record
        .topics()
        .filter(|t| *t != Topic::General && *t != served)
        .map(|t| t.label().to_string())
        .collect();
    if !topics.is_empty() {
        return Some(format!(
            "Would you like to know more about its {}?",
            join_list(&topics, "or")
        ));
    }

    let others: Vec<&str> = store
        .records()
        .filter(|r| r.key() != record.key())
        .map(EntityRecord::name)
        .collect();
    if others.is_empty() {
        return None;
    }
    Some(format!(
        "Would you like to hear about {} instead?",
        join_list(&others, "or")
    ))
}

enum Piece {
    Sentence(String),
    Block(Vec<String>),
}

/// Sentences collect into paragraphs; blocks (timelines, offers) get their own lines.
#[derive(Default)]
struct Page {
    lines: Vec<String>,
    paragraph: Vec<String>,
}

impl Page {
    fn sentence(&mut self, sentence: String) {
        self.paragraph.push(sentence);
    }

    fn block(&mut self, lines: Vec<String>) {
        self.flush();
        self.lines.extend(lines);
    }

    fn flush(&mut self) {
        if !self.paragraph.is_empty() {
            self.lines.push(self.paragraph.join(" "));
            self.paragraph.clear();
        }
    }

    fn finish(mut self) -> String {
        self.flush();
        self.lines.join("\n")
    }
}

fn render_field(name: &str, topic: Topic, field: &Field) -> Option<Piece> {
    let label = field.label.as_str();
    let value = match &field.value {
        FieldValue::Timeline(entries) => {
            if entries.is_empty() {
                return None;
            }
            let heading = if label == "timeline" {
                "Key events in its history include:".to_string()
            } else {
                format!("{}:", humanize(label))
            };
            let lines = std::iter::once(heading)
                .chain(entries.iter().map(|e| format!("- {}: {}", e.year, clean(&e.event))))
                .collect();
            return Some(Piece::Block(lines));
        }
        FieldValue::Text(text) => clean(text).to_string(),
        FieldValue::List(items) => join_list(items, "and"),
    };
    if value.is_empty() {
        return None;
    }

    let sentence = match label {
        "summary" | "evolution" => value,
        "built" | "established" | "dedicated" => format!("{name} was {label} in {value}"),
        "significance" if topic == Topic::General => format!("It is notable for being {value}"),
        "significance" => format!("It is historically significant as {value}"),
        "origins" => format!("Its origins date back to {value}"),
        "original_purpose" => format!("{name}'s original purpose was as {value}"),
        "builder" => format!("It was built by {value}"),
        "namesake" => format!("It was named after {value}"),
        "style" => format!("{name} features {value} architecture"),
        "features" if topic == Topic::Architecture => {
            format!("Notable architectural features include: {value}")
        }
        "features" => format!("Features include: {value}"),
        "architect" => format!("It was designed by {value}"),
        "departments" => format!("{name} currently houses {value}"),
        "department" => format!("{name} currently houses the {value}"),
        "facilities" => format!("Its facilities include: {value}"),
        "clubs" => format!("It hosts {value}"),
        "activities" => format!("These include {value}"),
        "events" if topic == Topic::Events => {
            format!("{name} hosts various events including: {value}")
        }
        "events" => format!("Regular events include: {value}"),
        "management" => format!("It is a {value}"),
        _ => format!("{}: {value}", humanize(label)),
    };
    Some(Piece::Sentence(format!("{sentence}.")))
}

/// Trim whitespace and trailing periods.
fn clean(text: &str) -> &str {
    text.trim().trim_end_matches('.').trim_end()
}

/// `snake_case` label to `Sentence case`.
fn humanize(label: &str) -> String {
    let spaced = label.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `a`, `a or b`, `a, b, or c`.
fn join_list<S: AsRef<str>>(items: &[S], conjunction: &str) -> String {
    let items: Vec<&str> = items
        .iter()
        .map(|s| clean(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect();
    match items.as_slice() {
        [] => String::new(),
        [one] => (*one).to_string(),
        [a, b] => format!("{a} {conjunction} {b}"),
        [rest @ .., last] => format!("{}, {conjunction} {last}", rest.join(", ")),
    }
}
