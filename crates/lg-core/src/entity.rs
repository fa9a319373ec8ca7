use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::topic::Topic;

/// Stable identifier of a landmark, taken from the dataset key (e.g. `empac`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(String);

impl EntityKey {
    /// Create a key from any string-like value.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One dated entry of a timeline field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Year (or other date label) of the entry.
    pub year: String,
    /// What happened.
    pub event: String,
}

impl TimelineEntry {
    /// Create a timeline entry.
    pub fn new(year: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            event: event.into(),
        }
    }
}

/// The value of a payload field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    /// A single free-text value.
    Text(String),
    /// An ordered list of short phrases.
    List(Vec<String>),
    /// Dated entries in chronological order.
    Timeline(Vec<TimelineEntry>),
}

/// A labelled piece of information within a topic payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Dataset label, e.g. `style` or `features`.
    pub label: String,
    /// The field's content.
    pub value: FieldValue,
}

/// The free-text fields known about one topic of one landmark, in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPayload {
    fields: Vec<Field>,
}

impl TopicPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.
    pub fn push(&mut self, label: impl Into<String>, value: FieldValue) {
        self.fields.push(Field {
            label: label.into(),
            value,
        });
    }

    /// Append a text field (builder style).
    pub fn with_text(mut self, label: impl Into<String>, text: impl Into<String>) -> Self {
        self.push(label, FieldValue::Text(text.into()));
        self
    }

    /// Append a list field (builder style).
    pub fn with_list<I, S>(mut self, label: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(
            label,
            FieldValue::List(items.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Append a timeline field (builder style).
    pub fn with_timeline(mut self, label: impl Into<String>, entries: Vec<TimelineEntry>) -> Self {
        self.push(label, FieldValue::Timeline(entries));
        self
    }

    /// All fields in order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by label.
    pub fn get(&self, label: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| &f.value)
    }

    /// Returns true if the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Everything known about one landmark. Immutable once the store is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    key: EntityKey,
    name: String,
    aliases: Vec<String>,
    payloads: BTreeMap<Topic, TopicPayload>,
}

impl EntityRecord {
    /// Create a record with no aliases and no payloads.
    pub fn new(key: impl Into<EntityKey>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            aliases: Vec::new(),
            payloads: BTreeMap::new(),
        }
    }

    /// Add an alias (builder style). Duplicates are ignored.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        if !self.aliases.contains(&alias) {
            self.aliases.push(alias);
        }
        self
    }

    /// Attach the payload for a topic (builder style), replacing any previous one.
    pub fn with_payload(mut self, topic: Topic, payload: TopicPayload) -> Self {
        self.payloads.insert(topic, payload);
        self
    }

    /// The record's key.
    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Aliases as written in the dataset (not including the display name).
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The payload for a topic, if the landmark has one.
    pub fn payload(&self, topic: Topic) -> Option<&TopicPayload> {
        self.payloads.get(&topic).filter(|p| !p.is_empty())
    }

    /// Returns true if the landmark has data for the topic.
    pub fn has_topic(&self, topic: Topic) -> bool {
        self.payload(topic).is_some()
    }

    /// Topics with data, in priority order.
    pub fn topics(&self) -> impl Iterator<Item = Topic> + '_ {
        self.payloads
            .iter()
            .filter(|(_, p)| !p.is_empty())
            .map(|(t, _)| *t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EntityRecord {
        EntityRecord::new("west_hall", "West Hall")
            .with_alias("west")
            .with_alias("west")
            .with_payload(
                Topic::General,
                TopicPayload::new().with_text("summary", "Built in 1869."),
            )
            .with_payload(
                Topic::Architecture,
                TopicPayload::new().with_list("features", ["a mansard roof"]),
            )
            .with_payload(Topic::Events, TopicPayload::new())
    }

    #[test]
    fn aliases_are_deduplicated() {
        assert_eq!(sample().aliases().to_vec(), vec!["west".to_string()]);
    }

    #[test]
    fn topics_skip_empty_payloads_and_follow_priority() {
        let topics: Vec<Topic> = sample().topics().collect();
        assert_eq!(topics, vec![Topic::Architecture, Topic::General]);
        assert!(!sample().has_topic(Topic::Events));
    }

    #[test]
    fn payload_field_lookup() {
        let record = sample();
        let payload = record.payload(Topic::Architecture).unwrap();
        assert_eq!(
            payload.get("features"),
            Some(&FieldValue::List(vec!["a mansard roof".to_string()]))
        );
        assert!(payload.get("style").is_none());
    }

    #[test]
    fn key_display() {
        assert_eq!(EntityKey::from("empac").to_string(), "empac");
    }
}
