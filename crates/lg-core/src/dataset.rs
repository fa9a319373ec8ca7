//! The JSON dataset layout.
//!
//! A dataset maps landmark keys to records, optionally wrapped in a top-level
//! `"landmarks"` object. A document whose only entry is `"landmarks"` is read
//! as wrapped unless that entry has a string `"name"`, in which case it is a flat
//! dataset with one landmark keyed `landmarks`:
//!
//! ```json
//! { "landmarks": { "empac": {
//!     "name": "EMPAC",
//!     "aliases": ["experimental media"],
//!     "summary": "EMPAC opened in 2008.",
//!     "topics": { "architecture": { "style": "contemporary" } }
//! } } }
//! ```
//!
//! Topic payload fields may be strings, numbers, lists of strings, or
//! timelines (lists of `{ "year": ..., "event": ... }`). Object order is kept,
//! and repeated keys are reported instead of silently overwritten.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::entity::{EntityRecord, FieldValue, TimelineEntry, TopicPayload};
use crate::error::{DataFormatError, KnowledgeResult};
use crate::topic::Topic;

/// Record-level fields the general overview is synthesized from, first match wins.
const FOUNDING_FIELDS: [&str; 3] = ["built", "established", "dedicated"];

/// A parsed but not yet validated dataset.
#[derive(Debug)]
pub struct Dataset {
    entries: Vec<(String, RawRecord)>,
}

impl Dataset {
    /// Parse a dataset document.
    pub fn parse(json: &str) -> KnowledgeResult<Self> {
        let top: Ordered<serde_json::Value> = serde_json::from_str(json)?;
        // A lone "landmarks" entry that has a name is a record, not the wrapper.
        let wrapped = match top.0.as_slice() {
            [(key, value)] => {
                key == "landmarks" && !value.get("name").is_some_and(serde_json::Value::is_string)
            }
            _ => false,
        };

        let entries = if wrapped {
            serde_json::from_str::<Wrapped>(json)?.landmarks.0
        } else {
            serde_json::from_str::<Ordered<RawRecord>>(json)?.0
        };
        Ok(Self { entries })
    }

    /// Number of landmark entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the dataset has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate each entry and convert it into an [`EntityRecord`], in document order.
    ///
    /// Cross-record checks (duplicate keys, alias collisions) belong to the store.
    pub fn into_records(self) -> Result<Vec<EntityRecord>, DataFormatError> {
        self.entries
            .into_iter()
            .map(|(key, raw)| raw.into_record(key))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct Wrapped {
    landmarks: Ordered<RawRecord>,
}

/// A JSON object read as an ordered list of entries, keeping repeated keys.
#[derive(Debug)]
struct Ordered<V>(Vec<(String, V)>);

impl<V> Default for Ordered<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Ordered<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = Ordered<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(Ordered(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

/// A string or integer, as dates and years appear either way in datasets.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTimelineEntry {
    year: Scalar,
    event: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawField {
    Scalar(Scalar),
    List(Vec<String>),
    Timeline(Vec<RawTimelineEntry>),
}

impl From<RawField> for FieldValue {
    fn from(raw: RawField) -> Self {
        match raw {
            RawField::Scalar(s) => FieldValue::Text(s.to_string()),
            RawField::List(items) => FieldValue::List(items),
            RawField::Timeline(entries) => FieldValue::Timeline(
                entries
                    .into_iter()
                    .map(|e| TimelineEntry::new(e.year.to_string(), e.event))
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecord {
    name: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
    summary: Option<String>,
    built: Option<Scalar>,
    established: Option<Scalar>,
    dedicated: Option<Scalar>,
    significance: Option<String>,
    #[serde(default)]
    topics: Ordered<Ordered<RawField>>,
}

impl RawRecord {
    fn into_record(self, key: String) -> Result<EntityRecord, DataFormatError> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DataFormatError::MissingField {
                entity: key.clone(),
                field: "name",
            })?
            .to_string();

        let mut record = EntityRecord::new(key.as_str(), name);
        for alias in &self.aliases {
            record = record.with_alias(alias.trim());
        }

        let mut seen_topics: Vec<Topic> = Vec::new();
        for (topic_key, fields) in self.topics.0 {
            let topic = Topic::parse(&topic_key).ok_or_else(|| DataFormatError::UnknownTopic {
                entity: key.clone(),
                topic: topic_key.clone(),
            })?;
            if seen_topics.contains(&topic) {
                return Err(DataFormatError::DuplicateEntry {
                    entity: key,
                    name: topic_key,
                });
            }
            seen_topics.push(topic);

            let mut payload = TopicPayload::new();
            for (label, value) in fields.0 {
                if payload.get(&label).is_some() {
                    return Err(DataFormatError::DuplicateEntry {
                        entity: key,
                        name: format!("{topic_key}.{label}"),
                    });
                }
                payload.push(label, value.into());
            }
            record = record.with_payload(topic, payload);
        }

        if !record.has_topic(Topic::General) {
            let overview = synthesize_overview(
                self.summary,
                [self.built, self.established, self.dedicated],
                self.significance,
            );
            if overview.is_empty() {
                return Err(DataFormatError::MissingOverview(key));
            }
            record = record.with_payload(Topic::General, overview);
        }

        Ok(record)
    }
}

/// Build the general payload from record-level fields.
fn synthesize_overview(
    summary: Option<String>,
    founding: [Option<Scalar>; 3],
    significance: Option<String>,
) -> TopicPayload {
    let mut payload = TopicPayload::new();
    if let Some(summary) = summary.filter(|s| !s.trim().is_empty()) {
        payload.push("summary", FieldValue::Text(summary));
    }
    if let Some((label, date)) = FOUNDING_FIELDS
        .iter()
        .zip(founding)
        .find_map(|(label, date)| date.map(|d| (*label, d)))
    {
        payload.push(label, FieldValue::Text(date.to_string()));
    }
    if let Some(significance) = significance.filter(|s| !s.trim().is_empty()) {
        payload.push("significance", FieldValue::Text(significance));
    }
    payload
}
