use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::dataset::Dataset;
use crate::entity::{EntityKey, EntityRecord};
use crate::error::{DataFormatError, KnowledgeError, KnowledgeResult};
use crate::text::normalize;

/// Read-only index over landmark records, built once from a dataset.
///
/// Shared freely between conversations; nothing mutates it after [`KnowledgeStore::load`].
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    records: Vec<EntityRecord>,

    // Indexes
    by_key: HashMap<EntityKey, usize>,
    aliases: Vec<(String, EntityKey)>,
    by_alias: HashMap<String, usize>,
}

impl KnowledgeStore {
    /// Build a store from records, validating keys and aliases.
    ///
    /// Every record's display name is indexed as an alias alongside its
    /// explicit aliases. Fails if a key repeats or one alias maps to two
    /// landmarks.
    pub fn load(records: Vec<EntityRecord>) -> KnowledgeResult<Self> {
        if records.is_empty() {
            return Err(DataFormatError::Empty.into());
        }

        let mut store = Self {
            records: Vec::with_capacity(records.len()),
            by_key: HashMap::new(),
            aliases: Vec::new(),
            by_alias: HashMap::new(),
        };

        for record in records {
            if store.by_key.contains_key(record.key()) {
                return Err(DataFormatError::DuplicateKey(record.key().to_string()).into());
            }

            let names = std::iter::once(record.name())
                .chain(record.aliases().iter().map(String::as_str));
            for raw in names {
                let alias = normalize(raw);
                if alias.is_empty() {
                    return Err(DataFormatError::EmptyAlias {
                        entity: record.key().to_string(),
                    }
                    .into());
                }
                match store.by_alias.get(&alias) {
                    Some(&idx) if store.aliases[idx].1 == *record.key() => {}
                    Some(&idx) => {
                        return Err(DataFormatError::DuplicateAlias {
                            alias,
                            first: store.aliases[idx].1.to_string(),
                            second: record.key().to_string(),
                        }
                        .into());
                    }
                    None => {
                        store.by_alias.insert(alias.clone(), store.aliases.len());
                        store.aliases.push((alias, record.key().clone()));
                    }
                }
            }

            store.by_key.insert(record.key().clone(), store.records.len());
            store.records.push(record);
        }

        tracing::info!(
            landmarks = store.records.len(),
            aliases = store.aliases.len(),
            "knowledge store loaded"
        );
        Ok(store)
    }

    /// Parse and load a JSON dataset.
    pub fn from_json_str(json: &str) -> KnowledgeResult<Self> {
        let records = Dataset::parse(json)?.into_records()?;
        Self::load(records)
    }

    /// Read, parse, and load a JSON dataset.
    pub fn from_reader(mut reader: impl Read) -> KnowledgeResult<Self> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json_str(&json)
    }

    /// Load a JSON dataset from a file.
    pub fn from_path(path: impl AsRef<Path>) -> KnowledgeResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading dataset");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Get a record by key.
    ///
    /// Keys produced by the matcher always exist; a `NotFound` here is a bug.
    pub fn lookup(&self, key: &EntityKey) -> KnowledgeResult<&EntityRecord> {
        self.by_key
            .get(key)
            .map(|&idx| &self.records[idx])
            .ok_or_else(|| KnowledgeError::NotFound(key.clone()))
    }

    /// Returns true if the key exists.
    pub fn contains(&self, key: &EntityKey) -> bool {
        self.by_key.contains_key(key)
    }

    /// All landmark keys, in dataset order.
    pub fn all_entity_keys(&self) -> impl Iterator<Item = &EntityKey> {
        self.records.iter().map(EntityRecord::key)
    }

    /// All records, in dataset order.
    pub fn records(&self) -> impl Iterator<Item = &EntityRecord> {
        self.records.iter()
    }

    /// Normalized alias → key pairs, in insertion order.
    pub fn alias_index(&self) -> impl Iterator<Item = (&str, &EntityKey)> {
        self.aliases.iter().map(|(alias, key)| (alias.as_str(), key))
    }

    /// Resolve an exact alias (normalized before lookup).
    pub fn entity_for_alias(&self, alias: &str) -> Option<&EntityKey> {
        self.by_alias
            .get(&normalize(alias))
            .map(|&idx| &self.aliases[idx].1)
    }

    /// Display names of every landmark, in dataset order.
    pub fn display_names(&self) -> Vec<&str> {
        self.records.iter().map(EntityRecord::name).collect()
    }

    /// Number of landmarks.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no landmarks (never true for a loaded store).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
