//! Core types for Landmark Guide: landmark records, topics, and the knowledge store.
//!
//! This crate defines the data model the dialogue engine answers from. It is
//! independent of any matching or conversation logic: a [`KnowledgeStore`] is
//! built once from a JSON dataset and is read-only afterwards.

/// Dataset parsing: the on-disk JSON layout and its raw serde types.
pub mod dataset;
/// Landmark records, keys, and topic payloads.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// The read-only knowledge store built from a dataset.
pub mod store;
/// Text normalization shared by alias indexing and matching.
pub mod text;
/// The enumerated information topics.
pub mod topic;

/// Re-export entity types.
pub use entity::{EntityKey, EntityRecord, Field, FieldValue, TimelineEntry, TopicPayload};
/// Re-export error types.
pub use error::{DataFormatError, KnowledgeError, KnowledgeResult};
/// Re-export the knowledge store.
pub use store::KnowledgeStore;
/// Re-export the topic enum.
pub use topic::Topic;
