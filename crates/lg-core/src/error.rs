use miette::Diagnostic;
use thiserror::Error;

use crate::entity::EntityKey;

/// Alias for `Result<T, KnowledgeError>`.
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

/// Errors raised while loading or querying the knowledge store.
#[derive(Debug, Error, Diagnostic)]
pub enum KnowledgeError {
    /// The dataset file could not be read.
    #[error("could not read dataset: {0}")]
    #[diagnostic(code(lg::io))]
    Io(#[from] std::io::Error),

    /// The dataset is malformed. Fatal at load time.
    #[error(transparent)]
    #[diagnostic(transparent)]
    DataFormat(#[from] DataFormatError),

    /// A key produced internally does not exist in the store.
    #[error("entity not found: {0}")]
    #[diagnostic(
        code(lg::not_found),
        help("keys handed out by the matcher always come from the store; this is a bug")
    )]
    NotFound(EntityKey),
}

impl From<serde_json::Error> for KnowledgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataFormat(DataFormatError::Syntax(err))
    }
}

/// Ways a dataset can be malformed.
#[derive(Debug, Error, Diagnostic)]
pub enum DataFormatError {
    /// The document is not valid JSON or does not have the expected shape.
    #[error("invalid dataset: {0}")]
    #[diagnostic(
        code(lg::data::syntax),
        help("expected an object mapping landmark keys to records, optionally wrapped in {{\"landmarks\": ...}}")
    )]
    Syntax(#[source] serde_json::Error),

    /// The dataset contains no landmarks.
    #[error("dataset contains no landmarks")]
    #[diagnostic(code(lg::data::empty))]
    Empty,

    /// A landmark lacks a required field.
    #[error("landmark \"{entity}\" is missing required field `{field}`")]
    #[diagnostic(code(lg::data::missing_field))]
    MissingField {
        /// The landmark key.
        entity: String,
        /// The missing field.
        field: &'static str,
    },

    /// A landmark has no source for its general overview.
    #[error("landmark \"{0}\" has no general overview")]
    #[diagnostic(
        code(lg::data::no_overview),
        help("add a `summary`, a `built`/`established`/`dedicated` date, `significance`, or a `general` topic")
    )]
    MissingOverview(String),

    /// Two landmarks share the same key.
    #[error("duplicate landmark key \"{0}\"")]
    #[diagnostic(code(lg::data::duplicate_key))]
    DuplicateKey(String),

    /// One alias is assigned to two landmarks.
    #[error("alias \"{alias}\" is assigned to both \"{first}\" and \"{second}\"")]
    #[diagnostic(
        code(lg::data::duplicate_alias),
        help("each alias may resolve to exactly one landmark")
    )]
    DuplicateAlias {
        /// The normalized alias.
        alias: String,
        /// The landmark that claimed the alias first.
        first: String,
        /// The landmark that claimed it again.
        second: String,
    },

    /// An alias is empty once normalized.
    #[error("landmark \"{entity}\" has an empty alias")]
    #[diagnostic(code(lg::data::empty_alias))]
    EmptyAlias {
        /// The landmark key.
        entity: String,
    },

    /// A topic key is not one of the known topics.
    #[error("landmark \"{entity}\" has unknown topic \"{topic}\"")]
    #[diagnostic(
        code(lg::data::unknown_topic),
        help("known topics: history, architecture, current_use, events, general")
    )]
    UnknownTopic {
        /// The landmark key.
        entity: String,
        /// The unrecognized topic key.
        topic: String,
    },

    /// A topic or field appears twice within one landmark.
    #[error("landmark \"{entity}\" repeats \"{name}\"")]
    #[diagnostic(code(lg::data::duplicate_entry))]
    DuplicateEntry {
        /// The landmark key.
        entity: String,
        /// The repeated topic or field name.
        name: String,
    },
}
