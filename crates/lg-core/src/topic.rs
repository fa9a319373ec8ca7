use std::fmt;

use serde::{Deserialize, Serialize};

/// A category of information about a landmark.
///
/// The declaration order is the tie-break priority used when two topics
/// match an utterance equally well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Origins, timeline, and namesake.
    History,
    /// Style, notable features, and architect.
    Architecture,
    /// Departments and facilities housed today.
    CurrentUse,
    /// Regular events and student activities.
    Events,
    /// The short overview every landmark has.
    General,
}

impl Topic {
    /// All topics in priority order.
    pub const ALL: [Topic; 5] = [
        Topic::History,
        Topic::Architecture,
        Topic::CurrentUse,
        Topic::Events,
        Topic::General,
    ];

    /// Parse a dataset topic key (`history`, `current_use`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "history" => Some(Self::History),
            "architecture" => Some(Self::Architecture),
            "current_use" | "current use" => Some(Self::CurrentUse),
            "events" => Some(Self::Events),
            "general" => Some(Self::General),
            _ => None,
        }
    }

    /// The dataset key for this topic.
    pub fn key(&self) -> &'static str {
        match self {
            Self::History => "history",
            Self::Architecture => "architecture",
            Self::CurrentUse => "current_use",
            Self::Events => "events",
            Self::General => "general",
        }
    }

    /// Human-readable label used in responses.
    pub fn label(&self) -> &'static str {
        match self {
            Self::History => "history",
            Self::Architecture => "architecture",
            Self::CurrentUse => "current use",
            Self::Events => "events",
            Self::General => "general information",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
