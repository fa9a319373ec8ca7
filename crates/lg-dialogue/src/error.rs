//! Error types for the dialogue engine.
//!
//! Turn processing itself never fails; the only fallible seam is the optional
//! rephrasing collaborator.

use thiserror::Error;

/// Result type for rephrasing.
pub type RephraseResult<T> = Result<T, RephraseError>;

/// Errors a [`Rephrase`](crate::Rephrase) implementation can report.
#[derive(Debug, Error)]
pub enum RephraseError {
    /// The service is not configured or not reachable.
    #[error("rephrasing unavailable: {0}")]
    Unavailable(String),

    /// The service answered with an error or an unusable body.
    #[error("rephrasing failed: {0}")]
    Failed(String),

    /// The service answered with no text.
    #[error("rephrasing returned no text")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            RephraseError::Unavailable("OPENAI_API_KEY not set".into()).to_string(),
            "rephrasing unavailable: OPENAI_API_KEY not set"
        );
        assert_eq!(RephraseError::Empty.to_string(), "rephrasing returned no text");
    }
}
