//! Optional rewording of factual answers by an external text generator.
//!
//! The engine never calls this itself: front ends pass a finished response
//! through [`rephrase_or_original`], which always yields something to show.

use crate::error::RephraseResult;

/// Rewords a factual answer without changing its facts.
pub trait Rephrase {
    /// Reword `factual`.
    fn rephrase(&self, factual: &str) -> RephraseResult<String>;
}

/// Reword `factual`, falling back to it unchanged on any failure or empty output.
pub fn rephrase_or_original(rephraser: &dyn Rephrase, factual: &str) -> String {
    match rephraser.rephrase(factual) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            tracing::warn!("rephrasing returned no text, using original");
            factual.to_string()
        }
        Err(err) => {
            tracing::warn!(error = %err, "rephrasing failed, using original");
            factual.to_string()
        }
    }
}
