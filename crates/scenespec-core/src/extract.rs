//! Field Extractor
//!
//! One deterministic model call per invocation, no retries: a refusal or
//! transport failure is terminal here and reported upward. The returned
//! document is fully validated; an invalid document is never partially
//! accepted.

use std::sync::Arc;

use crate::error::Result;
use crate::prompt;
use crate::provider::{call_model, CompletionProvider, CompletionRequest};
use crate::schema::{decode_document, IntakeExtraction};

/// Extracts per-field evidence-and-confidence records from free-text notes.
pub struct FieldExtractor {
    provider: Arc<dyn CompletionProvider>,
    max_tokens: u32,
}

impl FieldExtractor {
    /// Create an extractor backed by the given provider.
    pub fn new(provider: Arc<dyn CompletionProvider>, max_tokens: u32) -> Self {
        Self {
            provider,
            max_tokens,
        }
    }

    /// Run the extraction contract against the notes.
    ///
    /// Pure function of the notes given a fixed model: no side effects
    /// beyond the external call.
    pub async fn extract(&self, notes: &str) -> Result<IntakeExtraction> {
        let request =
            CompletionRequest::deterministic(prompt::intake::build(notes), self.max_tokens);

        tracing::debug!(provider = self.provider.name(), "running field extraction");
        let raw = call_model(&*self.provider, &request).await?;

        let document: IntakeExtraction = decode_document("intake", &raw)?;
        document.validate()?;

        tracing::debug!(
            followup_candidates = document.followups.len(),
            "field extraction validated"
        );
        Ok(document)
    }
}
