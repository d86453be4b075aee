//! Stage-1 Structural Compiler
//!
//! Synthesizes notes, extracted fields, and follow-up answers into the
//! structural abstraction. Content-level conflict resolution (answers
//! override extraction) is delegated to the model via instruction; the
//! shape of the result is validated here regardless.

use std::sync::Arc;

use crate::error::Result;
use crate::prompt::{self, to_pretty_json, JSON_ONLY_SYSTEM};
use crate::provider::{call_model, CompletionProvider, CompletionRequest};
use crate::schema::{decode_document, ExtractedFields, FollowupAnswer, StructuralAbstraction};

/// Compiles intake material into the structural abstraction.
pub struct Stage1Compiler {
    provider: Arc<dyn CompletionProvider>,
    max_tokens: u32,
}

impl Stage1Compiler {
    /// Create a compiler backed by the given provider.
    pub fn new(provider: Arc<dyn CompletionProvider>, max_tokens: u32) -> Self {
        Self {
            provider,
            max_tokens,
        }
    }

    /// Run the Stage-1 compilation. A failure is terminal for the request.
    pub async fn compile(
        &self,
        notes: &str,
        extracted: &ExtractedFields,
        followups: &[FollowupAnswer],
    ) -> Result<StructuralAbstraction> {
        let extracted_json = to_pretty_json(extracted)?;
        let followups_json = to_pretty_json(&followups)?;
        let request = CompletionRequest::deterministic(
            prompt::stage1::build(notes, &extracted_json, &followups_json),
            self.max_tokens,
        )
        .with_system(JSON_ONLY_SYSTEM);

        tracing::debug!(provider = self.provider.name(), "running stage 1 compilation");
        let raw = call_model(&*self.provider, &request).await?;

        let document: StructuralAbstraction = decode_document("stage1", &raw)?;
        tracing::debug!(
            task_category = %document.task_abstraction.task_category,
            "stage 1 output validated"
        );
        Ok(document)
    }
}
