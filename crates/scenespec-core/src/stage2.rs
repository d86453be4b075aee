//! Stage-2 Enrichment Compiler
//!
//! Fills the enrichment sections around an immutable Stage-1 output. The
//! model is instructed to copy the structural sections verbatim, but the
//! system does not trust that claim: after validation the three sections
//! are compared structurally against the Stage-1 originals, and the
//! caller-supplied business value is re-checked for exact pass-through.
//! Any mismatch discards the entire result.

use std::sync::Arc;

use crate::error::{PipelineError, Result};
use crate::prompt::{self, to_pretty_json, JSON_ONLY_SYSTEM};
use crate::provider::{call_model, CompletionProvider, CompletionRequest};
use crate::schema::{decode_document, BusinessContext, FullSpecification, StructuralAbstraction};

/// Compiles the full specification around a validated Stage-1 output.
pub struct Stage2Compiler {
    provider: Arc<dyn CompletionProvider>,
    max_tokens: u32,
}

impl Stage2Compiler {
    /// Create a compiler backed by the given provider.
    pub fn new(provider: Arc<dyn CompletionProvider>, max_tokens: u32) -> Self {
        Self {
            provider,
            max_tokens,
        }
    }

    /// Run the Stage-2 compilation. A failure is terminal for the request;
    /// there is no merge or patch fallback.
    pub async fn compile(
        &self,
        notes: &str,
        stage1: &StructuralAbstraction,
        business: &BusinessContext,
    ) -> Result<FullSpecification> {
        business.validate()?;

        let stage1_json = to_pretty_json(stage1)?;
        let request = CompletionRequest::deterministic(
            prompt::stage2::build(
                notes,
                &stage1_json,
                business.priority_customer_business_value,
            ),
            self.max_tokens,
        )
        .with_system(JSON_ONLY_SYSTEM);

        tracing::debug!(provider = self.provider.name(), "running stage 2 compilation");
        let raw = call_model(&*self.provider, &request).await?;

        let document: FullSpecification = decode_document("scene_spec", &raw)?;
        document.validate()?;
        verify_immutability(&document, stage1)?;
        verify_priority_passthrough(&document, business)?;

        tracing::debug!("stage 2 output validated, structural sections unchanged");
        Ok(document)
    }
}

/// The central correctness property: the three structural sections must be
/// deep-equal to the Stage-1 originals. Typed equality makes the comparison
/// sensitive to array order and string content.
fn verify_immutability(
    document: &FullSpecification,
    stage1: &StructuralAbstraction,
) -> Result<()> {
    if document.task_abstraction != stage1.task_abstraction {
        return Err(PipelineError::ImmutabilityViolation {
            section: "task_abstraction".to_string(),
        });
    }
    if document.environment_abstraction != stage1.environment_abstraction {
        return Err(PipelineError::ImmutabilityViolation {
            section: "environment_abstraction".to_string(),
        });
    }
    if document.failure_mode_abstraction != stage1.failure_mode_abstraction {
        return Err(PipelineError::ImmutabilityViolation {
            section: "failure_mode_abstraction".to_string(),
        });
    }
    Ok(())
}

/// The business value is externally fixed; the model must echo it exactly.
fn verify_priority_passthrough(
    document: &FullSpecification,
    business: &BusinessContext,
) -> Result<()> {
    let expected = f64::from(business.priority_customer_business_value);
    if document.priority_score.priority_customer_business_value != expected {
        return Err(PipelineError::ImmutabilityViolation {
            section: "priority_score.priority_customer_business_value".to_string(),
        });
    }
    Ok(())
}
