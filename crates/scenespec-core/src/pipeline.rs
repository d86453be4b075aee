//! Pipeline orchestration
//!
//! Wires the Field Extractor, Follow-up Resolver, and the two compiler
//! stages into the two public operations: `intake` and `compile`. Stages
//! are strictly sequential; a Stage-1 failure means Stage 2 is never
//! attempted and no partial document escapes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::extract::FieldExtractor;
use crate::followup::{self, ResolvedFollowup};
use crate::provider::{AnthropicClient, CompletionProvider, OpenAICompatibleClient};
use crate::schema::{
    BusinessContext, ExtractedFields, FieldRecord, FollowupAnswer, FollowupField,
    FullSpecification, StructuralAbstraction,
};
use crate::stage1::Stage1Compiler;
use crate::stage2::Stage2Compiler;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Result of the intake operation: the extraction plus the resolved
/// follow-up questions to put in front of the operator.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeReport {
    /// Per-field evidence-and-confidence records.
    pub extracted: ExtractedFields,
    /// Business priority record, if the notes support one.
    pub customer_business_value: FieldRecord<f64>,
    /// Fields whose record is under-grounded, in declaration order.
    pub needs_followup: Vec<FollowupField>,
    /// Deduplicated, capped, ordered follow-up questions.
    pub followups: Vec<ResolvedFollowup>,
}

/// Input to the compile operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileRequest {
    /// The original free-text deployment notes.
    pub notes: String,
    /// The intake extraction fields, unchanged since intake.
    pub intake_extracted: ExtractedFields,
    /// Operator answers to the resolved follow-up questions.
    #[serde(default)]
    pub intake_followups: Vec<FollowupAnswer>,
    /// Externally supplied business context.
    pub business_context: BusinessContext,
}

/// Result of the compile operation: both stage outputs.
#[derive(Debug, Clone, Serialize)]
pub struct CompileReport {
    /// The Stage-1 structural abstraction.
    pub stage1: StructuralAbstraction,
    /// The full specification with the structural sections verified
    /// unchanged.
    pub scene_spec: FullSpecification,
}

/// The two-stage compilation pipeline.
pub struct Pipeline {
    extractor: FieldExtractor,
    stage1: Stage1Compiler,
    stage2: Stage2Compiler,
}

impl Pipeline {
    /// Assemble a pipeline from explicit providers.
    ///
    /// The intake provider handles extraction; the compile provider handles
    /// both compiler stages.
    pub fn new(
        intake_provider: Arc<dyn CompletionProvider>,
        compile_provider: Arc<dyn CompletionProvider>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            extractor: FieldExtractor::new(intake_provider, config.intake.max_tokens),
            stage1: Stage1Compiler::new(compile_provider.clone(), config.stage1.max_tokens),
            stage2: Stage2Compiler::new(compile_provider, config.stage2.max_tokens),
        }
    }

    /// Assemble a pipeline from the environment.
    ///
    /// Requires `ANTHROPIC_API_KEY` (intake) and `OPENAI_API_KEY` (compile
    /// stages). `SCENESPEC_ANTHROPIC_BASE_URL` and
    /// `SCENESPEC_OPENAI_BASE_URL` override the endpoints.
    pub fn from_env(config: &PipelineConfig) -> anyhow::Result<Self> {
        let anthropic_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| anyhow::anyhow!("ANTHROPIC_API_KEY is not set"))?;
        let openai_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY is not set"))?;

        let mut intake_client = AnthropicClient::new(anthropic_key, &config.intake.model);
        if let Ok(base_url) = std::env::var("SCENESPEC_ANTHROPIC_BASE_URL") {
            intake_client = intake_client.with_base_url(base_url);
        }

        let openai_base = std::env::var("SCENESPEC_OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string());
        let (stage1_client, stage2_client) = compile_clients(config, &openai_key, &openai_base);

        Ok(Self {
            extractor: FieldExtractor::new(Arc::new(intake_client), config.intake.max_tokens),
            stage1: Stage1Compiler::new(Arc::new(stage1_client), config.stage1.max_tokens),
            stage2: Stage2Compiler::new(Arc::new(stage2_client), config.stage2.max_tokens),
        })
    }

    /// Intake operation: extract fields from the notes and resolve the
    /// follow-up question set.
    pub async fn intake(&self, notes: &str) -> Result<IntakeReport> {
        validate_notes(notes)?;

        let extraction = self.extractor.extract(notes).await?;
        let needs_followup = followup::needed_fields(&extraction.extracted);
        let followups = followup::resolve(&extraction.extracted, &extraction.followups);

        tracing::info!(
            needed = needs_followup.len(),
            questions = followups.len(),
            "intake complete"
        );

        Ok(IntakeReport {
            extracted: extraction.extracted,
            customer_business_value: extraction.customer_business_value,
            needs_followup,
            followups,
        })
    }

    /// Compile operation: Stage 1 then Stage 2, strictly in order.
    pub async fn compile(&self, request: &CompileRequest) -> Result<CompileReport> {
        validate_notes(&request.notes)?;
        request.business_context.validate()?;

        let stage1 = self
            .stage1
            .compile(
                &request.notes,
                &request.intake_extracted,
                &request.intake_followups,
            )
            .await?;

        let scene_spec = self
            .stage2
            .compile(&request.notes, &stage1, &request.business_context)
            .await?;

        tracing::info!(
            task_category = %stage1.task_abstraction.task_category,
            "compilation complete"
        );

        Ok(CompileReport { stage1, scene_spec })
    }
}

/// One chat client per compile stage; the stages may run different models.
fn compile_clients(
    config: &PipelineConfig,
    api_key: &str,
    base_url: &str,
) -> (OpenAICompatibleClient, OpenAICompatibleClient) {
    let stage1 = OpenAICompatibleClient::new(
        "openai",
        Some(api_key.to_string()),
        base_url,
        &config.stage1.model,
    );
    let stage2 = OpenAICompatibleClient::new(
        "openai",
        Some(api_key.to_string()),
        base_url,
        &config.stage2.model,
    );
    (stage1, stage2)
}

fn validate_notes(notes: &str) -> Result<()> {
    if notes.trim().is_empty() {
        return Err(PipelineError::InputValidation(
            "notes must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::provider::CompletionRequest;

    struct Unreachable;

    #[async_trait]
    impl CompletionProvider for Unreachable {
        fn name(&self) -> &str {
            "unreachable"
        }

        async fn complete(&self, _request: &CompletionRequest) -> anyhow::Result<String> {
            panic!("provider must not be called");
        }
    }

    fn pipeline() -> Pipeline {
        let provider: Arc<dyn CompletionProvider> = Arc::new(Unreachable);
        Pipeline::new(provider.clone(), provider, &PipelineConfig::default())
    }

    #[test]
    fn compile_clients_follow_their_stage_settings() {
        let config = PipelineConfig::new()
            .with_stage2(crate::config::StageSettings::new("gpt-5.2-mini", 3000));
        let (stage1, stage2) = compile_clients(&config, "key", DEFAULT_OPENAI_BASE_URL);
        assert_eq!(stage1.model(), "gpt-5.2");
        assert_eq!(stage2.model(), "gpt-5.2-mini");
    }

    #[tokio::test]
    async fn blank_notes_fail_intake_before_any_call() {
        let err = pipeline().intake("   \n\t").await.unwrap_err();
        assert!(matches!(err, PipelineError::InputValidation(_)));
    }

    #[tokio::test]
    async fn out_of_range_business_value_fails_compile_before_any_call() {
        let extracted: ExtractedFields = serde_json::from_value(
            crate::schema::intake::tests::sample_json()["extracted"].clone(),
        )
        .unwrap();

        let request = CompileRequest {
            notes: "bin picking in a warehouse".to_string(),
            intake_extracted: extracted,
            intake_followups: Vec::new(),
            business_context: BusinessContext {
                priority_customer_business_value: 6,
            },
        };

        let err = pipeline().compile(&request).await.unwrap_err();
        assert!(matches!(err, PipelineError::InputValidation(_)));
    }
}
