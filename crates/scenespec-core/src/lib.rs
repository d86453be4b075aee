//! SceneSpec Core - two-stage compilation of deployment notes into scene specifications
//!
//! SceneSpec turns free-text robotics deployment notes into a structured,
//! schema-validated scene specification through a gated pipeline:
//!
//! 1. **Field Extraction** (`extract`): per-field values with confidence and
//!    quoted evidence, plus model-proposed follow-up questions
//! 2. **Follow-up Resolution** (`followup`): deterministic selection of the
//!    clarification questions worth asking, deduplicated and capped
//! 3. **Stage-1 Compilation** (`stage1`): the structural abstraction - task,
//!    environment, and failure modes - from notes plus answers
//! 4. **Stage-2 Compilation** (`stage2`): enrichment sections around the
//!    Stage-1 output, with the structural sections mechanically verified
//!    unchanged
//!
//! Every document crossing a stage boundary is a strict schema: unknown keys
//! are rejected, enumerable fields deserialize only into the closed
//! vocabulary, and a stage either fully succeeds or the whole request fails.
//!
//! # Quick Start
//!
//! ```no_run
//! use scenespec_core::{BusinessContext, CompileRequest, Pipeline, PipelineConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let pipeline = Pipeline::from_env(&PipelineConfig::default())?;
//!
//! let report = pipeline.intake("Robot picks parts from a bin onto a tray.").await?;
//! for question in &report.followups {
//!     println!("{}", question.question);
//! }
//!
//! let compiled = pipeline
//!     .compile(&CompileRequest {
//!         notes: "Robot picks parts from a bin onto a tray.".to_string(),
//!         intake_extracted: report.extracted,
//!         intake_followups: vec![],
//!         business_context: BusinessContext {
//!             priority_customer_business_value: 4,
//!         },
//!     })
//!     .await?;
//! println!("{}", serde_json::to_string_pretty(&compiled.scene_spec)?);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod extract;
pub mod followup;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod schema;
pub mod stage1;
pub mod stage2;
pub mod vocab;

pub use config::{PipelineConfig, StageSettings};
pub use error::{PipelineError, Result};
pub use extract::FieldExtractor;
pub use followup::{FollowupSource, ResolvedFollowup, CONFIDENCE_THRESHOLD, MAX_FOLLOWUPS};
pub use pipeline::{CompileReport, CompileRequest, IntakeReport, Pipeline};
pub use provider::{AnthropicClient, CompletionProvider, CompletionRequest, OpenAICompatibleClient};
pub use schema::{
    BusinessContext, ExtractedFields, FieldRecord, FollowupAnswer, FollowupField,
    FullSpecification, IntakeExtraction, StructuralAbstraction,
};
pub use stage1::Stage1Compiler;
pub use stage2::Stage2Compiler;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
