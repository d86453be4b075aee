//! Contract Schemas - the typed documents the pipeline exchanges
//!
//! Three documents flow through the pipeline: the intake extraction, the
//! Stage-1 structural abstraction, and the full specification. Each is a
//! strict shape: unknown keys are rejected, enumerable fields deserialize
//! only into the Domain Vocabulary, and range constraints serde cannot
//! express are covered by explicit `validate()` methods.

pub mod full;
pub mod intake;
pub mod stage1;

pub use full::{
    AssumptionsAndUnknowns, BusinessContext, DataCollectionRequirement, EvalAbstraction,
    FullSpecification, PriorityScore, SkillCapture,
};
pub use intake::{
    ExtractedFields, FieldRecord, FollowupAnswer, FollowupCandidate, FollowupField,
    IntakeExtraction,
};
pub use stage1::{
    EnvironmentAbstraction, EnvironmentConstraints, EnvironmentEntity, FailureModeAbstraction,
    GeneralizationProfile, InterventionProfile, StateVariable, StructuralAbstraction, SuccessSignal,
    TaskAbstraction, ToolRequirement, ValueRange,
};

use serde::de::DeserializeOwned;

use crate::error::{classify_decode_error, Result};

/// Parses raw model text into a contract document.
///
/// Non-JSON text fails with `MalformedOutput`; JSON that does not match the
/// document shape fails with `SchemaViolation` rooted at `document`. The raw
/// text is never partially accepted.
pub(crate) fn decode_document<T: DeserializeOwned>(document: &str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|err| classify_decode_error(document, err))
}
