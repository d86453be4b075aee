//! Error types for the scene specification pipeline
//!
//! Every error is terminal for its stage: there is no retry, repair, or
//! coercion anywhere in the pipeline. Errors carry enough detail (violating
//! path, mismatching section) to debug a failing model output.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The language-model capability did not return usable text
    /// (HTTP failure, refusal, empty completion).
    #[error("model call failed: {0}")]
    ExternalCallFailure(String),

    /// The model returned text that is not valid JSON.
    #[error("model output is not valid JSON: {0}")]
    MalformedOutput(String),

    /// Parsed JSON does not conform to the expected document shape or
    /// violates an enumeration or range constraint.
    #[error("schema violation at {path}: {detail}")]
    SchemaViolation {
        /// Path to the violating field, rooted at the document name.
        path: String,
        /// What went wrong at that path.
        detail: String,
    },

    /// Stage 2 altered a section it was required to copy forward verbatim.
    #[error("stage 2 mutated {section}")]
    ImmutabilityViolation {
        /// The section that differs from the Stage 1 original.
        section: String,
    },

    /// Caller-supplied input is malformed (empty notes, out-of-range
    /// business value).
    #[error("invalid input: {0}")]
    InputValidation(String),
}

impl PipelineError {
    /// Shorthand for a schema violation at a known path.
    pub fn schema_violation(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::SchemaViolation {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

/// Splits a `serde_json` failure into the pipeline taxonomy: syntax errors
/// mean the model text was not JSON at all, data errors mean the JSON did
/// not match the contract schema.
pub(crate) fn classify_decode_error(document: &str, err: serde_json::Error) -> PipelineError {
    use serde_json::error::Category;

    match err.classify() {
        Category::Syntax | Category::Eof => PipelineError::MalformedOutput(err.to_string()),
        _ => PipelineError::schema_violation(document, err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_violation_reports_path() {
        let err = PipelineError::schema_violation("intake.extracted.task_goal", "missing key");
        assert_eq!(
            err.to_string(),
            "schema violation at intake.extracted.task_goal: missing key"
        );
    }

    #[test]
    fn syntax_errors_classify_as_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let classified = classify_decode_error("intake", err);
        assert!(matches!(classified, PipelineError::MalformedOutput(_)));
    }

    #[test]
    fn data_errors_classify_as_schema_violation() {
        let err = serde_json::from_value::<u32>(serde_json::json!("text")).unwrap_err();
        let classified = classify_decode_error("stage1", err);
        assert!(matches!(
            classified,
            PipelineError::SchemaViolation { ref path, .. } if path == "stage1"
        ));
    }
}
