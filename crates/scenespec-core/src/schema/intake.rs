//! Intake extraction document
//!
//! The Field Extractor produces one `IntakeExtraction` per call: a fixed set
//! of nine evidence-and-confidence field records, a parallel record for the
//! customer business value, and the model's own follow-up question
//! candidates. The document is immutable after validation; later stages only
//! read it.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::vocab::{vocabulary, EnvironmentType};

vocabulary! {
    /// The nine intake fields that can carry a follow-up question.
    FollowupField {
        TaskDescription => "task_description",
        TaskGoal => "task_goal",
        TaskThroughput => "task_throughput",
        EnvironmentType => "environment_type",
        EnvironmentDescription => "environment_description",
        SafetyRequirements => "safety_requirements",
        KeyEnvironmentConstraints => "key_environment_constraints",
        KeyEnvironmentEntities => "key_environment_entities",
        RequiredTools => "required_tools",
    }
}

/// A value with an attached confidence and textual evidence.
///
/// `value == None` means the field is ungrounded regardless of confidence;
/// the extraction contract requires the model to keep confidence at or below
/// 0.4 in that case, but the resolver only relies on nullness and the 0.7
/// threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
// The `default` attributes would otherwise put a `T: Default` bound on the
// derived impl, which the vocabulary enums do not satisfy.
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct FieldRecord<T> {
    /// The extracted value, absent when the notes do not support one.
    #[serde(default)]
    pub value: Option<T>,
    /// How directly the value is supported by the notes, in [0, 1].
    pub confidence: f64,
    /// Short quoted snippet from the notes backing the value.
    #[serde(default)]
    pub evidence: Option<String>,
}

impl<T> FieldRecord<T> {
    fn check_confidence(&self, path: &str) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(PipelineError::schema_violation(
                format!("{path}.confidence"),
                format!("confidence must be in [0, 1], got {}", self.confidence),
            ));
        }
        Ok(())
    }
}

/// The fixed nine extracted fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractedFields {
    /// Physical sequence of actions performed, one sentence.
    pub task_description: FieldRecord<String>,
    /// Measurable completion condition, externally verifiable.
    pub task_goal: FieldRecord<String>,
    /// Numeric tasks/hour estimate.
    pub task_throughput: FieldRecord<f64>,
    /// Deployment setting category.
    pub environment_type: FieldRecord<EnvironmentType>,
    /// Physical layout details.
    pub environment_description: FieldRecord<String>,
    /// Explicit safety constraints stated in the notes.
    pub safety_requirements: FieldRecord<String>,
    /// Constraints that affect deployment (space, time, variability).
    pub key_environment_constraints: FieldRecord<String>,
    /// Physical objects involved in the task.
    pub key_environment_entities: FieldRecord<Vec<String>>,
    /// Sensors or effectors explicitly mentioned.
    pub required_tools: FieldRecord<Vec<String>>,
}

impl ExtractedFields {
    /// Whether a field's record is under-grounded: value absent, or
    /// confidence below the follow-up threshold.
    pub fn needs_followup(&self, field: FollowupField) -> bool {
        fn ungrounded<T>(record: &FieldRecord<T>) -> bool {
            record.value.is_none() || record.confidence < crate::followup::CONFIDENCE_THRESHOLD
        }

        match field {
            FollowupField::TaskDescription => ungrounded(&self.task_description),
            FollowupField::TaskGoal => ungrounded(&self.task_goal),
            FollowupField::TaskThroughput => ungrounded(&self.task_throughput),
            FollowupField::EnvironmentType => ungrounded(&self.environment_type),
            FollowupField::EnvironmentDescription => ungrounded(&self.environment_description),
            FollowupField::SafetyRequirements => ungrounded(&self.safety_requirements),
            FollowupField::KeyEnvironmentConstraints => {
                ungrounded(&self.key_environment_constraints)
            }
            FollowupField::KeyEnvironmentEntities => ungrounded(&self.key_environment_entities),
            FollowupField::RequiredTools => ungrounded(&self.required_tools),
        }
    }

    fn validate(&self) -> Result<()> {
        self.task_description
            .check_confidence("intake.extracted.task_description")?;
        self.task_goal
            .check_confidence("intake.extracted.task_goal")?;
        self.task_throughput
            .check_confidence("intake.extracted.task_throughput")?;
        self.environment_type
            .check_confidence("intake.extracted.environment_type")?;
        self.environment_description
            .check_confidence("intake.extracted.environment_description")?;
        self.safety_requirements
            .check_confidence("intake.extracted.safety_requirements")?;
        self.key_environment_constraints
            .check_confidence("intake.extracted.key_environment_constraints")?;
        self.key_environment_entities
            .check_confidence("intake.extracted.key_environment_entities")?;
        self.required_tools
            .check_confidence("intake.extracted.required_tools")?;
        Ok(())
    }
}

/// A follow-up question proposed by the extraction model.
///
/// The wire key for the field name is `value`, matching the extraction
/// contract the model is prompted with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FollowupCandidate {
    /// Which intake field the question clarifies.
    #[serde(rename = "value")]
    pub field: FollowupField,
    /// The question to ask the operator.
    pub question: String,
    /// Why the answer is needed.
    #[serde(default)]
    pub why_needed: Option<String>,
}

/// An operator's answer to a resolved follow-up question.
///
/// Answers are ground truth: Stage 1 treats them as overriding the intake
/// extraction on conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FollowupAnswer {
    /// Which intake field was clarified.
    #[serde(rename = "value")]
    pub field: FollowupField,
    /// The question that was asked.
    pub question: String,
    /// The operator's answer.
    pub answer: String,
}

/// The complete intake extraction document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntakeExtraction {
    /// Per-field evidence-and-confidence records.
    pub extracted: ExtractedFields,
    /// Model-proposed follow-up questions, before resolution.
    pub followups: Vec<FollowupCandidate>,
    /// Business priority (1-5) if the notes state or strongly imply one.
    pub customer_business_value: FieldRecord<f64>,
}

impl IntakeExtraction {
    /// Checks the constraints serde cannot express: confidence ranges and
    /// the 1-5 business value range.
    pub fn validate(&self) -> Result<()> {
        self.extracted.validate()?;
        self.customer_business_value
            .check_confidence("intake.customer_business_value")?;
        if let Some(value) = self.customer_business_value.value {
            if !(1.0..=5.0).contains(&value) {
                return Err(PipelineError::schema_violation(
                    "intake.customer_business_value.value",
                    format!("business value must be in [1, 5], got {value}"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn record(value: Option<&str>, confidence: f64) -> FieldRecord<String> {
        FieldRecord {
            value: value.map(str::to_string),
            confidence,
            evidence: None,
        }
    }

    pub(crate) fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "extracted": {
                "task_description": {
                    "value": "Robot picks parts from a bin and places them in a tray",
                    "confidence": 0.95,
                    "evidence": "picks parts from a bin"
                },
                "task_goal": { "value": "part fully seated", "confidence": 0.9, "evidence": "success is part fully seated" },
                "task_throughput": { "value": null, "confidence": 0.2, "evidence": null },
                "environment_type": { "value": "Warehouse", "confidence": 0.8, "evidence": "warehouse floor" },
                "environment_description": { "value": "bin and tray on a bench", "confidence": 0.75, "evidence": null },
                "safety_requirements": { "value": null, "confidence": 0.1, "evidence": null },
                "key_environment_constraints": { "value": null, "confidence": 0.3, "evidence": null },
                "key_environment_entities": { "value": ["bin", "tray", "parts"], "confidence": 0.9, "evidence": "bin ... tray" },
                "required_tools": { "value": null, "confidence": 0.2, "evidence": null }
            },
            "followups": [
                {
                    "value": "task_throughput",
                    "question": "How many parts per hour must be placed?",
                    "why_needed": "Throughput is not stated in the notes."
                }
            ],
            "customer_business_value": { "value": null, "confidence": 0.1, "evidence": null }
        })
    }

    #[test]
    fn sample_document_parses_and_validates() {
        let doc: IntakeExtraction = serde_json::from_value(sample_json()).unwrap();
        doc.validate().unwrap();
        assert_eq!(doc.followups.len(), 1);
        assert_eq!(doc.followups[0].field, FollowupField::TaskThroughput);
        assert_eq!(
            doc.extracted.environment_type.value,
            Some(EnvironmentType::Warehouse)
        );
    }

    #[test]
    fn enum_record_tolerates_missing_value_and_evidence_keys() {
        let record: FieldRecord<EnvironmentType> =
            serde_json::from_value(serde_json::json!({ "confidence": 0.3 })).unwrap();
        assert_eq!(record.value, None);
        assert!(record.evidence.is_none());
    }

    #[test]
    fn extra_key_is_rejected() {
        let mut json = sample_json();
        json["extracted"]["task_mood"] =
            serde_json::json!({ "value": "cheerful", "confidence": 1.0, "evidence": null });
        assert!(serde_json::from_value::<IntakeExtraction>(json).is_err());
    }

    #[test]
    fn missing_field_is_rejected() {
        let mut json = sample_json();
        json["extracted"]
            .as_object_mut()
            .unwrap()
            .remove("task_goal");
        assert!(serde_json::from_value::<IntakeExtraction>(json).is_err());
    }

    #[test]
    fn out_of_range_confidence_fails_validation_with_path() {
        let mut doc: IntakeExtraction = serde_json::from_value(sample_json()).unwrap();
        doc.extracted.task_goal.confidence = 1.4;
        let err = doc.validate().unwrap_err();
        assert!(err
            .to_string()
            .contains("intake.extracted.task_goal.confidence"));
    }

    #[test]
    fn out_of_range_business_value_fails_validation() {
        let mut doc: IntakeExtraction = serde_json::from_value(sample_json()).unwrap();
        doc.customer_business_value.value = Some(9.0);
        let err = doc.validate().unwrap_err();
        assert!(err.to_string().contains("customer_business_value.value"));
    }

    #[test]
    fn null_value_needs_followup_even_with_high_confidence() {
        let rec = record(None, 0.99);
        let mut doc: IntakeExtraction = serde_json::from_value(sample_json()).unwrap();
        doc.extracted.task_goal = rec;
        assert!(doc.extracted.needs_followup(FollowupField::TaskGoal));
    }
}
