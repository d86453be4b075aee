//! Follow-up Resolver
//!
//! Decides which intake fields are under-grounded and produces a
//! deduplicated, capped, ordered set of clarification questions by merging
//! model-proposed candidates with deterministic fallbacks.

use serde::Serialize;

use crate::schema::intake::{ExtractedFields, FollowupCandidate, FollowupField};

/// A field is under-grounded below this confidence. Fixed system constant.
pub const CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Maximum number of follow-up questions returned. Fixed system constant.
pub const MAX_FOLLOWUPS: usize = 5;

/// Rationale attached to synthesized fallback questions.
const FALLBACK_RATIONALE: &str =
    "Needed to complete the minimum grounding facts from site notes.";

/// Where a resolved follow-up question came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FollowupSource {
    /// Proposed by the extraction model and kept because the field is needed.
    Provided,
    /// Synthesized from the static question table for a needed field the
    /// model did not cover.
    Synthesized,
}

/// One entry of the resolved follow-up set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedFollowup {
    /// Which intake field the question clarifies.
    #[serde(rename = "value")]
    pub field: FollowupField,
    /// The question to ask the operator.
    pub question: String,
    /// Why the answer is needed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub why_needed: Option<String>,
    /// Where the question came from.
    #[serde(skip)]
    pub source: FollowupSource,
}

/// One fixed, human-authored fallback question per supported field.
fn fallback_question(field: FollowupField) -> &'static str {
    match field {
        FollowupField::TaskDescription => {
            "In one sentence, what is the operator/robot doing step-by-step?"
        }
        FollowupField::TaskGoal => {
            "What is the concrete done condition (how do we know the task succeeded)?"
        }
        FollowupField::TaskThroughput => {
            "Roughly what throughput is required (tasks/hour), even a range is fine?"
        }
        FollowupField::EnvironmentType => {
            "What type of environment is this (warehouse, industrial, retail, etc.)?"
        }
        FollowupField::EnvironmentDescription => {
            "Describe the physical setup/layout in 2\u{2013}3 sentences."
        }
        FollowupField::SafetyRequirements => {
            "What safety constraints exist (humans nearby, sharp objects, PPE, zones)?"
        }
        FollowupField::KeyEnvironmentConstraints => {
            "What constraints matter most (space, time, resource, noise/variability)?"
        }
        FollowupField::KeyEnvironmentEntities => {
            "List the key objects/entities involved (bins, trays, SKUs, tools, etc.)."
        }
        FollowupField::RequiredTools => {
            "What tools/sensors are actually available (RGB, depth, force/torque, gripper type)?"
        }
    }
}

/// The fields whose record is under-grounded, in declaration order.
pub fn needed_fields(extracted: &ExtractedFields) -> Vec<FollowupField> {
    FollowupField::ALL
        .iter()
        .copied()
        .filter(|field| extracted.needs_followup(*field))
        .collect()
}

/// Merges model candidates with deterministic fallbacks.
///
/// Model candidates for fields outside the needed set are discarded; every
/// needed field with no surviving candidate gets a synthesized question.
/// Model-originated entries come first, the result is capped at
/// [`MAX_FOLLOWUPS`], and each field appears at most once.
pub fn resolve(
    extracted: &ExtractedFields,
    candidates: &[FollowupCandidate],
) -> Vec<ResolvedFollowup> {
    let needed = needed_fields(extracted);

    let mut resolved: Vec<ResolvedFollowup> = Vec::new();
    for candidate in candidates {
        if !needed.contains(&candidate.field) {
            continue;
        }
        if resolved.iter().any(|r| r.field == candidate.field) {
            continue;
        }
        resolved.push(ResolvedFollowup {
            field: candidate.field,
            question: candidate.question.clone(),
            why_needed: candidate.why_needed.clone(),
            source: FollowupSource::Provided,
        });
    }

    for field in needed {
        if resolved.iter().any(|r| r.field == field) {
            continue;
        }
        resolved.push(ResolvedFollowup {
            field,
            question: fallback_question(field).to_string(),
            why_needed: Some(FALLBACK_RATIONALE.to_string()),
            source: FollowupSource::Synthesized,
        });
    }

    resolved.truncate(MAX_FOLLOWUPS);
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::intake::FieldRecord;

    fn grounded<T>(value: T) -> FieldRecord<T> {
        FieldRecord {
            value: Some(value),
            confidence: 0.95,
            evidence: Some("quoted".to_string()),
        }
    }

    fn ungrounded<T>() -> FieldRecord<T> {
        FieldRecord {
            value: None,
            confidence: 0.1,
            evidence: None,
        }
    }

    fn all_grounded() -> ExtractedFields {
        ExtractedFields {
            task_description: grounded("picks and places".to_string()),
            task_goal: grounded("part seated".to_string()),
            task_throughput: grounded(100.0),
            environment_type: grounded(crate::vocab::EnvironmentType::Warehouse),
            environment_description: grounded("a workcell".to_string()),
            safety_requirements: grounded("none".to_string()),
            key_environment_constraints: grounded("space".to_string()),
            key_environment_entities: grounded(vec!["bin".to_string()]),
            required_tools: grounded(vec!["RGB camera".to_string()]),
        }
    }

    fn all_ungrounded() -> ExtractedFields {
        ExtractedFields {
            task_description: ungrounded(),
            task_goal: ungrounded(),
            task_throughput: ungrounded(),
            environment_type: ungrounded(),
            environment_description: ungrounded(),
            safety_requirements: ungrounded(),
            key_environment_constraints: ungrounded(),
            key_environment_entities: ungrounded(),
            required_tools: ungrounded(),
        }
    }

    fn candidate(field: FollowupField, question: &str) -> FollowupCandidate {
        FollowupCandidate {
            field,
            question: question.to_string(),
            why_needed: None,
        }
    }

    #[test]
    fn nothing_needed_returns_empty_set() {
        let extracted = all_grounded();
        assert!(needed_fields(&extracted).is_empty());
        assert!(resolve(&extracted, &[]).is_empty());
    }

    #[test]
    fn confidence_exactly_at_threshold_is_excluded() {
        let mut extracted = all_grounded();
        extracted.task_goal.confidence = 0.7;
        assert!(!needed_fields(&extracted).contains(&FollowupField::TaskGoal));
    }

    #[test]
    fn confidence_just_below_threshold_is_included() {
        let mut extracted = all_grounded();
        extracted.task_goal.confidence = 0.69;
        assert!(needed_fields(&extracted).contains(&FollowupField::TaskGoal));
    }

    #[test]
    fn null_value_is_included_despite_high_confidence() {
        let mut extracted = all_grounded();
        extracted.task_throughput.value = None;
        extracted.task_throughput.confidence = 0.99;
        assert!(needed_fields(&extracted).contains(&FollowupField::TaskThroughput));
    }

    #[test]
    fn nine_needed_and_no_candidates_yields_five_fallbacks() {
        let extracted = all_ungrounded();
        let resolved = resolve(&extracted, &[]);

        assert_eq!(resolved.len(), MAX_FOLLOWUPS);
        assert!(resolved
            .iter()
            .all(|r| r.source == FollowupSource::Synthesized));

        let mut fields: Vec<_> = resolved.iter().map(|r| r.field).collect();
        fields.dedup();
        assert_eq!(fields.len(), MAX_FOLLOWUPS);

        // Declaration order is preserved.
        assert_eq!(fields, FollowupField::ALL[..MAX_FOLLOWUPS].to_vec());
    }

    #[test]
    fn model_candidate_takes_precedence_over_fallback() {
        let mut extracted = all_grounded();
        extracted.task_throughput.value = None;

        let resolved = resolve(
            &extracted,
            &[candidate(
                FollowupField::TaskThroughput,
                "How many parts per hour?",
            )],
        );

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].field, FollowupField::TaskThroughput);
        assert_eq!(resolved[0].question, "How many parts per hour?");
        assert_eq!(resolved[0].source, FollowupSource::Provided);
    }

    #[test]
    fn candidate_for_grounded_field_is_discarded() {
        let extracted = all_grounded();
        let resolved = resolve(
            &extracted,
            &[candidate(FollowupField::TaskGoal, "What counts as done?")],
        );
        assert!(resolved.is_empty());
    }

    #[test]
    fn duplicate_candidates_keep_first_only() {
        let mut extracted = all_grounded();
        extracted.task_goal.value = None;

        let resolved = resolve(
            &extracted,
            &[
                candidate(FollowupField::TaskGoal, "first question"),
                candidate(FollowupField::TaskGoal, "second question"),
            ],
        );

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].question, "first question");
    }

    #[test]
    fn model_candidates_come_before_fallbacks() {
        let mut extracted = all_grounded();
        extracted.task_description.value = None;
        extracted.required_tools.value = None;

        let resolved = resolve(
            &extracted,
            &[candidate(FollowupField::RequiredTools, "Which sensors?")],
        );

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].field, FollowupField::RequiredTools);
        assert_eq!(resolved[0].source, FollowupSource::Provided);
        assert_eq!(resolved[1].field, FollowupField::TaskDescription);
        assert_eq!(resolved[1].source, FollowupSource::Synthesized);
    }

    #[test]
    fn resolved_followup_serializes_with_wire_key() {
        let entry = ResolvedFollowup {
            field: FollowupField::TaskThroughput,
            question: "How many per hour?".to_string(),
            why_needed: None,
            source: FollowupSource::Provided,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["value"], "task_throughput");
        assert!(json.get("source").is_none());
        assert!(json.get("why_needed").is_none());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn membership_matches_threshold_predicate(confidence in 0.0f64..=1.0, has_value: bool) {
                let mut extracted = all_grounded();
                extracted.task_goal.confidence = confidence;
                extracted.task_goal.value = has_value.then(|| "done".to_string());

                let needed = needed_fields(&extracted);
                let expected = !has_value || confidence < CONFIDENCE_THRESHOLD;
                prop_assert_eq!(needed.contains(&FollowupField::TaskGoal), expected);
            }

            #[test]
            fn resolved_count_is_min_of_cap_and_needed(confidences in proptest::collection::vec(0.0f64..=1.0, 9)) {
                let mut extracted = all_grounded();
                extracted.task_description.confidence = confidences[0];
                extracted.task_goal.confidence = confidences[1];
                extracted.task_throughput.confidence = confidences[2];
                extracted.environment_type.confidence = confidences[3];
                extracted.environment_description.confidence = confidences[4];
                extracted.safety_requirements.confidence = confidences[5];
                extracted.key_environment_constraints.confidence = confidences[6];
                extracted.key_environment_entities.confidence = confidences[7];
                extracted.required_tools.confidence = confidences[8];

                let needed = needed_fields(&extracted);
                let resolved = resolve(&extracted, &[]);
                prop_assert_eq!(resolved.len(), needed.len().min(MAX_FOLLOWUPS));
            }
        }
    }
}
