//! Full specification document
//!
//! Stage 2 produces this: the Stage-1 structural abstraction copied forward
//! verbatim, plus the enrichment sections it is allowed to fill.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::schema::stage1::{
    EnvironmentAbstraction, FailureModeAbstraction, TaskAbstraction,
};
use crate::vocab::{DataModality, ResearchBottleneck};

/// Operating assumptions and missing facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssumptionsAndUnknowns {
    /// Assumptions required to proceed, including any justified "Other" choice.
    pub assumptions: Vec<String>,
    /// Missing facts that could change feasibility, safety, or scope.
    pub unknowns: Vec<String>,
}

/// Data streams and labels needed to learn and validate the skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataCollectionRequirement {
    /// Sensor streams needed to learn, teleop, and validate.
    pub data_modalities: Vec<DataModality>,
    /// Supervision signals required (success/failure, contact events, ...).
    pub data_labels: Vec<String>,
}

/// What blocks the skill and what data capturing it requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillCapture {
    /// Necessary blockers implied by task and environment; fewer, higher-signal.
    pub research_bottlenecks: Vec<ResearchBottleneck>,
    /// Data collection requirements.
    pub data_collection_requirements: Vec<DataCollectionRequirement>,
}

/// Evaluation plan for the captured skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvalAbstraction {
    /// Lab-measurable metrics.
    pub offline_metrics: Vec<String>,
    /// Live deployment metrics.
    pub online_metrics: Vec<String>,
    /// Perturbations across the generalization axes.
    pub stress_tests: Vec<String>,
    /// Go/no-go thresholds.
    pub acceptance_criteria: Vec<String>,
}

/// Priority scoring for the specification.
///
/// `priority_customer_business_value` is externally supplied and
/// non-negotiable; the compiler re-verifies the pass-through mechanically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriorityScore {
    /// Caller-supplied business priority, 1-5, copied through unchanged.
    pub priority_customer_business_value: f64,
    /// Technical feasibility, 1-5 (5 = easiest).
    pub priority_pi_technical_feasibility: f64,
    /// Safety risk, 1-5 (5 = highest risk).
    pub priority_pi_safety_risk: f64,
    /// Generalization leverage, 1-5 (5 = highest leverage).
    pub priority_pi_generalization_leverage: f64,
    /// Composite priority.
    pub priority_composite: f64,
    /// Short, concrete justification for the sub-scores.
    pub priority_reasoning: String,
}

/// Externally supplied business context for Stage 2.
///
/// The priority value is fixed by the caller, never model-derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BusinessContext {
    /// Business priority, 1-5.
    pub priority_customer_business_value: u8,
}

impl BusinessContext {
    /// Checks the 1-5 range.
    pub fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.priority_customer_business_value) {
            return Err(PipelineError::InputValidation(format!(
                "priority_customer_business_value must be in [1, 5], got {}",
                self.priority_customer_business_value
            )));
        }
        Ok(())
    }
}

/// The Stage-2 output: structural abstraction plus enrichment sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FullSpecification {
    /// Operating assumptions and open unknowns.
    pub assumptions_and_unknowns_abstraction: AssumptionsAndUnknowns,
    /// Copied verbatim from Stage 1.
    pub task_abstraction: TaskAbstraction,
    /// Copied verbatim from Stage 1.
    pub environment_abstraction: EnvironmentAbstraction,
    /// Copied verbatim from Stage 1.
    pub failure_mode_abstraction: FailureModeAbstraction,
    /// Research bottlenecks and data collection requirements.
    pub skill_capture_abstraction: SkillCapture,
    /// Evaluation plan.
    pub eval_abstraction: EvalAbstraction,
    /// Priority scoring.
    pub priority_score: PriorityScore,
}

impl FullSpecification {
    /// Checks the 1-5 ranges on the priority scores. Generalization leverage
    /// and the composite are unconstrained.
    pub fn validate(&self) -> Result<()> {
        let score = &self.priority_score;
        check_score(
            "priority_customer_business_value",
            score.priority_customer_business_value,
        )?;
        check_score(
            "priority_pi_technical_feasibility",
            score.priority_pi_technical_feasibility,
        )?;
        check_score("priority_pi_safety_risk", score.priority_pi_safety_risk)?;
        Ok(())
    }
}

fn check_score(field: &str, value: f64) -> Result<()> {
    if !(1.0..=5.0).contains(&value) {
        return Err(PipelineError::schema_violation(
            format!("scene_spec.priority_score.{field}"),
            format!("score must be in [1, 5], got {value}"),
        ));
    }
    Ok(())
}
