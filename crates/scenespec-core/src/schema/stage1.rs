//! Stage-1 structural abstraction
//!
//! The structural core of a scene specification: what the task is, where it
//! runs, and how it fails. This document is the immutable ground truth for
//! Stage 2, so every type here derives `PartialEq` for the mechanical
//! deep-equality check.

use serde::{Deserialize, Serialize};

use crate::vocab::{
    Effector, Embodiment, EnvironmentType, FailureMode, GeneralizationAxis, Observability,
    SensorType, StateVariableType, TaskCategory, TaskSkill, TaskSubcategory, TimeHorizon,
    Variability,
};

/// A measurable signal corresponding to the task goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuccessSignal {
    /// Signal name, e.g. "insertion depth".
    pub name: String,
    /// How the signal is measured, e.g. "vision pose estimate".
    pub measurement: String,
    /// Numeric threshold; a conservative placeholder when unknown.
    pub threshold: f64,
}

/// Minimum effector and sensor pair the task needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolRequirement {
    /// Effector class.
    pub task_effectors: Effector,
    /// Sensor modality.
    pub task_sensors: SensorType,
}

/// Where and how often teleoperation is expected to step in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterventionProfile {
    /// 2-5 situations where intervention likely occurs.
    pub likely_triggers: Vec<String>,
    /// Qualitative rate, e.g. "low" or "~1 per 20 attempts".
    pub expected_intervention_rate: String,
}

/// Task half of the structural abstraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskAbstraction {
    /// High-level task family.
    pub task_category: TaskCategory,
    /// Specific task class within the category.
    pub task_subcategory: TaskSubcategory,
    /// One sentence describing the physical action sequence.
    pub task_description: String,
    /// Concrete, externally verifiable done condition.
    pub task_goal: String,
    /// 1-3 measurable signals corresponding to the goal.
    pub task_success_signals: Vec<SuccessSignal>,
    /// 2-5 intermediate milestones, not final success.
    pub task_checkpoints: Vec<String>,
    /// Initial preconditions to start an episode.
    pub task_onramp: String,
    /// Terminal state after completion or safe abort.
    pub task_offramp: String,
    /// Skills clearly needed for the task.
    pub task_required_skills: Vec<TaskSkill>,
    /// Minimum effector and sensor pairs.
    pub task_required_tools: Vec<ToolRequirement>,
    /// Robot embodiment.
    pub task_required_embodiment: Embodiment,
    /// Episode time horizon.
    pub task_time_horizon: TimeHorizon,
    /// Expected teleop intervention profile.
    pub task_intervention_profile: InterventionProfile,
    /// Tasks per hour; conservative placeholder when unknown.
    pub task_throughput: f64,
}

/// A physical object in the deployment environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentEntity {
    /// Entity name, e.g. "bin" or "conveyor".
    pub name: String,
    /// Short description.
    pub description: String,
    /// Rough size scalar; 0 when unknown.
    pub size: f64,
    /// Whether the entity can be moved.
    pub movable: bool,
    /// Whether the entity deforms under contact.
    pub deformable: bool,
    /// Whether the entity breaks easily.
    pub fragile: bool,
    /// Whether the entity is hazardous to humans or the robot.
    pub hazardous: bool,
}

/// Inclusive numeric range of a state variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueRange {
    /// Lower bound; 0 when unknown.
    pub min: f64,
    /// Upper bound; 0 when unknown.
    pub max: f64,
}

/// A state variable that varies and matters for perception or control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateVariable {
    /// Variable name.
    pub name: String,
    /// Variable type.
    #[serde(rename = "type")]
    pub kind: StateVariableType,
    /// What the variable captures.
    pub description: String,
    /// Unit of measure; empty string when unknown.
    pub unit: String,
    /// One range entry; {0, 0} when unknown.
    pub range: Vec<ValueRange>,
}

/// Deployment constraints grouped by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConstraints {
    /// Physical clearance, reach, workspace limits.
    pub space_constraints: String,
    /// Timing windows and cycle time constraints.
    pub time_constraints: String,
    /// Tools, power, consumables, staffing constraints.
    pub resource_constraints: String,
    /// Human zones, PPE, hazardous equipment.
    pub safety_constraints: String,
    /// Sensing noise, occlusion, lighting variability.
    pub noise_constraints: String,
}

/// How an environment axis varies and how to test it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralizationProfile {
    /// The varying axis.
    pub axis: GeneralizationAxis,
    /// Expected variability along the axis.
    pub expected_variability: Variability,
    /// How to test the axis, e.g. "vary lighting from 200-800 lux".
    pub eval_hints: String,
}

/// Environment half of the structural abstraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentAbstraction {
    /// 2-3 sentences describing the physical layout.
    pub environment_description: String,
    /// Deployment setting category.
    pub environment_type: EnvironmentType,
    /// 3-8 key physical entities.
    pub environment_entities: Vec<EnvironmentEntity>,
    /// 3-8 state variables that matter for perception/control.
    pub environment_state_variables: Vec<StateVariable>,
    /// Grouped deployment constraints.
    pub environment_constraints: EnvironmentConstraints,
    /// 2-5 axes that meaningfully vary in deployment.
    pub environment_generalization_axes: Vec<GeneralizationProfile>,
    /// How much relevant state the sensors can observe.
    pub environment_observability: Observability,
}

/// Failure-mode section of the structural abstraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FailureModeAbstraction {
    /// 3-8 plausible failure modes for this task and environment.
    pub failure_modes: Vec<FailureMode>,
}

/// The Stage-1 output: the ground-truth structural core of a specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructuralAbstraction {
    /// What the task is.
    pub task_abstraction: TaskAbstraction,
    /// Where the task runs.
    pub environment_abstraction: EnvironmentAbstraction,
    /// How the task fails.
    pub failure_mode_abstraction: FailureModeAbstraction,
}
