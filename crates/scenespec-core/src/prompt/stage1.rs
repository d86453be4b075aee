//! Stage-1 structural compilation instruction set
//!
//! Restates the entire vocabulary inline, forbids the Stage-2-only
//! sections, and declares the follow-up answers as ground truth that
//! overrides the intake extraction on conflict.

use crate::vocab::{
    Effector, Embodiment, EnvironmentType, FailureMode, GeneralizationAxis, Observability,
    SensorType, StateVariableType, TaskCategory, TaskSkill, TaskSubcategory, TimeHorizon,
    Variability,
};

use super::constraint_clause;

const HEADER: &str = "\
You are a structural abstraction compiler.

You are given:
1) Raw customer notes
2) Extracted grounded fields from intake (may contain nulls + confidences)
3) Followup answers from the user (ground truth overrides)

GOAL:
Return ONLY the structural abstraction JSON object with exactly these keys:
- task_abstraction
- environment_abstraction
- failure_mode_abstraction

ABSOLUTE RULES:
- Do NOT generate: assumptions_and_unknowns_abstraction, skill_capture_abstraction, eval_abstraction, priority_score.
- Do NOT speculate beyond provided information. If unknown, keep descriptions conservative.
- Obey enum constraints strictly. Do NOT invent enum values.
- Output must be valid JSON only (no markdown, no prose).
";

const OTHER_RULE: &str = "\
\"Other\" RULE:
- Choose \"Other\" ONLY if none of the enum values clearly apply.
- When choosing \"Other\", ensure task_description / environment_description makes the category understandable.
";

const FIELD_DEFINITIONS: &str = "\
-----------------------------------------
FIELD DEFINITIONS (STRUCTURAL ONLY)
-----------------------------------------

task_abstraction.task_category:
- High-level family of task (pick/place, assembly, inspection, etc.)
- Must be one of the allowed enum values.

task_abstraction.task_subcategory:
- More specific class of task (e.g., \"bin picking\", \"insertion\", \"machine tending\").
- Must be one of the allowed enum values.

task_abstraction.task_description:
- One clear sentence describing the physical action sequence (what moves where).
- Should be grounded in notes + followups.
- Avoid including business value or research strategy.

task_abstraction.task_goal:
- Concrete, externally verifiable \"done condition\".
- If not explicit, infer minimally from description but keep conservative.

task_abstraction.task_success_signals:
- 1-3 measurable signals corresponding to task_goal.
- Each includes:
  - name: signal name (e.g., \"insertion depth\")
  - measurement: how measured (e.g., \"vision pose estimate\", \"force spike\", \"operator confirmation\")
  - threshold: numeric threshold when possible; if unknown choose a conservative placeholder threshold (e.g., 1) but make measurement text precise.
- Do NOT invent sensors; use task_required_tools implied by notes if possible.

task_abstraction.task_checkpoints:
- 2-5 intermediate milestones (not final success).
- Examples: \"approach object\", \"grasp acquired\", \"aligned to target\", \"insert started\".

task_abstraction.task_onramp:
- The initial preconditions to start an episode (e.g., \"part in bin\", \"tool attached\", \"robot at home pose\").

task_abstraction.task_offramp:
- The terminal state after completion or safe abort (e.g., \"robot retreats\", \"part placed\", \"returns to home pose\").

task_abstraction.task_required_skills:
- Select only skills clearly needed (avoid listing all).
- Must be subset of enum values.

task_abstraction.task_required_tools:
- List the minimum effector + sensor types needed/available.
- Use enum values ONLY.
- If notes don't specify sensors, include the most conservative minimal set (e.g., RGB) only if implied; otherwise choose what's explicitly mentioned.

task_abstraction.task_required_embodiment:
- Choose based on task nature (mobile if navigation required; dual-arm if bimanual implied).
- Must be one of the allowed values.

task_abstraction.task_time_horizon:
- short: seconds to under 1 minute
- medium: 1-10 minutes
- long: over 10 minutes or multi-stage workflow

task_abstraction.task_intervention_profile:
- likely_triggers: 2-5 situations where teleop intervention likely occurs (occlusion, misgrasp, alignment failure, human interference).
- expected_intervention_rate: qualitative (e.g., \"low\", \"medium\", \"high\" or \"~1 per 20 attempts\"). If unknown, choose \"unknown\".

task_abstraction.task_throughput:
- Numeric tasks/hr if present in intake or followups; else set a conservative placeholder like 0 and ensure later unknowns are handled in Stage 2.

environment_abstraction.environment_description:
- 2-3 sentences describing physical layout (workcell, conveyor, bins, human proximity, lighting).

environment_abstraction.environment_type:
- One of enum values (Warehouse/Industrial/etc.). Choose \"Other\" only if truly ambiguous.

environment_abstraction.environment_entities:
- List 3-8 key physical entities involved.
- Each entity must have:
  - name (e.g., \"bin\", \"SKU\", \"tote\", \"conveyor\")
  - description (short)
  - size (rough scalar; if unknown use 0)
  - movable/deformable/fragile/hazardous as booleans (best-effort from notes; default false if unknown)

environment_abstraction.environment_state_variables:
- 3-8 state variables that vary and matter for perception/control.
- Each must include:
  - name
  - type (enum)
  - description
  - unit (if unknown use \"\")
  - range: include one {min,max} object; if unknown use {min:0,max:0}.

environment_abstraction.environment_constraints:
- space_constraints: physical clearance / reach / workspace limits
- time_constraints: timing windows / cycle time constraints
- resource_constraints: tools, power, consumables, staffing constraints
- safety_constraints: human zones, PPE, hazardous equipment (do not invent)
- noise_constraints: sensing noise/occlusion/lighting variability

environment_abstraction.environment_generalization_axes:
- Choose 2-5 axes that meaningfully vary in deployment.
- axis must be allowed enum.
- expected_variability must be low/medium/high.
- eval_hints: how to test that axis (e.g., \"vary lighting from 200-800 lux\").

environment_abstraction.environment_observability:
- full: all relevant state is directly observable via sensors
- partial: some hidden state (occluded objects, internal machine state)
- none: cannot observe reliably (rare)

failure_mode_abstraction.failure_modes:
- Select 3-8 plausible failure modes for this task/environment.
- Must be from enum only.
";

const OUTPUT_TEMPLATE: &str = r#"-----------------------------------------
OUTPUT TEMPLATE (RETURN JSON ONLY)
-----------------------------------------

Return JSON with EXACTLY this structure and keys:

{
  "task_abstraction": {
    "task_category": "",
    "task_subcategory": "",
    "task_description": "",
    "task_goal": "",
    "task_success_signals": [
      { "name": "", "measurement": "", "threshold": 0 }
    ],
    "task_checkpoints": [],
    "task_onramp": "",
    "task_offramp": "",
    "task_required_skills": [],
    "task_required_tools": [
      { "task_effectors": "", "task_sensors": "" }
    ],
    "task_required_embodiment": "",
    "task_time_horizon": "",
    "task_intervention_profile": {
      "likely_triggers": [],
      "expected_intervention_rate": ""
    },
    "task_throughput": 0
  },
  "environment_abstraction": {
    "environment_description": "",
    "environment_type": "",
    "environment_entities": [
      {
        "name": "",
        "description": "",
        "size": 0,
        "movable": false,
        "deformable": false,
        "fragile": false,
        "hazardous": false
      }
    ],
    "environment_state_variables": [
      {
        "name": "",
        "type": "",
        "description": "",
        "unit": "",
        "range": [{ "min": 0, "max": 0 }]
      }
    ],
    "environment_constraints": {
      "space_constraints": "",
      "time_constraints": "",
      "resource_constraints": "",
      "safety_constraints": "",
      "noise_constraints": ""
    },
    "environment_generalization_axes": [
      {
        "axis": "",
        "expected_variability": "",
        "eval_hints": ""
      }
    ],
    "environment_observability": ""
  },
  "failure_mode_abstraction": {
    "failure_modes": []
  }
}

No markdown. No commentary. Only JSON.
"#;

/// The shared vocabulary constraint block for the structural sections.
pub(crate) fn structural_constraints() -> String {
    [
        constraint_clause("task_category", &TaskCategory::wire_names()),
        constraint_clause("task_subcategory", &TaskSubcategory::wire_names()),
        constraint_clause("task_required_skills[*]", &TaskSkill::wire_names()),
        constraint_clause(
            "task_required_tools[*].task_effectors",
            &Effector::wire_names(),
        ),
        constraint_clause(
            "task_required_tools[*].task_sensors",
            &SensorType::wire_names(),
        ),
        constraint_clause("task_required_embodiment", &Embodiment::wire_names()),
        constraint_clause("task_time_horizon", &TimeHorizon::wire_names()),
        constraint_clause("environment_type", &EnvironmentType::wire_names()),
        constraint_clause(
            "environment_state_variables[*].type",
            &StateVariableType::wire_names(),
        ),
        constraint_clause(
            "environment_generalization_axes[*].axis",
            &GeneralizationAxis::wire_names(),
        ),
        constraint_clause(
            "environment_generalization_axes[*].expected_variability",
            &Variability::wire_names(),
        ),
        constraint_clause("environment_observability", &Observability::wire_names()),
        constraint_clause("failure_modes[*]", &FailureMode::wire_names()),
    ]
    .join("\n\n")
}

/// Builds the Stage-1 instruction set.
///
/// `extracted_json` and `followups_json` are the pre-serialized intake
/// extraction and follow-up answers; the follow-up answers override the
/// extraction on conflict.
pub fn build(notes: &str, extracted_json: &str, followups_json: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(HEADER);
    prompt.push_str(
        "\n-----------------------------------------\n\
         STRICT ENUM CONSTRAINTS (INLINE)\n\
         -----------------------------------------\n\n\
         You may ONLY use these exact values:\n\n",
    );
    prompt.push_str(&structural_constraints());
    prompt.push_str("\n\n");
    prompt.push_str(OTHER_RULE);
    prompt.push('\n');
    prompt.push_str(FIELD_DEFINITIONS);
    prompt.push_str(
        "\n-----------------------------------------\n\
         INPUTS\n\
         -----------------------------------------\n\n",
    );
    prompt.push_str("Raw Notes:\n");
    prompt.push_str(notes);
    prompt.push_str("\n\nIntake Extracted (may include confidences; use values as evidence):\n");
    prompt.push_str(extracted_json);
    prompt.push_str("\n\nFollowup Answers (override intake when conflict):\n");
    prompt.push_str(followups_json);
    prompt.push_str("\n\n");
    prompt.push_str(OUTPUT_TEMPLATE);
    prompt
}
