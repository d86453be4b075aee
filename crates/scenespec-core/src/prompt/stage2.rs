//! Stage-2 enrichment instruction set
//!
//! Declares the Stage-1 output immutable, pins the business priority to the
//! caller-supplied value, and allows the model to fill only the enrichment
//! sections. The instruction is cost reduction; the mechanical equality
//! check in the Stage-2 compiler is the actual guarantee.

use crate::vocab::{DataModality, ResearchBottleneck};

use super::{constraint_clause, stage1::structural_constraints};

const HEADER: &str = "\
You are a deterministic research compiler.

INPUTS:
1) Raw customer notes
2) Stage 1 Output (structural abstraction) - IMMUTABLE SOURCE OF TRUTH
3) Business priority (1-5) - IMMUTABLE

GOAL:
Return a SINGLE JSON object that matches the template exactly.
You must:
A) COPY Stage 1 fields verbatim (byte-for-byte identical strings where applicable).
B) FILL ONLY the remaining sections:
   - assumptions_and_unknowns_abstraction
   - skill_capture_abstraction
   - eval_abstraction
   - priority_score

ABSOLUTE IMMUTABILITY RULE:
- You are NOT allowed to modify, rewrite, paraphrase, reorder, or \"improve\" ANY content under:
  - task_abstraction
  - environment_abstraction
  - failure_mode_abstraction
These must be copied exactly from Stage 1 Output into the final JSON.
If there is any conflict between your reasoning and Stage 1 Output, Stage 1 Output wins.
";

const FIELD_DEFINITIONS: &str = "\
FIELD DEFINITIONS (ONLY FOR FIELDS YOU GENERATE IN STAGE 2):

assumptions_and_unknowns_abstraction.assumptions:
- Operating assumptions required to proceed (e.g., \"fixed workcell\", \"known SKU set\", \"stable lighting\").
- Use this to capture any justified \"Other/other\" enum choice.

assumptions_and_unknowns_abstraction.unknowns:
- Missing facts that could materially change feasibility, safety, evaluation design, or scope.

skill_capture_abstraction.research_bottlenecks:
- Only include bottlenecks that are necessary blockers implied by task/environment (do not list everything).
- Prefer fewer, higher-signal bottlenecks.

skill_capture_abstraction.data_collection_requirements:
- data_modalities: sensor streams needed to learn/teleop/validate.
- data_labels: supervision signals required (success/failure, contact events, pose labels, intervention triggers, etc.)

eval_abstraction.offline_metrics:
- Lab measurable metrics (success rate, time-to-complete, collisions, dropped objects, force thresholds exceeded).
eval_abstraction.online_metrics:
- Live deployment metrics (intervention rate, uptime, throughput achieved, safety events, abort rate).
eval_abstraction.stress_tests:
- Perturbations across generalization axes (lighting, occlusion, SKU variance, layout variation, human interaction).
eval_abstraction.acceptance_criteria:
- Clear go/no-go thresholds (e.g., \">98% success over 200 trials\" or \"<1 intervention / 30 mins\").
";

const CONSERVATIVE_RULES: &str = "\
CONSERVATIVE RULES:
- If info is insufficient: add to unknowns; do not hallucinate.
- Do not inflate generalization leverage.
- Do not invent research bottlenecks unless implied.
- Do not introduce new enum values.
- If selecting \"Other\"/\"other\": justify explicitly.
";

const OUTPUT_TEMPLATE: &str = r#"OUTPUT REQUIREMENTS:
- Return ONLY valid JSON (no markdown, no prose).
- Match EXACTLY the following template's keys and nesting.
- IMPORTANT: task_abstraction, environment_abstraction, failure_mode_abstraction must be copied exactly from Stage 1 output.

Return JSON with EXACTLY this structure:
{
  "assumptions_and_unknowns_abstraction": { "assumptions": [], "unknowns": [] },
  "task_abstraction": {
    "task_category": "",
    "task_subcategory": "",
    "task_description": "",
    "task_goal": "",
    "task_success_signals": [{ "name": "", "measurement": "", "threshold": 0 }],
    "task_checkpoints": [],
    "task_onramp": "",
    "task_offramp": "",
    "task_required_skills": [],
    "task_required_tools": [{ "task_effectors": "", "task_sensors": "" }],
    "task_required_embodiment": "",
    "task_time_horizon": "",
    "task_intervention_profile": { "likely_triggers": [], "expected_intervention_rate": "" },
    "task_throughput": 0
  },
  "environment_abstraction": {
    "environment_description": "",
    "environment_type": "",
    "environment_entities": [{
      "name": "",
      "description": "",
      "size": 0,
      "movable": false,
      "deformable": false,
      "fragile": false,
      "hazardous": false
    }],
    "environment_state_variables": [{
      "name": "",
      "type": "",
      "description": "",
      "unit": "",
      "range": [{ "min": 0, "max": 0 }]
    }],
    "environment_constraints": {
      "space_constraints": "",
      "time_constraints": "",
      "resource_constraints": "",
      "safety_constraints": "",
      "noise_constraints": ""
    },
    "environment_generalization_axes": [{
      "axis": "",
      "expected_variability": "",
      "eval_hints": ""
    }],
    "environment_observability": ""
  },
  "failure_mode_abstraction": { "failure_modes": [] },
  "skill_capture_abstraction": {
    "research_bottlenecks": [],
    "data_collection_requirements": [{ "data_modalities": [], "data_labels": [] }]
  },
  "eval_abstraction": {
    "offline_metrics": [],
    "online_metrics": [],
    "stress_tests": [],
    "acceptance_criteria": []
  },
  "priority_score": {
    "priority_customer_business_value": 0,
    "priority_pi_technical_feasibility": 0,
    "priority_pi_safety_risk": 0,
    "priority_pi_generalization_leverage": 0,
    "priority_composite": 0,
    "priority_reasoning": ""
  }
}
"#;

/// Builds the Stage-2 instruction set.
///
/// `stage1_json` is the pre-serialized, validated Stage-1 output;
/// `business_value` is the caller-supplied priority the output must carry
/// unchanged.
pub fn build(notes: &str, stage1_json: &str, business_value: u8) -> String {
    let mut prompt = String::new();
    prompt.push_str(HEADER);
    prompt.push_str("\nENUM CONSTRAINTS (STRICT):\nYou may ONLY use the following exact values.\n\n");
    prompt.push_str(&structural_constraints());
    prompt.push_str("\n\n");
    prompt.push_str(&constraint_clause(
        "research_bottlenecks[*]",
        &ResearchBottleneck::wire_names(),
    ));
    prompt.push_str("\n\n");
    prompt.push_str(&constraint_clause(
        "data_modalities[*]",
        &DataModality::wire_names(),
    ));
    prompt.push_str(
        "\n\nIf none apply, use \"Other\" or \"other\" EXACTLY as written and justify in assumptions.\n\n",
    );
    prompt.push_str(FIELD_DEFINITIONS);
    prompt.push_str(&format!(
        "\npriority_score:\n\
         - priority_customer_business_value MUST equal the provided business priority exactly: {business_value}\n\
         - priority_pi_technical_feasibility: integer 1-5 (5 = easiest)\n\
         - priority_pi_safety_risk: integer 1-5 (5 = highest risk)\n\
         - priority_pi_generalization_leverage: integer 1-5 (5 = highest leverage)\n\
         - priority_composite: integer 1-5 (no floats). If unsure, choose a reasonable integer consistent with reasoning.\n\
         - priority_reasoning: short, concrete justification based on task complexity, risk, generalization axes, and business value.\n\n"
    ));
    prompt.push_str(CONSERVATIVE_RULES);
    prompt.push_str("\nRAW NOTES:\n");
    prompt.push_str(notes);
    prompt.push_str("\n\nSTAGE 1 OUTPUT (COPY VERBATIM):\n");
    prompt.push_str(stage1_json);
    prompt.push_str(&format!("\n\nBUSINESS PRIORITY (IMMUTABLE):\n{business_value}\n\n"));
    prompt.push_str(OUTPUT_TEMPLATE);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_pins_business_value() {
        let prompt = build("notes", "{}", 4);
        assert!(prompt.contains("MUST equal the provided business priority exactly: 4"));
        assert!(prompt.contains("BUSINESS PRIORITY (IMMUTABLE):\n4"));
    }

    #[test]
    fn prompt_inlines_stage2_vocabularies() {
        let prompt = build("notes", "{}", 3);
        for value in ResearchBottleneck::wire_names() {
            assert!(prompt.contains(&format!("\"{value}\"")), "missing {value}");
        }
        for value in DataModality::wire_names() {
            assert!(prompt.contains(&format!("\"{value}\"")), "missing {value}");
        }
    }

    #[test]
    fn prompt_embeds_stage1_output_verbatim() {
        let prompt = build("notes", "{\"task_abstraction\": {}}", 2);
        assert!(prompt.contains("STAGE 1 OUTPUT (COPY VERBATIM):\n{\"task_abstraction\": {}}"));
        assert!(prompt.contains("ABSOLUTE IMMUTABILITY RULE"));
    }
}
