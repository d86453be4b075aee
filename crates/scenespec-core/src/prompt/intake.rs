//! Field-extraction instruction set
//!
//! Conservative by construction: the model may only restate what the notes
//! support, must attach evidence snippets, and must mark everything else
//! null with low confidence.

use crate::vocab::EnvironmentType;

use super::quoted_inline;

const RULES: &str = "\
You are a robotics research ops lead.

Your job:
- Extract structured information ONLY from the notes.
- Do NOT hallucinate.
- If a field is not supported by the notes, set value = null and confidence <= 0.4.
- Quote short evidence snippets when possible.
- confidence must be between 0 and 1.
- Return STRICT JSON. No markdown. No explanations.
";

const FIELD_DEFINITIONS_HEAD: &str = "\
Field Definitions (be precise and conservative):
task_description:
- Describe the physical sequence of actions performed.
- Focus on observable motion (pick, place, insert, inspect).
- Do NOT include goals, constraints, or throughput.
- One sentence only.

task_goal:
- The measurable completion condition.
- Examples: \"Part is inserted flush\", \"Item placed in tote\", \"Surface fully sanded\".
- Must describe how success is externally verified.
- If no explicit done condition is stated, set value = null.

task_throughput:
- Numeric estimate of tasks/hour or cycles/hour.
- If only qualitative language like \"fast\" or \"high volume\" appears, set value = null.
- Do not guess numbers.
";

const FIELD_DEFINITIONS_TAIL: &str = "\
environment_description:
- Physical layout details: workcells, bins, conveyors, lighting conditions, proximity to humans.
- Avoid repeating task_description.

safety_requirements:
- Any explicit safety constraints: human proximity, PPE, safety zones, hazardous tools, compliance requirements.
- Do not invent safety risks.

key_environment_constraints:
- Real constraints that affect deployment:
- space limitations
- time deadlines
- SKU variability
- lighting variability
- noise
- resource limits
- Only include constraints mentioned or strongly implied.

key_environment_entities:
- Physical objects involved in the task (bins, trays, SKUs, tools, machines).
- Do NOT include abstract concepts.

required_tools:
- Sensors or effectors explicitly mentioned (RGB camera, depth, force/torque, suction gripper, etc.).
- If not mentioned, set value = null.
";

const OUTPUT_SHAPE: &str = r#"Return this exact top-level structure:
{
"extracted": {
    "task_description": { "value": string|null, "confidence": number, "evidence": string|null },
    "task_goal": { "value": string|null, "confidence": number, "evidence": string|null },
    "task_throughput": { "value": number|null, "confidence": number, "evidence": string|null },
    "environment_type": { "value": string|null, "confidence": number, "evidence": string|null },
    "environment_description": { "value": string|null, "confidence": number, "evidence": string|null },
    "safety_requirements": { "value": string|null, "confidence": number, "evidence": string|null },
    "key_environment_constraints": { "value": string|null, "confidence": number, "evidence": string|null },
    "key_environment_entities": { "value": string[]|null, "confidence": number, "evidence": string|null },
    "required_tools": { "value": string[]|null, "confidence": number, "evidence": string|null }
},
"followups": [{
  "value": string,
  "question": string,
  "why_needed": string
}],
"customer_business_value": { "value": number|null, "confidence": number, "evidence": string|null }
}

customer_business_value:
- Integer 1-5 representing business priority (1 = low, 5 = critical).
- Only extract if explicitly stated or strongly implied.
- If not mentioned, set value = null.

Only include followups for fields where value is null or confidence < 0.7.
Maximum 5 followups.
"#;

/// Builds the extraction instruction set for the given notes.
pub fn build(notes: &str) -> String {
    let environment_types = quoted_inline(&EnvironmentType::wire_names());

    let mut prompt = String::new();
    prompt.push_str(RULES);
    prompt.push('\n');
    prompt.push_str(FIELD_DEFINITIONS_HEAD);
    prompt.push('\n');
    prompt.push_str(&format!(
        "environment_type:\n\
         - Categorize the deployment setting.\n\
         - Must be EXACTLY one of: {environment_types}.\n\
         - Case-sensitive. Use the exact strings above.\n\
         - Must be directly supported by notes.\n\
         - If ambiguous, set null.\n"
    ));
    prompt.push('\n');
    prompt.push_str(FIELD_DEFINITIONS_TAIL);
    prompt.push('\n');
    prompt.push_str(OUTPUT_SHAPE);
    prompt.push_str("\nNotes: ");
    prompt.push_str(notes);
    prompt.push('\n');
    prompt
}
