//! Shared test scaffolding: a scripted provider and document fixtures.
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use scenespec_core::{CompletionProvider, CompletionRequest};

/// A provider that replays a fixed sequence of responses and records every
/// request it receives.
pub struct ScriptedProvider {
    responses: Mutex<Vec<anyhow::Result<String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<anyhow::Result<String>>) -> Self {
        let mut responses = responses;
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(response: impl Into<String>) -> Self {
        Self::new(vec![Ok(response.into())])
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(anyhow::anyhow!("scripted provider exhausted")))
    }
}

pub const NOTES: &str = "Robot picks rigid metal parts from a bin on a bench \
and places them in a tray on the warehouse floor. Success is part fully seated.";

/// An intake extraction where throughput, safety, constraints, and tools are
/// under-grounded and the model proposed one throughput question.
pub fn intake_json() -> serde_json::Value {
    serde_json::json!({
        "extracted": {
            "task_description": {
                "value": "Robot picks parts from a bin and places them in a tray",
                "confidence": 0.95,
                "evidence": "picks rigid metal parts from a bin"
            },
            "task_goal": {
                "value": "part fully seated",
                "confidence": 0.9,
                "evidence": "Success is part fully seated"
            },
            "task_throughput": { "value": null, "confidence": 0.2, "evidence": null },
            "environment_type": { "value": "Warehouse", "confidence": 0.85, "evidence": "warehouse floor" },
            "environment_description": {
                "value": "bin on a bench, tray on the floor",
                "confidence": 0.8,
                "evidence": "bin on a bench"
            },
            "safety_requirements": { "value": null, "confidence": 0.1, "evidence": null },
            "key_environment_constraints": { "value": null, "confidence": 0.3, "evidence": null },
            "key_environment_entities": {
                "value": ["bin", "tray", "parts"],
                "confidence": 0.9,
                "evidence": "bin ... tray ... parts"
            },
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

/// A complete, valid Stage-1 structural abstraction for the bin-picking
/// scenario.
pub fn stage1_json() -> serde_json::Value {
    serde_json::json!({
        "task_abstraction": {
            "task_category": "Pick Place",
            "task_subcategory": "bin picking",
            "task_description": "Robot picks parts from a bin and places them in a tray.",
            "task_goal": "Part is fully seated in the tray.",
            "task_success_signals": [
                { "name": "seating depth", "measurement": "vision pose estimate", "threshold": 1.0 }
            ],
            "task_checkpoints": ["approach bin", "grasp acquired", "aligned to tray"],
            "task_onramp": "parts present in bin, robot at home pose",
            "task_offramp": "part placed, robot returns to home pose",
            "task_required_skills": ["grasp planning", "object recognition"],
            "task_required_tools": [
                { "task_effectors": "prehensile gripper", "task_sensors": "visual sensors" }
            ],
            "task_required_embodiment": "single-arm",
            "task_time_horizon": "short",
            "task_intervention_profile": {
                "likely_triggers": ["misgrasp", "occluded part"],
                "expected_intervention_rate": "low"
            },
            "task_throughput": 120.0
        },
        "environment_abstraction": {
            "environment_description": "A bench-mounted workcell with a parts bin and an output tray.",
            "environment_type": "Warehouse",
            "environment_entities": [
                { "name": "bin", "description": "source container", "size": 0.4,
                  "movable": true, "deformable": false, "fragile": false, "hazardous": false },
                { "name": "tray", "description": "target container", "size": 0.3,
                  "movable": true, "deformable": false, "fragile": false, "hazardous": false },
                { "name": "part", "description": "rigid metal part", "size": 0.05,
                  "movable": true, "deformable": false, "fragile": false, "hazardous": false }
            ],
            "environment_state_variables": [
                { "name": "parts in bin", "type": "integer",
                  "description": "count of remaining parts", "unit": "",
                  "range": [{ "min": 0.0, "max": 50.0 }] },
                { "name": "bin fill level", "type": "continuous",
                  "description": "how full the bin is", "unit": "",
                  "range": [{ "min": 0.0, "max": 1.0 }] },
                { "name": "part pose", "type": "continuous",
                  "description": "6-DoF pose of the next part", "unit": "m",
                  "range": [{ "min": 0.0, "max": 0.0 }] }
            ],
            "environment_constraints": {
                "space_constraints": "bench workspace only",
                "time_constraints": "none stated",
                "resource_constraints": "single robot arm",
                "safety_constraints": "none stated",
                "noise_constraints": "overhead lighting varies during the day"
            },
            "environment_generalization_axes": [
                { "axis": "lighting", "expected_variability": "medium",
                  "eval_hints": "vary lighting from 200-800 lux" },
                { "axis": "object occlusion", "expected_variability": "high",
                  "eval_hints": "test with cluttered bin arrangements" }
            ],
            "environment_observability": "partial"
        },
        "failure_mode_abstraction": {
            "failure_modes": ["Perception Failure", "Grasping/Manipulation Failure", "Planning Failure"]
        }
    })
}

/// A complete full specification embedding `stage1_json()` verbatim.
pub fn scene_spec_json(business_value: f64) -> serde_json::Value {
    let mut json = serde_json::json!({
        "assumptions_and_unknowns_abstraction": {
            "assumptions": ["fixed workcell", "rigid parts"],
            "unknowns": ["required throughput", "SKU variety"]
        },
        "skill_capture_abstraction": {
            "research_bottlenecks": ["object recognition", "pose estimation"],
            "data_collection_requirements": [
                { "data_modalities": ["rgb", "depth"], "data_labels": ["grasp success", "part pose"] }
            ]
        },
        "eval_abstraction": {
            "offline_metrics": ["success rate", "time to complete"],
            "online_metrics": ["intervention rate", "throughput achieved"],
            "stress_tests": ["vary lighting 200-800 lux", "cluttered bin arrangements"],
            "acceptance_criteria": [">98% success over 200 trials"]
        },
        "priority_score": {
            "priority_customer_business_value": business_value,
            "priority_pi_technical_feasibility": 4.0,
            "priority_pi_safety_risk": 2.0,
            "priority_pi_generalization_leverage": 3.0,
            "priority_composite": 3.0,
            "priority_reasoning": "Common warehouse task with moderate generalization leverage."
        }
    });
    for (key, value) in stage1_json().as_object().unwrap() {
        json[key] = value.clone();
    }
    json
}
