//! Pipeline configuration
//!
//! Per-stage model names and output budgets. Temperature is not here: the
//! pipeline always pins it to the most deterministic setting, and the
//! confidence threshold and follow-up cap are fixed system constants in the
//! resolver.

use serde::{Deserialize, Serialize};

/// Model settings for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSettings {
    /// Model identifier passed to the provider.
    pub model: String,

    /// Output length budget for the completion.
    pub max_tokens: u32,
}

impl StageSettings {
    /// Create settings for a stage.
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
        }
    }
}

/// Main pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Field-extraction stage settings.
    pub intake: StageSettings,

    /// Stage-1 structural compilation settings.
    pub stage1: StageSettings,

    /// Stage-2 enrichment compilation settings.
    pub stage2: StageSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            intake: StageSettings::new("claude-opus-4-20250514", 1500),
            stage1: StageSettings::new("gpt-5.2", 4500),
            stage2: StageSettings::new("gpt-5.2", 4500),
        }
    }
}

impl PipelineConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the intake stage settings.
    pub fn with_intake(mut self, settings: StageSettings) -> Self {
        self.intake = settings;
        self
    }

    /// Set the Stage-1 settings.
    pub fn with_stage1(mut self, settings: StageSettings) -> Self {
        self.stage1 = settings;
        self
    }

    /// Set the Stage-2 settings.
    pub fn with_stage2(mut self, settings: StageSettings) -> Self {
        self.stage2 = settings;
        self
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_budgets() {
        let config = PipelineConfig::default();
        assert_eq!(config.intake.max_tokens, 1500);
        assert_eq!(config.stage1.max_tokens, 4500);
        assert_eq!(config.stage2.max_tokens, 4500);
    }

    #[test]
    fn config_builder() {
        let config = PipelineConfig::new().with_intake(StageSettings::new("claude-sonnet-4", 2000));
        assert_eq!(config.intake.model, "claude-sonnet-4");
        assert_eq!(config.intake.max_tokens, 2000);
    }

    #[test]
    fn config_serialization_round_trip() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
