//! Language-model providers
//!
//! The pipeline treats the model as an untrusted external capability: given a
//! prompt and a strict output contract, it returns text believed to satisfy
//! that contract, or fails. Any provider implementing [`CompletionProvider`]
//! is substitutable; nothing downstream depends on a particular vendor.

pub mod anthropic;
pub mod openai_compatible;

pub use anthropic::AnthropicClient;
pub use openai_compatible::OpenAICompatibleClient;

use anyhow::Result;
use async_trait::async_trait;

use crate::error::PipelineError;

/// A single deterministic text-completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Optional system message.
    pub system: Option<String>,
    /// The user prompt, with vocabulary and schema shape fully inlined.
    pub prompt: String,
    /// Sampling temperature; the pipeline always pins this to 0.0.
    pub temperature: f64,
    /// Output length budget.
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// A deterministic request: temperature pinned to 0.0.
    pub fn deterministic(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            temperature: 0.0,
            max_tokens,
        }
    }

    /// Attach a system message.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Text-completion capability consumed by every compiler stage.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name, for logging.
    fn name(&self) -> &str;

    /// Run one completion and return the raw response text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Runs one completion and maps every failure mode - transport error,
/// refusal, empty text - to a terminal [`PipelineError::ExternalCallFailure`].
/// At-most-once: no retry happens here or anywhere above.
pub(crate) async fn call_model(
    provider: &dyn CompletionProvider,
    request: &CompletionRequest,
) -> crate::error::Result<String> {
    let text = provider
        .complete(request)
        .await
        .map_err(|err| PipelineError::ExternalCallFailure(format!("{err:#}")))?;

    if text.trim().is_empty() {
        return Err(PipelineError::ExternalCallFailure(format!(
            "provider {} returned no text",
            provider.name()
        )));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    #[async_trait]
    impl CompletionProvider for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn empty_completion_is_an_external_failure() {
        let request = CompletionRequest::deterministic("prompt", 100);
        let err = call_model(&Fixed("   \n"), &request).await.unwrap_err();
        assert!(matches!(err, PipelineError::ExternalCallFailure(_)));
    }

    #[tokio::test]
    async fn text_passes_through_untouched() {
        let request = CompletionRequest::deterministic("prompt", 100);
        let text = call_model(&Fixed("{\"ok\": true}"), &request).await.unwrap();
        assert_eq!(text, "{\"ok\": true}");
    }

    #[test]
    fn deterministic_request_pins_temperature() {
        let request = CompletionRequest::deterministic("p", 10);
        assert_eq!(request.temperature, 0.0);
        assert!(request.system.is_none());
    }
}
