//! LLM (Large Language Model) integration module
//!
//! The pipeline only sees [`NameGenerator`]; everything behind it (prompt
//! rendering, HTTP providers, reply validation) lives here.

pub mod generator;
pub mod providers;

pub use generator::LlmNameGenerator;

use crate::config::{DESCRIPTION_TARGET_COUNT, QUESTIONNAIRE_TARGET_COUNT};
use crate::error::Result;
use crate::types::{GenerationRequest, InputVariant, LlmConfig};
use async_trait::async_trait;

/// Produces raw candidate names for a validated request.
///
/// Candidates carry no guarantees: they may include TLDs, spaces, mixed case
/// or duplicates. One attempt per call; no retries.
#[async_trait]
pub trait NameGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>>;

    /// How many names a request of this variant asks for. Generators that
    /// own a prompt template report that template's count.
    fn target_count(&self, variant: InputVariant) -> usize {
        match variant {
            InputVariant::Questionnaire => QUESTIONNAIRE_TARGET_COUNT,
            InputVariant::Description => DESCRIPTION_TARGET_COUNT,
        }
    }
}

/// A chat/completion backend that answers a rendered prompt with text
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the prompt and return the model's raw text reply
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Get provider name
    fn name(&self) -> &'static str;

    /// Get model name being used
    fn model(&self) -> &str;

    /// Check if provider is configured and ready
    fn is_ready(&self) -> bool;
}

/// Get available LLM providers
pub fn available_providers() -> Vec<&'static str> {
    vec!["openai", "anthropic", "gemini", "ollama"]
}

/// Create an LLM provider from configuration
pub fn create_provider(config: &LlmConfig) -> Result<Box<dyn LlmProvider>> {
    match config.provider.as_str() {
        "openai" => Ok(Box::new(providers::OpenAiProvider::new(config)?)),
        "anthropic" => Ok(Box::new(providers::AnthropicProvider::new(config)?)),
        "gemini" => Ok(Box::new(providers::GeminiProvider::new(config)?)),
        "ollama" => Ok(Box::new(providers::OllamaProvider::new(config)?)),
        _ => Err(crate::error::DomainPilotError::config(format!(
            "Unsupported LLM provider: {}. Supported providers: {}",
            config.provider,
            available_providers().join(", ")
        ))),
    }
}
