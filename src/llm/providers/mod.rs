//! LLM provider implementations
//!
//! Each provider is implemented in its own module for better organization and maintainability.

pub mod anthropic;
pub mod gemini;
pub mod ollama;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

use crate::config::PromptTemplate;
use crate::error::{DomainPilotError, Result};
use crate::types::GenerationRequest;
use regex::{Captures, Regex};
use serde::Deserialize;

/// Expected reply schema
#[derive(Debug, Deserialize)]
struct DomainNamesReply {
    #[serde(rename = "domainNames")]
    domain_names: Vec<String>,
}

/// Fill `{{key}}` slots from the request fields. `{{count}}` is the
/// template's own target count. A slot with no matching field is a configuration error.
pub fn render_prompt(template: &PromptTemplate, request: &GenerationRequest) -> Result<String> {
    let placeholder = Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}")
        .map_err(|e| DomainPilotError::internal(e.to_string()))?;

    let mut missing: Option<String> = None;
    let rendered = placeholder.replace_all(&template.template, |caps: &Captures| {
        let key = &caps[1];
        if key == "count" {
            return template.target_count.to_string();
        }
        match request.field(key) {
            Some(value) => value.to_string(),
            None => {
                missing.get_or_insert_with(|| key.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(key) => Err(DomainPilotError::config(format!(
            "Prompt template placeholder '{{{{{}}}}}' has no value for {} input",
            key, request.variant
        ))),
        None => Ok(rendered.into_owned()),
    }
}

/// Validate a model reply against `{ "domainNames": [string] }`.
///
/// Surrounding prose or code fences are ignored; a bare JSON array of strings
/// is accepted as well.
pub fn parse_domain_names(content: &str) -> Result<Vec<String>> {
    if let (Some(start), Some(end)) = (content.find('{'), content.rfind('}')) {
        if start < end {
            let json_content = &content[start..=end];
            let reply: DomainNamesReply = serde_json::from_str(json_content).map_err(|e| {
                DomainPilotError::parse(
                    format!("AI response does not match the expected schema: {}", e),
                    Some(json_content.to_string()),
                )
            })?;
            return Ok(reply.domain_names);
        }
    }

    if let (Some(start), Some(end)) = (content.find('['), content.rfind(']')) {
        if start < end {
            let json_content = &content[start..=end];
            return serde_json::from_str::<Vec<String>>(json_content).map_err(|e| {
                DomainPilotError::parse(
                    format!("Failed to parse AI response as JSON: {}", e),
                    Some(json_content.to_string()),
                )
            });
        }
    }

    Err(DomainPilotError::parse(
        "AI response contained no JSON payload",
        Some(content.to_string()),
    ))
}

/// Human-readable message for a failed provider HTTP call
pub(crate) fn status_message(provider: &str, status: reqwest::StatusCode, body: &str) -> String {
    match status.as_u16() {
        401 => format!("Authentication failed (401). Please check your {} API key", provider),
        403 => "Access forbidden (403). Your API key may not have permission".to_string(),
        429 => "Rate limit exceeded (429). Please try again later".to_string(),
        500..=599 => format!("{} server error ({}). The API service is experiencing issues", provider, status),
        _ => format!("{} API request failed ({}): {}", provider, status, body),
    }
}
