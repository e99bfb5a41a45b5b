//! Core types and structures for domain-pilot

use crate::config::PurchaseLinkTemplate;
use serde::{Deserialize, Serialize};

/// Which input shape a request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputVariant {
    Questionnaire,
    Description,
}

impl std::fmt::Display for InputVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputVariant::Questionnaire => write!(f, "questionnaire"),
            InputVariant::Description => write!(f, "description"),
        }
    }
}

/// Answers to the four fixed questions, in question order:
/// project name, business type, target audience, keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireInput {
    pub answers: Vec<String>,
}

impl QuestionnaireInput {
    pub fn new(answers: Vec<String>) -> Self {
        Self { answers }
    }
}

/// Free-text form input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionInput {
    pub business_description: String,
    pub keywords: String,
}

impl DescriptionInput {
    pub fn new(business_description: impl Into<String>, keywords: impl Into<String>) -> Self {
        Self {
            business_description: business_description.into(),
            keywords: keywords.into(),
        }
    }
}

/// Raw input handed to the pipeline by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum PipelineInput {
    Questionnaire(QuestionnaireInput),
    Description(DescriptionInput),
}

impl PipelineInput {
    pub fn variant(&self) -> InputVariant {
        match self {
            PipelineInput::Questionnaire(_) => InputVariant::Questionnaire,
            PipelineInput::Description(_) => InputVariant::Description,
        }
    }
}

impl From<QuestionnaireInput> for PipelineInput {
    fn from(input: QuestionnaireInput) -> Self {
        PipelineInput::Questionnaire(input)
    }
}

impl From<DescriptionInput> for PipelineInput {
    fn from(input: DescriptionInput) -> Self {
        PipelineInput::Description(input)
    }
}

/// Validated request for the name generator.
///
/// Every field value is non-empty; the input adapters are the only producers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub variant: InputVariant,
    /// Prompt fields in template order, keyed by placeholder name
    pub fields: Vec<(String, String)>,
    /// Number of names the prompt asks for
    pub target_count: usize,
}

impl GenerationRequest {
    /// Look up a field by placeholder name
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Canonical base name: lowercase, hyphenated, no TLD suffix.
///
/// Only produced by [`crate::domain::normalize`], so holding one means the
/// string is already in normal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseName(String);

impl BaseName {
    pub(crate) fn new(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Base name joined with a dotted TLD such as `.com`
    pub fn with_tld(&self, tld: &str) -> String {
        format!("{}{}", self.0, tld)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for BaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BaseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Outcome of one availability lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Taken,
    /// The lookup timed out or failed for this pair only
    Unknown,
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "available"),
            AvailabilityStatus::Taken => write!(f, "taken"),
            AvailabilityStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Availability of one base name under one TLD
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TldAvailability {
    /// Dotted TLD, e.g. `.com`
    pub tld: String,
    pub available: bool,
    pub status: AvailabilityStatus,
}

impl TldAvailability {
    pub fn new(tld: impl Into<String>, status: AvailabilityStatus) -> Self {
        Self {
            tld: tld.into(),
            available: status == AvailabilityStatus::Available,
            status,
        }
    }

    pub fn available(tld: impl Into<String>) -> Self {
        Self::new(tld, AvailabilityStatus::Available)
    }

    pub fn taken(tld: impl Into<String>) -> Self {
        Self::new(tld, AvailabilityStatus::Taken)
    }

    pub fn unknown(tld: impl Into<String>) -> Self {
        Self::new(tld, AvailabilityStatus::Unknown)
    }
}

/// Display-ready suggestion: one base name with every TLD in fixed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSuggestion {
    pub base_name: BaseName,
    pub tlds: Vec<TldAvailability>,
    /// First available TLD in fixed order, if any
    pub preferred_tld: Option<String>,
}

impl DomainSuggestion {
    /// Full domain for the call-to-action, e.g. `ecopaws.app`
    pub fn preferred_domain(&self) -> Option<String> {
        self.preferred_tld
            .as_deref()
            .map(|tld| self.base_name.with_tld(tld))
    }

    /// Registrar cart link for the preferred domain; `None` when nothing is available
    pub fn purchase_link(&self, template: &PurchaseLinkTemplate) -> Option<String> {
        self.preferred_domain().map(|domain| template.link_for(&domain))
    }

    pub fn has_available(&self) -> bool {
        self.preferred_tld.is_some()
    }

    pub fn available_count(&self) -> usize {
        self.tlds.iter().filter(|t| t.available).count()
    }
}

/// LLM configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4.1-mini".to_string(),
            api_key: String::new(),
            base_url: None,
            temperature: 0.7,
        }
    }
}
