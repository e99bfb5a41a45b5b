//! Name generator backed by one or more LLM providers

use crate::config::PromptTemplates;
use crate::error::{DomainPilotError, Result};
use crate::llm::providers::{parse_domain_names, render_prompt};
use crate::llm::{create_provider, LlmProvider, NameGenerator};
use crate::types::{GenerationRequest, InputVariant, LlmConfig};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;

/// Renders the prompt for a request, asks the default provider, and falls back
/// to the other registered providers in registration order.
#[derive(Clone)]
pub struct LlmNameGenerator {
    providers: Arc<RwLock<Vec<Arc<dyn LlmProvider>>>>,
    default_provider: Arc<RwLock<Option<String>>>,
    templates: Arc<PromptTemplates>,
}

impl LlmNameGenerator {
    pub fn new(templates: PromptTemplates) -> Self {
        Self {
            providers: Arc::new(RwLock::new(Vec::new())),
            default_provider: Arc::new(RwLock::new(None)),
            templates: Arc::new(templates),
        }
    }

    /// Build and register a provider from configuration.
    /// The first provider registered becomes the default.
    pub fn add_provider(&self, config: &LlmConfig) -> Result<()> {
        let provider = create_provider(config)?;
        self.register(Arc::from(provider));
        Ok(())
    }

    /// Register an already constructed provider, replacing one with the same name
    pub fn register(&self, provider: Arc<dyn LlmProvider>) {
        let name = provider.name().to_string();
        {
            let mut providers = self.providers.write();
            providers.retain(|p| p.name() != name);
            providers.push(provider);
        }
        let mut default = self.default_provider.write();
        if default.is_none() {
            *default = Some(name);
        }
    }

    /// Set default provider (ignored if it is not registered)
    pub fn set_default_provider(&self, provider: &str) {
        if self.has_provider(provider) {
            *self.default_provider.write() = Some(provider.to_string());
        }
    }

    pub fn default_provider(&self) -> Option<String> {
        self.default_provider.read().clone()
    }

    /// Get registered providers in registration order
    pub fn available_providers(&self) -> Vec<String> {
        self.providers.read().iter().map(|p| p.name().to_string()).collect()
    }

    pub fn has_provider(&self, provider: &str) -> bool {
        self.providers.read().iter().any(|p| p.name() == provider)
    }

    /// Check if any providers are configured
    pub fn is_ready(&self) -> bool {
        !self.providers.read().is_empty()
    }

    /// One attempt against a single named provider
    pub async fn generate_with_provider(&self, prompt: &str, provider_name: &str) -> Result<Vec<String>> {
        let start_time = Instant::now();

        // Clone the Arc so no lock is held across the await
        let provider = self
            .providers
            .read()
            .iter()
            .find(|p| p.name() == provider_name)
            .cloned()
            .ok_or_else(|| DomainPilotError::config(format!("Provider not configured: {}", provider_name)))?;

        let result = match provider.complete(prompt).await {
            Ok(content) => parse_domain_names(&content),
            Err(e) => Err(e),
        };

        match &result {
            Ok(names) => {
                tracing::info!(
                    provider = %provider_name,
                    model = %provider.model(),
                    names_count = %names.len(),
                    duration_ms = %start_time.elapsed().as_millis(),
                    "Name generation completed"
                );
            }
            Err(e) => {
                tracing::warn!(
                    provider = %provider_name,
                    error = %e,
                    duration_ms = %start_time.elapsed().as_millis(),
                    "Name generation failed"
                );
            }
        }

        result
    }

    /// Default provider first, then every other provider once
    fn attempt_order(&self) -> Vec<String> {
        let default = self.default_provider();
        let mut order: Vec<String> = default.iter().cloned().collect();
        order.extend(
            self.available_providers()
                .into_iter()
                .filter(|name| Some(name) != default.as_ref()),
        );
        order
    }
}

#[async_trait]
impl NameGenerator for LlmNameGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>> {
        let template = self.templates.for_variant(request.variant);
        let prompt = render_prompt(template, request)?;

        let overall_start = Instant::now();
        let mut last_error = None;

        for (attempt, provider_name) in self.attempt_order().into_iter().enumerate() {
            match self.generate_with_provider(&prompt, &provider_name).await {
                Ok(names) => {
                    if names.len() != request.target_count {
                        tracing::warn!(
                            provider = %provider_name,
                            expected = %request.target_count,
                            actual = %names.len(),
                            "Model returned a different number of names than requested"
                        );
                    }
                    tracing::debug!(
                        provider = %provider_name,
                        fallback_used = attempt > 0,
                        duration_ms = %overall_start.elapsed().as_millis(),
                        "Generated candidate names"
                    );
                    return Ok(names);
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(last_error.unwrap_or_else(|| DomainPilotError::config("No LLM providers configured")))
    }

    fn target_count(&self, variant: InputVariant) -> usize {
        self.templates.for_variant(variant).target_count
    }
}

impl Default for LlmNameGenerator {
    fn default() -> Self {
        Self::new(PromptTemplates::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PromptTemplate;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedProvider {
        name: &'static str,
        reply: Result<String>,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl CannedProvider {
        fn new(name: &'static str, reply: Result<String>) -> Arc<Self> {
            Arc::new(Self {
                name,
                reply,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock() = Some(prompt.to_string());
            self.reply.clone()
        }

        fn name(&self) -> &'static str {
            self.name
        }

        fn model(&self) -> &str {
            "canned"
        }

        fn is_ready(&self) -> bool {
            true
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            variant: InputVariant::Description,
            fields: vec![
                ("businessDescription".to_string(), "Eco dog toys".to_string()),
                ("keywords".to_string(), "eco".to_string()),
            ],
            target_count: 10,
        }
    }

    #[tokio::test]
    async fn test_uses_default_provider() {
        let generator = LlmNameGenerator::default();
        let first = CannedProvider::new("openai", Ok(r#"{"domainNames": ["pawly"]}"#.to_string()));
        let second = CannedProvider::new("ollama", Ok(r#"{"domainNames": ["other"]}"#.to_string()));
        generator.register(first.clone());
        generator.register(second.clone());

        assert_eq!(generator.default_provider().as_deref(), Some("openai"));
        let names = generator.generate(&request()).await.unwrap();
        assert_eq!(names, vec!["pawly"]);
        assert_eq!(second.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_back_on_bad_reply() {
        let generator = LlmNameGenerator::default();
        let broken = CannedProvider::new("openai", Ok("I cannot help with that".to_string()));
        let backup = CannedProvider::new("gemini", Ok(r#"{"domainNames": ["barkbox.io"]}"#.to_string()));
        generator.register(broken.clone());
        generator.register(backup.clone());

        let names = generator.generate(&request()).await.unwrap();
        assert_eq!(names, vec!["barkbox.io"]);
        assert_eq!(broken.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_last_error_is_returned() {
        let generator = LlmNameGenerator::default();
        generator.register(CannedProvider::new(
            "openai",
            Err(DomainPilotError::network("connection refused", None, None)),
        ));

        let err = generator.generate(&request()).await.unwrap_err();
        assert!(matches!(err, DomainPilotError::Network { .. }));
    }

    #[tokio::test]
    async fn test_no_providers() {
        let generator = LlmNameGenerator::default();
        assert!(!generator.is_ready());
        let err = generator.generate(&request()).await.unwrap_err();
        assert!(matches!(err, DomainPilotError::Config { .. }));
    }

    #[test]
    fn test_set_default_provider() {
        let generator = LlmNameGenerator::default();
        generator.register(CannedProvider::new("openai", Ok(String::new())));
        generator.register(CannedProvider::new("gemini", Ok(String::new())));

        generator.set_default_provider("gemini");
        assert_eq!(generator.attempt_order(), vec!["gemini", "openai"]);

        generator.set_default_provider("missing");
        assert_eq!(generator.default_provider().as_deref(), Some("gemini"));
    }

    #[tokio::test]
    async fn test_custom_template_owns_count() {
        let templates = PromptTemplates {
            description: PromptTemplate::new("List {{count}} names: {{businessDescription}}", 3),
            ..PromptTemplates::default()
        };
        let generator = LlmNameGenerator::new(templates);
        let provider = CannedProvider::new("openai", Ok(r#"{"domainNames": ["a", "b", "c"]}"#.to_string()));
        generator.register(provider.clone());

        assert_eq!(generator.target_count(InputVariant::Description), 3);
        assert_eq!(generator.target_count(InputVariant::Questionnaire), 20);

        let names = generator.generate(&request()).await.unwrap();
        assert_eq!(names.len(), 3);
        assert_eq!(provider.last_prompt.lock().as_deref(), Some("List 3 names: Eco dog toys"));
    }

    #[tokio::test]
    async fn test_short_reply_still_accepted() {
        let generator = LlmNameGenerator::default();
        generator.register(CannedProvider::new("openai", Ok(r#"{"domainNames": ["pawly"]}"#.to_string())));

        let names = generator.generate(&request()).await.unwrap();
        assert_eq!(names, vec!["pawly"]);
    }
}
