//! Immutable configuration values injected into the pipeline stages.
//!
//! Nothing here is global: the TLD list, prompt templates and purchase link
//! are plain values handed to constructors, so tests can swap them freely.

use crate::error::{DomainPilotError, Result};
use crate::types::{InputVariant, LlmConfig};
use std::env;
use std::time::Duration;

/// The fixed, ordered TLD list every base name is checked against
pub const DEFAULT_TLDS: &[&str] = &[".com", ".io", ".ai", ".app", ".co", ".xyz", ".net", ".org"];

/// High-demand TLDs that the simulated resolver treats as scarce
pub const SCARCE_TLDS: &[&str] = &[".com", ".io", ".ai"];

/// Names requested per questionnaire run
pub const QUESTIONNAIRE_TARGET_COUNT: usize = 20;

/// Names requested per description run
pub const DESCRIPTION_TARGET_COUNT: usize = 10;

pub const DEFAULT_PURCHASE_URL_TEMPLATE: &str =
    "https://portal.snbdhost.com/cart.php?a=add&domain=register&query={domain}";

/// Ordered set of dotted TLDs (`.com`, `.io`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TldSet {
    tlds: Vec<String>,
}

impl TldSet {
    /// Build a set from TLDs with or without the leading dot.
    /// Order is preserved and repeats are dropped.
    pub fn new<I, S>(tlds: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for tld in tlds {
            let tld = tld.as_ref().trim().trim_start_matches('.').to_lowercase();
            if tld.is_empty() || !tld.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err(DomainPilotError::config(format!("Invalid TLD: '{}'", tld)));
            }
            let dotted = format!(".{}", tld);
            if !out.contains(&dotted) {
                out.push(dotted);
            }
        }
        if out.is_empty() {
            return Err(DomainPilotError::config("TLD set cannot be empty"));
        }
        Ok(Self { tlds: out })
    }

    /// Whether `tld` (dotted or bare, any case) is in the set
    pub fn contains(&self, tld: &str) -> bool {
        let bare = tld.trim_start_matches('.');
        self.tlds
            .iter()
            .any(|t| t[1..].eq_ignore_ascii_case(bare))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tlds.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tlds.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tlds
    }
}

impl Default for TldSet {
    fn default() -> Self {
        Self {
            tlds: DEFAULT_TLDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Prompt text with `{{placeholder}}` slots plus the number of names it asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub template: String,
    pub target_count: usize,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>, target_count: usize) -> Self {
        Self {
            template: template.into(),
            target_count,
        }
    }

    /// Questionnaire prompt: four answers, twenty names
    pub fn questionnaire() -> Self {
        Self::new(
            "You are a domain name expert. Your task is to generate {{count}} creative, brandable, and memorable \
domain names based on the user's answers to the following questions. Ensure the names are concise and relevant.

Here are the user's answers:
1. Business or Project Name: {{projectName}}
2. Type of Business: {{businessType}}
3. Target Audience: {{targetAudience}}
4. Keywords: {{keywords}}

Return ONLY a JSON object of the form {\"domainNames\": [\"name1\", \"name2\"]} with exactly {{count}} entries.",
            QUESTIONNAIRE_TARGET_COUNT,
        )
    }

    /// Free-text prompt: description plus keywords, ten names
    pub fn description() -> Self {
        Self::new(
            "You are a domain name expert. Generate {{count}} creative, brandable, and memorable domain names \
for the business described below. Keep them short, easy to spell and relevant.

Business description: {{businessDescription}}
Keywords: {{keywords}}

Return ONLY a JSON object of the form {\"domainNames\": [\"name1\", \"name2\"]} with exactly {{count}} entries.",
            DESCRIPTION_TARGET_COUNT,
        )
    }
}

/// One template per input variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    pub questionnaire: PromptTemplate,
    pub description: PromptTemplate,
}

impl PromptTemplates {
    pub fn for_variant(&self, variant: InputVariant) -> &PromptTemplate {
        match variant {
            InputVariant::Questionnaire => &self.questionnaire,
            InputVariant::Description => &self.description,
        }
    }
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            questionnaire: PromptTemplate::questionnaire(),
            description: PromptTemplate::description(),
        }
    }
}

/// Registrar cart URL with a `{domain}` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseLinkTemplate {
    template: String,
}

impl PurchaseLinkTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains("{domain}") {
            return Err(DomainPilotError::config(
                "Purchase URL template must contain a {domain} placeholder",
            ));
        }
        Ok(Self { template })
    }

    /// Cart URL for a full domain such as `ecopaws.app`
    pub fn link_for(&self, domain: &str) -> String {
        self.template.replace("{domain}", domain)
    }
}

impl Default for PurchaseLinkTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_PURCHASE_URL_TEMPLATE.to_string(),
        }
    }
}

/// Tuning for the simulated resolver
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Artificial delay standing in for registrar latency
    pub latency: Duration,
    /// Chance that an ordinary TLD is available
    pub baseline_probability: f64,
    /// Chance that a scarce TLD is available
    pub scarce_probability: f64,
    pub scarce_tlds: Vec<String>,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Both probabilities must be finite and within `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("baseline_probability", self.baseline_probability),
            ("scarce_probability", self.scarce_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DomainPilotError::config(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(1500),
            baseline_probability: 0.7,
            scarce_probability: 0.2,
            scarce_tlds: SCARCE_TLDS.iter().map(|s| s.to_string()).collect(),
            seed: None,
        }
    }
}

/// Tuning for live RDAP lookups
#[derive(Debug, Clone, PartialEq)]
pub struct RdapConfig {
    pub concurrent_checks: usize,
    /// Per (base name, TLD) lookup budget; exceeding it yields `unknown`
    pub timeout: Duration,
}

impl Default for RdapConfig {
    fn default() -> Self {
        Self {
            concurrent_checks: 10,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Which availability resolver to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverKind {
    #[default]
    Simulated,
    Rdap,
}

impl std::str::FromStr for ResolverKind {
    type Err = DomainPilotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "simulated" | "sim" => Ok(ResolverKind::Simulated),
            "rdap" => Ok(ResolverKind::Rdap),
            other => Err(DomainPilotError::config(format!(
                "Unknown resolver '{}'. Expected 'simulated' or 'rdap'",
                other
            ))),
        }
    }
}

/// Everything the binary needs, read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Providers in priority order; the first is the default
    pub providers: Vec<LlmConfig>,
    pub resolver: ResolverKind,
    pub simulation: SimulationConfig,
    pub rdap: RdapConfig,
    pub tlds: TldSet,
    pub templates: PromptTemplates,
    pub purchase_link: PurchaseLinkTemplate,
}

impl AppConfig {
    /// Read configuration from environment variables (call [`crate::init`] first
    /// so `.env` is loaded).
    pub fn from_env() -> Result<Self> {
        let mut providers = Vec::new();

        if let Ok(api_key) = env::var("OPENAI_API_KEY") {
            providers.push(LlmConfig {
                provider: "openai".to_string(),
                model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4.1-mini".to_string()),
                api_key,
                base_url: env::var("OPENAI_BASE_URL").ok(),
                temperature: 0.7,
            });
        }

        if let Ok(api_key) = env::var("ANTHROPIC_API_KEY") {
            providers.push(LlmConfig {
                provider: "anthropic".to_string(),
                model: env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| "claude-sonnet-4-0".to_string()),
                api_key,
                base_url: None,
                temperature: 0.7,
            });
        }

        if let Ok(api_key) = env::var("GEMINI_API_KEY") {
            providers.push(LlmConfig {
                provider: "gemini".to_string(),
                model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
                api_key,
                base_url: None,
                temperature: 0.7,
            });
        }

        if let Ok(model) = env::var("OLLAMA_MODEL") {
            providers.push(LlmConfig {
                provider: "ollama".to_string(),
                model,
                api_key: String::new(),
                base_url: env::var("OLLAMA_BASE_URL").ok(),
                temperature: 0.7,
            });
        }

        let resolver = match env::var("DOMAIN_PILOT_RESOLVER") {
            Ok(value) => value.parse()?,
            Err(_) => ResolverKind::default(),
        };

        let mut simulation = SimulationConfig::default();
        if let Ok(value) = env::var("DOMAIN_PILOT_LATENCY_MS") {
            let ms: u64 = value.trim().parse().map_err(|_| {
                DomainPilotError::config(format!("DOMAIN_PILOT_LATENCY_MS must be a number, got '{}'", value))
            })?;
            simulation.latency = Duration::from_millis(ms);
        }

        let purchase_link = match env::var("PURCHASE_URL_TEMPLATE") {
            Ok(template) => PurchaseLinkTemplate::new(template)?,
            Err(_) => PurchaseLinkTemplate::default(),
        };

        Ok(Self {
            providers,
            resolver,
            simulation,
            rdap: RdapConfig::default(),
            tlds: TldSet::default(),
            templates: PromptTemplates::default(),
            purchase_link,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tld_order() {
        let tlds = TldSet::default();
        let order: Vec<&str> = tlds.iter().collect();
        assert_eq!(order, vec![".com", ".io", ".ai", ".app", ".co", ".xyz", ".net", ".org"]);
    }

    #[test]
    fn test_tld_set_normalizes_entries() {
        let tlds = TldSet::new(["COM", ".dev", "com"]).unwrap();
        assert_eq!(tlds.as_slice(), &[".com".to_string(), ".dev".to_string()]);
        assert!(tlds.contains("dev"));
        assert!(tlds.contains(".DEV"));
        assert!(!tlds.contains(".io"));
    }

    #[test]
    fn test_tld_set_rejects_garbage() {
        assert!(TldSet::new(Vec::<String>::new()).is_err());
        assert!(TldSet::new(["co m"]).is_err());
    }

    #[test]
    fn test_purchase_link() {
        let link = PurchaseLinkTemplate::default().link_for("ecopaws.app");
        assert_eq!(
            link,
            "https://portal.snbdhost.com/cart.php?a=add&domain=register&query=ecopaws.app"
        );
        assert!(PurchaseLinkTemplate::new("https://example.com/cart").is_err());
    }

    #[test]
    fn test_resolver_kind_parse() {
        assert_eq!("RDAP".parse::<ResolverKind>().unwrap(), ResolverKind::Rdap);
        assert_eq!("simulated".parse::<ResolverKind>().unwrap(), ResolverKind::Simulated);
        assert!("whois".parse::<ResolverKind>().is_err());
    }

    #[test]
    fn test_simulation_probabilities_validated() {
        assert!(SimulationConfig::default().validate().is_ok());

        for bad in [f64::NAN, -0.1, 1.5, f64::INFINITY] {
            let config = SimulationConfig {
                scarce_probability: bad,
                ..SimulationConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert!(matches!(err, DomainPilotError::Config { .. }), "accepted {}", bad);
        }

        let edges = SimulationConfig {
            baseline_probability: 1.0,
            scarce_probability: 0.0,
            ..SimulationConfig::default()
        };
        assert!(edges.validate().is_ok());
    }

    #[test]
    fn test_template_counts() {
        let templates = PromptTemplates::default();
        assert_eq!(templates.for_variant(InputVariant::Questionnaire).target_count, 20);
        assert_eq!(templates.for_variant(InputVariant::Description).target_count, 10);
    }
}
