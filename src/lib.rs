//! Domain Pilot - AI-assisted business name brainstorming with domain suggestions
//!
//! Business details go in, an LLM proposes names, the names are cleaned into
//! base names, and each base name is checked against a fixed list of TLDs.
//!
//! ```no_run
//! use std::sync::Arc;
//! use domain_pilot::{DescriptionInput, DomainPipeline, LlmNameGenerator, SimulatedResolver};
//!
//! # async fn demo(generator: LlmNameGenerator) {
//! let pipeline = DomainPipeline::new(Arc::new(generator), Arc::new(SimulatedResolver::default()));
//! let input = DescriptionInput::new("A subscription box for eco-friendly dog toys", "eco, dog");
//! match pipeline.run(input.into()).await {
//!     Ok(suggestions) => println!("{} suggestions", suggestions.len()),
//!     Err(e) => eprintln!("{}", e),
//! }
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod input;
pub mod llm;
pub mod pipeline;
pub mod rdap;
pub mod types;

use std::sync::Arc;

// Re-export commonly used types
pub use config::{AppConfig, PromptTemplate, PromptTemplates, PurchaseLinkTemplate, ResolverKind, TldSet};
pub use error::{DomainPilotError, PipelineError, Result};
pub use types::{
    AvailabilityStatus, BaseName, DescriptionInput, DomainSuggestion, GenerationRequest, InputVariant,
    LlmConfig, PipelineInput, QuestionnaireInput, TldAvailability,
};

// Re-export main functionality
#[cfg(feature = "rdap")]
pub use domain::RdapResolver;
pub use domain::{AvailabilityResolver, SimulatedResolver};
pub use llm::{LlmNameGenerator, NameGenerator};
pub use pipeline::DomainPipeline;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}

/// Build a pipeline from environment configuration
pub fn pipeline_from_config(config: &AppConfig) -> Result<DomainPipeline> {
    let generator = LlmNameGenerator::new(config.templates.clone());
    for provider in &config.providers {
        generator.add_provider(provider)?;
    }
    if !generator.is_ready() {
        return Err(DomainPilotError::config(
            "No LLM providers configured. Please set OPENAI_API_KEY, ANTHROPIC_API_KEY, GEMINI_API_KEY or OLLAMA_MODEL.",
        ));
    }

    let resolver: Arc<dyn AvailabilityResolver> = match config.resolver {
        ResolverKind::Simulated => Arc::new(SimulatedResolver::new(
            config.tlds.clone(),
            config.simulation.clone(),
        )?),
        #[cfg(feature = "rdap")]
        ResolverKind::Rdap => Arc::new(RdapResolver::new(config.tlds.clone(), config.rdap.clone())?),
        #[cfg(not(feature = "rdap"))]
        ResolverKind::Rdap => {
            return Err(DomainPilotError::config(
                "RDAP resolver requested but the `rdap` feature is disabled",
            ))
        }
    };

    Ok(DomainPipeline::new(Arc::new(generator), resolver))
}
