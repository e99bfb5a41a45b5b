//! Error handling for domain-pilot
//!
//! Two layers: [`DomainPilotError`] is what the individual stages return, and
//! [`PipelineError`] is the only thing the orchestrator hands back to callers.

use thiserror::Error;

/// Stage-level error type
#[derive(Error, Debug, Clone)]
pub enum DomainPilotError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Name generation error ({provider}): {message}")]
    Generation { provider: String, message: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Timeout error: {operation} timed out after {timeout_secs}s")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Availability error: {message}")]
    Availability { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainPilotError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a name generation error
    pub fn generation(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generation {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_secs,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create an availability error
    pub fn availability(message: impl Into<String>) -> Self {
        Self::Availability {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error came from talking to the generative model
    /// (transport, timeout, or an unusable reply).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Generation { .. } | Self::Network { .. } | Self::Timeout { .. } | Self::Parse { .. }
        )
    }
}

impl From<reqwest::Error> for DomainPilotError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        if err.is_timeout() {
            Self::timeout("HTTP request", 30)
        } else if err.is_connect() {
            Self::network("Connection failed", status_code, url)
        } else if err.is_request() {
            Self::network("Request failed", status_code, url)
        } else {
            Self::network(err.to_string(), status_code, url)
        }
    }
}

impl From<serde_json::Error> for DomainPilotError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<tokio::time::error::Elapsed> for DomainPilotError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::timeout("Operation", 30)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DomainPilotError>;

/// Caller-facing pipeline failure.
///
/// `Display` is always safe to show to an end user; the underlying cause is
/// logged by the orchestrator and never carried here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Input failed validation; the message lists what to fix.
    #[error("{0}")]
    Validation(String),

    #[error("The AI service could not be reached or returned an unusable answer. Please try again.")]
    Generation,

    #[error("The AI could not generate domain names. Please try a different prompt.")]
    EmptyGeneration,

    #[error("Domain availability could not be checked right now. Please try again.")]
    Availability,

    #[error("The request was cancelled.")]
    Cancelled,

    #[error("An unexpected error occurred while generating domains. Please try again.")]
    Unexpected,
}

impl PipelineError {
    /// Whether resubmitting (possibly with different input) can succeed
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Unexpected)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainPilotError::validation("keywords missing");
        assert!(error.to_string().contains("keywords missing"));

        let error = DomainPilotError::generation("openai", "bad reply");
        assert_eq!(error.to_string(), "Name generation error (openai): bad reply");
    }

    #[test]
    fn test_upstream_classification() {
        assert!(DomainPilotError::parse("no json", None).is_upstream());
        assert!(DomainPilotError::timeout("HTTP request", 30).is_upstream());
        assert!(!DomainPilotError::config("missing key").is_upstream());
        assert!(!DomainPilotError::internal("boom").is_upstream());
    }

    #[test]
    fn test_pipeline_error_messages_hide_details() {
        let error = PipelineError::Unexpected;
        assert!(!error.is_recoverable());
        assert!(error.to_string().starts_with("An unexpected error"));

        let error = PipelineError::Validation("Please enter at least one keyword.".to_string());
        assert_eq!(error.to_string(), "Please enter at least one keyword.");
        assert!(error.is_recoverable());
    }
}
