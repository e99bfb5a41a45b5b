//! Registrable domain validation
//!
//! A base name may be perfectly fine for brainstorming yet not be a legal
//! second-level label (leading hyphen, leftover dots, too long). Lookups for
//! such names are skipped rather than sent to a registry.

use crate::config::TldSet;
use crate::error::{DomainPilotError, Result};
use regex::Regex;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Domain name validator
pub struct DomainValidator {
    label_pattern: Regex,
    tld_whitelist: Option<TldSet>,
}

/// A domain split into its registrable label and dotted TLD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDomain {
    pub label: String,
    pub tld: String,
    pub full_domain: String,
}

impl DomainValidator {
    /// Create a new domain validator
    pub fn new() -> Result<Self> {
        let label_pattern = Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?$")
            .map_err(|e| DomainPilotError::internal(e.to_string()))?;

        Ok(Self {
            label_pattern,
            tld_whitelist: None,
        })
    }

    /// Only accept domains under these TLDs
    pub fn with_tld_whitelist(mut self, tlds: TldSet) -> Self {
        self.tld_whitelist = Some(tlds);
        self
    }

    /// Validate a second-level domain such as `ecopaws.app`
    pub fn validate(&self, domain: &str) -> Result<ValidatedDomain> {
        let domain = domain.trim().to_lowercase();

        if domain.is_empty() {
            return Err(DomainPilotError::validation("Domain name cannot be empty"));
        }

        if domain.len() > MAX_DOMAIN_LEN {
            return Err(DomainPilotError::validation("Domain name too long (max 253 characters)"));
        }

        let (label, tld) = domain
            .rsplit_once('.')
            .ok_or_else(|| DomainPilotError::validation("Domain must have a TLD"))?;

        if tld.is_empty() {
            return Err(DomainPilotError::validation("TLD cannot be empty"));
        }

        if let Some(whitelist) = &self.tld_whitelist {
            if !whitelist.contains(tld) {
                return Err(DomainPilotError::validation(format!("TLD '.{}' not in whitelist", tld)));
            }
        }

        if label.contains('.') {
            return Err(DomainPilotError::validation(format!(
                "'{}' is not a single label and cannot be registered",
                label
            )));
        }

        self.validate_label(label)?;

        Ok(ValidatedDomain {
            label: label.to_string(),
            tld: format!(".{}", tld),
            full_domain: domain.clone(),
        })
    }

    /// Whether `domain` would pass [`validate`](Self::validate)
    pub fn is_valid(&self, domain: &str) -> bool {
        self.validate(domain).is_ok()
    }

    fn validate_label(&self, label: &str) -> Result<()> {
        if label.is_empty() {
            return Err(DomainPilotError::validation("Domain label cannot be empty"));
        }

        if label.len() > MAX_LABEL_LEN {
            return Err(DomainPilotError::validation("Domain label too long (max 63 characters)"));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(DomainPilotError::validation("Domain label cannot start or end with hyphen"));
        }

        if !self.label_pattern.is_match(label) {
            return Err(DomainPilotError::validation("Domain contains invalid characters"));
        }

        // "xn--" style labels are reserved for IDN encodings
        if label.len() >= 4 && &label[2..4] == "--" && !label.starts_with("xn") {
            return Err(DomainPilotError::validation(
                "Hyphens in the third and fourth positions are reserved",
            ));
        }

        Ok(())
    }
}
