//! Live availability checks over RDAP

use crate::config::{RdapConfig, TldSet};
use crate::domain::resolver::{AvailabilityMap, AvailabilityResolver};
use crate::domain::DomainValidator;
use crate::error::{DomainPilotError, Result};
use crate::rdap::RdapRegistry;
use crate::types::{AvailabilityStatus, BaseName, TldAvailability};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::time::timeout;

/// Resolver backed by one RDAP query per (base name, TLD) pair.
///
/// Pairs are checked concurrently, bounded by `concurrent_checks`. A pair that
/// times out, fails, or cannot be queried is reported as unknown; the batch as
/// a whole never fails because of a single lookup.
pub struct RdapResolver {
    client: Client,
    tlds: TldSet,
    config: RdapConfig,
    semaphore: Semaphore,
    registry: RdapRegistry,
    validator: DomainValidator,
}

impl RdapResolver {
    pub fn new(tlds: TldSet, config: RdapConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("domain-pilot/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(config.concurrent_checks)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| DomainPilotError::network(e.to_string(), None, None))?;

        let semaphore = Semaphore::new(config.concurrent_checks.max(1));
        let validator = DomainValidator::new()?.with_tld_whitelist(tlds.clone());

        Ok(Self {
            client,
            tlds,
            config,
            semaphore,
            registry: RdapRegistry::default(),
            validator,
        })
    }

    /// Use a different TLD to server mapping
    pub fn with_registry(mut self, registry: RdapRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Availability of a single pair; never fails
    pub async fn check_pair(&self, base: &BaseName, tld: &str) -> TldAvailability {
        let domain = base.with_tld(tld);

        if let Err(e) = self.validator.validate(&domain) {
            tracing::debug!(domain = %domain, error = %e, "Skipping lookup for unregistrable name");
            return TldAvailability::unknown(tld);
        }

        let _permit = match self.semaphore.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                tracing::warn!(domain = %domain, error = %e, "Failed to acquire semaphore");
                return TldAvailability::unknown(tld);
            }
        };

        let start_time = Instant::now();
        let status = match timeout(self.config.timeout, self.lookup(&domain)).await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                tracing::debug!(domain = %domain, method = "rdap", error = %e, "RDAP check failed");
                AvailabilityStatus::Unknown
            }
            Err(_) => {
                tracing::debug!(
                    domain = %domain,
                    timeout_ms = %self.config.timeout.as_millis(),
                    "RDAP check timed out"
                );
                AvailabilityStatus::Unknown
            }
        };

        tracing::debug!(
            domain = %domain,
            method = "rdap",
            status = %status,
            duration_ms = %start_time.elapsed().as_millis(),
            "Domain check completed"
        );

        TldAvailability::new(tld, status)
    }

    async fn lookup(&self, domain: &str) -> Result<AvailabilityStatus> {
        let url = self.registry.domain_url(domain).ok_or_else(|| {
            DomainPilotError::availability(format!("No RDAP server found for {}", domain))
        })?;

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/rdap+json")
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(AvailabilityStatus::Available);
        }

        if !status.is_success() {
            return Err(DomainPilotError::network(
                format!("RDAP request failed with status {}", status),
                Some(status.as_u16()),
                Some(url),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DomainPilotError::network(e.to_string(), None, Some(url.clone())))?;

        let rdap_response: RdapResponse =
            serde_json::from_str(&text).map_err(|e| DomainPilotError::parse(e.to_string(), Some(text)))?;

        Ok(rdap_response.availability())
    }
}

#[async_trait]
impl AvailabilityResolver for RdapResolver {
    async fn resolve(&self, names: &[BaseName]) -> Result<AvailabilityMap> {
        let batch_start = Instant::now();

        let per_name = names.iter().map(move |name| async move {
            let checks = self.tlds.iter().map(|tld| self.check_pair(name, tld));
            (name.clone(), join_all(checks).await)
        });
        let results: AvailabilityMap = join_all(per_name).await.into_iter().collect();

        let unknown = results
            .values()
            .flatten()
            .filter(|t| t.status == AvailabilityStatus::Unknown)
            .count();

        tracing::info!(
            names = %names.len(),
            pairs = %(names.len() * self.tlds.len()),
            unknown = %unknown,
            batch_duration_ms = %batch_start.elapsed().as_millis(),
            "RDAP batch completed"
        );

        Ok(results)
    }

    fn tlds(&self) -> &TldSet {
        &self.tlds
    }

    fn name(&self) -> &'static str {
        "rdap"
    }
}

/// RDAP domain object, reduced to what tells us the name is registered
#[derive(Debug, Deserialize)]
struct RdapResponse {
    #[serde(default)]
    status: Vec<String>,
    #[serde(default)]
    entities: Vec<serde_json::Value>,
    #[serde(default)]
    events: Vec<serde_json::Value>,
    #[serde(default)]
    nameservers: Vec<serde_json::Value>,
}

impl RdapResponse {
    // A 200 with registration data means taken; an empty object is treated
    // like a 404.
    fn availability(&self) -> AvailabilityStatus {
        if !self.status.is_empty()
            || !self.entities.is_empty()
            || !self.events.is_empty()
            || !self.nameservers.is_empty()
        {
            AvailabilityStatus::Taken
        } else {
            AvailabilityStatus::Available
        }
    }
}
