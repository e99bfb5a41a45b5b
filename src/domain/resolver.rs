//! Availability resolution contract and the simulated implementation

use crate::config::{SimulationConfig, TldSet};
use crate::error::Result;
use crate::types::{AvailabilityStatus, BaseName, TldAvailability};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::time::Instant;

/// Per-base-name availability, every entry listing the full TLD set in order
pub type AvailabilityMap = HashMap<BaseName, Vec<TldAvailability>>;

/// Resolves availability for a batch of base names.
///
/// Implementations must return an entry for every input name, and each entry
/// must hold one [`TldAvailability`] per configured TLD in configured order.
/// A lookup problem for a single pair should surface as
/// [`AvailabilityStatus::Unknown`]; `Err` is reserved for losing the batch.
#[async_trait]
pub trait AvailabilityResolver: Send + Sync {
    async fn resolve(&self, names: &[BaseName]) -> Result<AvailabilityMap>;

    /// TLDs every entry is resolved against
    fn tlds(&self) -> &TldSet;

    fn name(&self) -> &'static str;
}

/// Stand-in for a registrar lookup: one independent random draw per
/// (base name, TLD) pair after an artificial delay.
pub struct SimulatedResolver {
    tlds: TldSet,
    config: SimulationConfig,
}

impl SimulatedResolver {
    /// Fails when either probability is outside `[0, 1]`
    pub fn new(tlds: TldSet, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { tlds, config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn probability_for(&self, tld: &str) -> f64 {
        if self.config.scarce_tlds.iter().any(|t| t.eq_ignore_ascii_case(tld)) {
            self.config.scarce_probability
        } else {
            self.config.baseline_probability
        }
    }

    fn draw(&self, rng: &mut StdRng, tld: &str) -> TldAvailability {
        let status = if rng.gen_bool(self.probability_for(tld)) {
            AvailabilityStatus::Available
        } else {
            AvailabilityStatus::Taken
        };
        TldAvailability::new(tld, status)
    }
}

impl Default for SimulatedResolver {
    fn default() -> Self {
        Self {
            tlds: TldSet::default(),
            config: SimulationConfig::default(),
        }
    }
}

#[async_trait]
impl AvailabilityResolver for SimulatedResolver {
    async fn resolve(&self, names: &[BaseName]) -> Result<AvailabilityMap> {
        let start = Instant::now();
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        let mut rng = self.rng();
        let results: AvailabilityMap = names
            .iter()
            .map(|name| {
                let entries: Vec<TldAvailability> = self.tlds.iter().map(|tld| self.draw(&mut rng, tld)).collect();
                (name.clone(), entries)
            })
            .collect();

        tracing::debug!(
            resolver = "simulated",
            names = %names.len(),
            pairs = %(names.len() * self.tlds.len()),
            duration_ms = %start.elapsed().as_millis(),
            "Simulated availability resolved"
        );

        Ok(results)
    }

    fn tlds(&self) -> &TldSet {
        &self.tlds
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
