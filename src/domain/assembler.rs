//! Joins base names with their availability into display-ready suggestions

use crate::config::{PurchaseLinkTemplate, TldSet};
use crate::domain::resolver::AvailabilityMap;
use crate::error::{DomainPilotError, Result};
use crate::types::{BaseName, DomainSuggestion, TldAvailability};

/// Build one suggestion. The preferred TLD is the first available entry in
/// list order; a name with nothing available is still a suggestion, just
/// without a preferred TLD.
pub fn assemble(base_name: BaseName, tlds: Vec<TldAvailability>) -> DomainSuggestion {
    let preferred_tld = tlds.iter().find(|t| t.available).map(|t| t.tld.clone());
    DomainSuggestion {
        base_name,
        tlds,
        preferred_tld,
    }
}

/// Assemble every name in `order`, checking the resolver kept its contract:
/// one entry per name, each listing exactly `expected` in order.
pub fn assemble_all(
    order: &[BaseName],
    mut availability: AvailabilityMap,
    expected: &TldSet,
) -> Result<Vec<DomainSuggestion>> {
    order
        .iter()
        .map(|name| {
            let tlds = availability.remove(name).ok_or_else(|| {
                DomainPilotError::availability(format!("Resolver returned no entry for '{}'", name))
            })?;

            let in_order = tlds.len() == expected.len()
                && tlds.iter().zip(expected.iter()).all(|(got, want)| got.tld == want);
            if !in_order {
                return Err(DomainPilotError::availability(format!(
                    "Resolver returned {} TLD entries for '{}' out of the fixed order",
                    tlds.len(),
                    name
                )));
            }

            Ok(assemble(name.clone(), tlds))
        })
        .collect()
}

/// Registrar cart link for the preferred domain; `None` means the
/// call-to-action should be shown disabled.
pub fn purchase_link(suggestion: &DomainSuggestion, template: &PurchaseLinkTemplate) -> Option<String> {
    suggestion.purchase_link(template)
}
