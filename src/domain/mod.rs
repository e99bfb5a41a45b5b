//! Base names, availability, and suggestion assembly

pub mod assembler;
#[cfg(feature = "rdap")]
pub mod checker;
pub mod normalizer;
pub mod resolver;
pub mod validator;

pub use assembler::{assemble, assemble_all, purchase_link};
#[cfg(feature = "rdap")]
pub use checker::RdapResolver;
pub use normalizer::{dedup, is_usable, normalize, normalize_all};
pub use resolver::{AvailabilityMap, AvailabilityResolver, SimulatedResolver};
pub use validator::{DomainValidator, ValidatedDomain};
