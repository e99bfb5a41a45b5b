//! RDAP (Registration Data Access Protocol) support.

pub mod registry;

pub use registry::RdapRegistry;
