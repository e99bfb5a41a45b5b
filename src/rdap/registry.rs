//! RDAP server registry for the TLDs we check.

use std::collections::HashMap;

/// Built-in RDAP base URLs, keyed by bare TLD. Each URL ends with `/`.
const DEFAULT_SERVERS: &[(&str, &str)] = &[
    ("com", "https://rdap.verisign.com/com/v1/"),
    ("net", "https://rdap.verisign.com/net/v1/"),
    ("org", "https://rdap.org.org/"),
    ("io", "https://rdap.nic.io/"),
    ("ai", "https://rdap.nic.ai/"),
    ("app", "https://rdap.nic.google/"),
    ("dev", "https://rdap.nic.google/"),
    ("xyz", "https://rdap.nic.xyz/"),
    ("co", "https://rdap.nic.co/"),
];

/// TLD to RDAP base URL lookup
#[derive(Debug, Clone)]
pub struct RdapRegistry {
    servers: HashMap<String, String>,
}

impl RdapRegistry {
    /// Registry with no servers at all
    pub fn empty() -> Self {
        Self {
            servers: HashMap::new(),
        }
    }

    /// Add or replace the server for a TLD (dotted or bare)
    pub fn with_server(mut self, tld: &str, base_url: &str) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.servers.insert(bare(tld), base_url);
        self
    }

    /// RDAP base URL for a TLD (dotted or bare)
    pub fn base_url(&self, tld: &str) -> Option<&str> {
        self.servers.get(&bare(tld)).map(|s| s.as_str())
    }

    /// Domain query URL for a full domain such as `ecopaws.com`
    pub fn domain_url(&self, domain: &str) -> Option<String> {
        let (_, tld) = domain.rsplit_once('.')?;
        let base = self.base_url(tld)?;
        Some(format!("{base}domain/{domain}"))
    }
}

impl Default for RdapRegistry {
    fn default() -> Self {
        DEFAULT_SERVERS
            .iter()
            .fold(Self::empty(), |registry, (tld, url)| registry.with_server(tld, url))
    }
}

fn bare(tld: &str) -> String {
    tld.trim_start_matches('.').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TldSet;

    #[test]
    fn test_default_covers_fixed_tlds() {
        let registry = RdapRegistry::default();
        for tld in TldSet::default().iter() {
            assert!(registry.base_url(tld).is_some(), "no RDAP server for {}", tld);
        }
    }

    #[test]
    fn test_domain_url() {
        let registry = RdapRegistry::default();
        assert_eq!(
            registry.domain_url("ecopaws.com").as_deref(),
            Some("https://rdap.verisign.com/com/v1/domain/ecopaws.com")
        );
        assert_eq!(registry.domain_url("ecopaws.zz"), None);
        assert_eq!(registry.domain_url("ecopaws"), None);
    }

    #[test]
    fn test_override() {
        let registry = RdapRegistry::empty().with_server(".IO", "http://localhost:9000");
        assert_eq!(registry.base_url("io"), Some("http://localhost:9000/"));
        assert_eq!(registry.base_url(".com"), None);
    }
}
