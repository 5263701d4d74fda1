//! SALIC dataset configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// How a relay wraps the dataset response
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProxyKind {
    /// Body is the dataset JSON
    Passthrough,
    /// Body is `{"contents": "<json>"}`
    AllOrigins,
}

/// One CORS relay
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProxyConfig {
    pub name: String,
    pub kind: ProxyKind,
    /// Prefix the percent-encoded target URL is appended to
    pub prefix: String,
    /// Send `salic.proxy_api_key` with every request
    #[serde(default)]
    pub send_api_key: bool,
}

impl ProxyConfig {
    fn new(name: &str, kind: ProxyKind, prefix: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            prefix: prefix.to_string(),
            send_api_key: false,
        }
    }
}

/// SALIC client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SalicConfig {
    /// Dataset API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Relays, tried in order
    #[serde(default = "default_proxies")]
    pub proxies: Vec<ProxyConfig>,

    /// API key for relays that take one
    pub proxy_api_key: Option<Secret<String>>,

    /// Header carrying the API key
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,

    /// Query cache time-to-live in seconds
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Upper bound for a diversified search in seconds
    #[serde(default = "default_search_timeout")]
    pub search_timeout_secs: u64,

    /// Per-request relay timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Projects shown after a search
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
}

impl SalicConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("salic.base_url"));
        }
        if self.proxies.is_empty() {
            return Err(ValidationError::NoProxiesConfigured);
        }
        for proxy in &self.proxies {
            if !proxy.prefix.starts_with("http://") && !proxy.prefix.starts_with("https://") {
                return Err(ValidationError::InvalidUrl("salic.proxies.prefix"));
            }
        }
        if self.search_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("salic.search_timeout_secs"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("salic.request_timeout_secs"));
        }
        if self.display_limit == 0 {
            return Err(ValidationError::InvalidDisplayLimit);
        }
        Ok(())
    }
}

impl Default for SalicConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            proxies: default_proxies(),
            proxy_api_key: None,
            api_key_header: default_api_key_header(),
            cache_ttl_secs: default_cache_ttl(),
            search_timeout_secs: default_search_timeout(),
            request_timeout_secs: default_request_timeout(),
            display_limit: default_display_limit(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.salic.cultura.gov.br/api/v1".to_string()
}

fn default_proxies() -> Vec<ProxyConfig> {
    vec![
        ProxyConfig::new("thingproxy", ProxyKind::Passthrough, "https://thingproxy.freeboard.io/fetch/"),
        ProxyConfig::new("allorigins", ProxyKind::AllOrigins, "https://api.allorigins.win/get?url="),
        ProxyConfig {
            send_api_key: true,
            ..ProxyConfig::new("cors.sh", ProxyKind::Passthrough, "https://proxy.cors.sh/")
        },
    ]
}

fn default_api_key_header() -> String {
    "x-cors-api-key".to_string()
}

fn default_cache_ttl() -> u64 {
    300
}

fn default_search_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    15
}

fn default_display_limit() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_proxies_in_order() {
        let config = SalicConfig::default();
        let names: Vec<&str> = config.proxies.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["thingproxy", "allorigins", "cors.sh"]);
        assert_eq!(config.proxies[1].kind, ProxyKind::AllOrigins);
        assert!(config.proxies[2].send_api_key);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn durations() {
        let config = SalicConfig::default();
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.search_timeout(), Duration::from_secs(10));
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn empty_proxy_list_is_invalid() {
        let config = SalicConfig {
            proxies: vec![],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::NoProxiesConfigured));
    }

    #[test]
    fn zero_display_limit_is_invalid() {
        let config = SalicConfig {
            display_limit: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidDisplayLimit));
    }

    #[test]
    fn proxy_kind_names() {
        let kind: ProxyKind = serde_json::from_str("\"all_origins\"").unwrap();
        assert_eq!(kind, ProxyKind::AllOrigins);
    }
}
