//! Settings structures for search-bridge configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure, mirrors settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub search: SearchSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub providers: ProvidersSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (SEARCH_BRIDGE_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_lookup(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary variable lookup
    pub fn merge_lookup<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SEARCH_BRIDGE_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = lookup("SEARCH_BRIDGE_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("SEARCH_BRIDGE_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = lookup("SEARCH_BRIDGE_TIMEOUT") {
            if let Ok(timeout) = val.parse::<f64>() {
                if timeout.is_finite() && timeout > 0.0 {
                    self.search.timeout = timeout;
                }
            }
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name reported by the HTTP surface
    pub instance_name: String,
}

impl GeneralSettings {
    /// Log filter used when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "search-bridge".to_string(),
        }
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Results returned when the caller does not ask for a count
    pub default_max_results: usize,
    /// Upper bound applied to caller-supplied counts
    pub max_results_limit: usize,
    /// Per-call deadline in seconds
    pub timeout: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_max_results: crate::DEFAULT_MAX_RESULTS,
            max_results_limit: 50,
            timeout: crate::DEFAULT_TIMEOUT,
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8888,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Fixed user agent (none = random desktop browser)
    pub useragent: Option<String>,
    /// Language sent in Accept-Language
    pub language: String,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            useragent: None,
            language: "en-US".to_string(),
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Backend endpoints
///
/// Credentials are not stored here; they come from the environment through
/// [`Credentials`](super::Credentials).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersSettings {
    pub tavily_url: String,
    pub exa_url: String,
    pub brave_url: String,
    pub firecrawl_url: String,
    pub duckduckgo_url: String,
}

impl Default for ProvidersSettings {
    fn default() -> Self {
        Self {
            tavily_url: "https://api.tavily.com".to_string(),
            exa_url: "https://api.exa.ai".to_string(),
            brave_url: "https://api.search.brave.com/res/v1".to_string(),
            firecrawl_url: "https://api.firecrawl.dev/v1".to_string(),
            duckduckgo_url: "https://html.duckduckgo.com/html/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8888);
        assert!(!settings.general.debug);
        assert_eq!(settings.search.default_max_results, 10);
        assert_eq!(settings.search.timeout, 15.0);
        assert!(settings.providers.duckduckgo_url.contains("duckduckgo.com"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
search:
  timeout: 4.5
providers:
  duckduckgo_url: "http://127.0.0.1:9000/html/"
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.search.timeout, 4.5);
        assert_eq!(settings.search.default_max_results, 10);
        assert_eq!(settings.providers.duckduckgo_url, "http://127.0.0.1:9000/html/");
        assert_eq!(settings.providers.brave_url, "https://api.search.brave.com/res/v1");
    }

    #[test]
    fn test_merge_lookup() {
        let vars: HashMap<&str, &str> = [
            ("SEARCH_BRIDGE_PORT", "9999"),
            ("SEARCH_BRIDGE_DEBUG", "true"),
            ("SEARCH_BRIDGE_TIMEOUT", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.merge_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.server.port, 9999);
        assert!(settings.general.debug);
        assert_eq!(settings.search.timeout, 15.0);
    }

    #[test]
    fn test_non_finite_timeout_ignored() {
        for raw in ["inf", "NaN", "-3", "0"] {
            let mut settings = Settings::default();
            settings.merge_lookup(|key| (key == "SEARCH_BRIDGE_TIMEOUT").then(|| raw.to_string()));
            assert_eq!(settings.search.timeout, 15.0, "accepted {}", raw);
        }

        let mut settings = Settings::default();
        settings.merge_lookup(|key| (key == "SEARCH_BRIDGE_TIMEOUT").then(|| "2.5".to_string()));
        assert_eq!(settings.search.timeout, 2.5);
    }

    #[test]
    fn test_log_filter_follows_debug() {
        let mut settings = Settings::default();
        assert_eq!(settings.general.log_filter(), "info");
        settings.general.debug = true;
        assert_eq!(settings.general.log_filter(), "debug");
    }
}
