//! Provider traits and types

use crate::error::SearchError;
use crate::network::HttpClient;
use crate::results::{ProviderResults, SearchResults};
use crate::search::SearchQuery;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Identifier of a search backend
///
/// Only used to pick an implementation; it never appears in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Tavily,
    Exa,
    Brave,
    Firecrawl,
    Searxng,
    DuckDuckGo,
}

impl ProviderKind {
    /// Every kind, credentialed ones first in default precedence order
    pub const ALL: [ProviderKind; 6] = [
        ProviderKind::Tavily,
        ProviderKind::Exa,
        ProviderKind::Brave,
        ProviderKind::Firecrawl,
        ProviderKind::Searxng,
        ProviderKind::DuckDuckGo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tavily => "tavily",
            Self::Exa => "exa",
            Self::Brave => "brave",
            Self::Firecrawl => "firecrawl",
            Self::Searxng => "searxng",
            Self::DuckDuckGo => "duckduckgo",
        }
    }

    /// Whether this backend needs a credential
    pub fn requires_credential(&self) -> bool {
        !matches!(self, Self::DuckDuckGo)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| SearchError::InvalidQuery(format!("unknown provider: {}", s.trim())))
    }
}

/// HTTP request to be made by a provider
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// URL to request
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: Vec<(String, String)>,
    /// Request body
    pub data: Option<RequestBody>,
    /// Send the desktop browser header set
    pub browser: bool,
    /// Deadline override for this request
    pub timeout: Option<Duration>,
}

impl ProviderRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Get)
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Post)
    }

    fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: HashMap::new(),
            params: Vec::new(),
            data: None,
            browser: false,
            timeout: None,
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Add JSON body
    pub fn json(mut self, data: serde_json::Value) -> Self {
        self.data = Some(RequestBody::Json(data));
        self
    }

    /// Present as a desktop browser
    pub fn browser(mut self) -> Self {
        self.browser = true;
        self
    }

    /// Override the client deadline
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Lowercased host of the request URL
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
    }
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Request body types
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(serde_json::Value),
}

/// HTTP response from a provider request
#[derive(Debug)]
pub struct ProviderResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, lowercase names
    pub headers: HashMap<String, String>,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl ProviderResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, SearchError> {
        serde_json::from_str(&self.text)
            .map_err(|e| SearchError::transport(format!("invalid response body: {}", e)))
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if response indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Seconds from the Retry-After header, if numeric
    pub fn retry_after(&self) -> Option<u64> {
        self.headers
            .get("retry-after")
            .and_then(|v| v.trim().parse().ok())
    }

    /// Map an API backend's status onto the error taxonomy
    pub fn error_for_status(&self, provider: &'static str) -> Result<(), SearchError> {
        if self.is_success() {
            return Ok(());
        }

        match self.status {
            401 | 403 => Err(SearchError::Auth {
                provider,
                status: self.status,
            }),
            429 => {
                let message = match self.retry_after() {
                    Some(secs) => format!("{} rate limited, retry after {}s", provider, secs),
                    None => format!("{} rate limited", provider),
                };
                Err(SearchError::http(429, message))
            }
            status => Err(SearchError::http(
                status,
                format!("{} search error: {}", provider, status),
            )),
        }
    }
}

/// A search backend
///
/// Implementations build a request and parse the response; `search` drives
/// the exchange through the provider's [`HttpClient`] and applies the
/// response invariants.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Backend identifier
    fn kind(&self) -> ProviderKind;

    /// Provider name
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// HTTP client used for the exchange
    fn client(&self) -> &HttpClient;

    /// Build the HTTP request for a search
    fn request(&self, query: &SearchQuery) -> Result<ProviderRequest, SearchError>;

    /// Parse the HTTP response into results
    fn response(
        &self,
        query: &SearchQuery,
        response: ProviderResponse,
    ) -> Result<ProviderResults, SearchError>;

    /// Run one search against this backend; a single attempt, no retry
    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, SearchError> {
        let request = self.request(query)?;
        let own_host = request.host();
        let response = self.client().execute(request).await?;
        let output = self.response(query, response)?;
        Ok(SearchResults::new(query, output, own_host.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> ProviderResponse {
        ProviderResponse {
            status,
            headers: HashMap::new(),
            text: String::new(),
            url: "https://api.example.com/search".to_string(),
        }
    }

    #[test]
    fn test_kind_round_trip_names() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.as_str().parse::<ProviderKind>().unwrap(), kind);
        }
        assert_eq!(" DuckDuckGo ".parse::<ProviderKind>().unwrap(), ProviderKind::DuckDuckGo);
        assert!("bing".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_request_builder() {
        let request = ProviderRequest::get("https://HTML.duckduckgo.com/html/?q=rust")
            .header("X-Test", "1")
            .param("count", "5")
            .browser();

        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.browser);
        assert_eq!(request.host().as_deref(), Some("html.duckduckgo.com"));
        assert_eq!(request.params, vec![("count".to_string(), "5".to_string())]);
    }

    #[test]
    fn test_error_for_status() {
        assert!(response(200).error_for_status("tavily").is_ok());
        assert!(matches!(
            response(401).error_for_status("tavily"),
            Err(SearchError::Auth { status: 401, .. })
        ));
        assert!(matches!(
            response(403).error_for_status("exa"),
            Err(SearchError::Auth { status: 403, .. })
        ));
        assert!(response(502)
            .error_for_status("brave")
            .unwrap_err()
            .status()
            .eq(&Some(502)));
    }

    #[test]
    fn test_rate_limit_carries_retry_after() {
        let mut limited = response(429);
        limited
            .headers
            .insert("retry-after".to_string(), "60".to_string());

        let err = limited.error_for_status("brave").unwrap_err();
        assert!(err.is_rate_limited());
        assert!(err.to_string().contains("60"));
    }

    #[test]
    fn test_invalid_json_is_network_error() {
        let mut bad = response(200);
        bad.text = "<html>".to_string();
        let err = bad.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, SearchError::Network { status: None, .. }));
    }
}
