//! HTTP client for making requests to search backends

use super::user_agent::{accept_html, accept_json, accept_language, generate_user_agent};
use crate::config::{OutgoingSettings, SearchSettings};
use crate::error::SearchError;
use crate::providers::{HttpMethod, ProviderRequest, ProviderResponse, RequestBody};
use reqwest::{Client, RequestBuilder, Response};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client wrapper shared by all providers
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    deadline: Duration,
    user_agent: String,
    accept_language: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, SearchError> {
        Self::with_settings(&OutgoingSettings::default(), &SearchSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(
        outgoing: &OutgoingSettings,
        search: &SearchSettings,
    ) -> Result<Self, SearchError> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(outgoing.pool_maxsize)
            .gzip(true)
            .brotli(true);

        if !outgoing.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref proxy_url) = outgoing.proxies.all {
            builder = builder.proxy(proxy(reqwest::Proxy::all(proxy_url))?);
        } else {
            if let Some(ref http) = outgoing.proxies.http {
                builder = builder.proxy(proxy(reqwest::Proxy::http(http))?);
            }
            if let Some(ref https) = outgoing.proxies.https {
                builder = builder.proxy(proxy(reqwest::Proxy::https(https))?);
            }
        }

        let client = builder
            .build()
            .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {}", e)))?;

        let deadline = Duration::try_from_secs_f64(search.timeout.max(0.001))
            .map_err(|e| SearchError::Config(format!("invalid timeout {}: {}", search.timeout, e)))?;

        Ok(Self {
            client,
            deadline,
            user_agent: outgoing
                .useragent
                .clone()
                .unwrap_or_else(generate_user_agent),
            accept_language: accept_language(&outgoing.language),
        })
    }

    /// Replace the per-call deadline
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Per-call deadline
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Execute a provider request as a single attempt under one deadline
    ///
    /// The deadline covers sending the request and reading the body. When
    /// it expires the in-flight exchange is dropped, which closes the
    /// underlying connection.
    pub async fn execute(&self, request: ProviderRequest) -> Result<ProviderResponse, SearchError> {
        let deadline = request.timeout.unwrap_or(self.deadline);
        let url = request.url.clone();
        let builder = self.build(request);

        debug!("Requesting {} with deadline {:?}", url, deadline);

        match tokio::time::timeout(deadline, Self::exchange(builder, deadline)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Request to {} exceeded deadline of {:?}", url, deadline);
                Err(SearchError::Timeout(deadline))
            }
        }
    }

    fn build(&self, request: ProviderRequest) -> RequestBuilder {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        req_builder = req_builder.header("User-Agent", &self.user_agent);

        req_builder = if request.browser {
            req_builder
                .header("Accept", accept_html())
                .header("Accept-Language", &self.accept_language)
                .header("DNT", "1")
                .header("Upgrade-Insecure-Requests", "1")
        } else {
            req_builder.header("Accept", accept_json())
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        if let Some(body) = request.data {
            req_builder = match body {
                RequestBody::Json(json) => req_builder.json(&json),
            };
        }

        req_builder
    }

    async fn exchange(
        builder: RequestBuilder,
        deadline: Duration,
    ) -> Result<ProviderResponse, SearchError> {
        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(e, deadline))?;

        Self::parse_response(response, deadline).await
    }

    async fn parse_response(
        response: Response,
        deadline: Duration,
    ) -> Result<ProviderResponse, SearchError> {
        let status = response.status().as_u16();
        let url = response.url().to_string();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.as_str().to_ascii_lowercase(), v.to_string());
            }
        }

        let text = response
            .text()
            .await
            .map_err(|e| transport_error(e, deadline))?;

        Ok(ProviderResponse {
            status,
            headers,
            text,
            url,
        })
    }
}

fn proxy(result: reqwest::Result<reqwest::Proxy>) -> Result<reqwest::Proxy, SearchError> {
    result.map_err(|e| SearchError::Config(format!("invalid proxy: {}", e)))
}

fn transport_error(error: reqwest::Error, deadline: Duration) -> SearchError {
    if error.is_timeout() {
        SearchError::Timeout(deadline)
    } else {
        SearchError::transport(error.to_string())
    }
}
