//! Brave Search API

use super::traits::*;
use crate::error::SearchError;
use crate::network::HttpClient;
use crate::results::{ProviderResults, SearchResult};
use crate::search::SearchQuery;
use tracing::debug;

/// Largest `count` the API accepts
const MAX_COUNT: usize = 20;

mod api {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct BraveResponse {
        pub web: Option<WebResults>,
    }

    #[derive(Debug, Deserialize)]
    pub struct WebResults {
        #[serde(default)]
        pub results: Vec<WebResult>,
    }

    #[derive(Debug, Deserialize)]
    pub struct WebResult {
        #[serde(default)]
        pub title: String,
        #[serde(default)]
        pub url: String,
        #[serde(default)]
        pub description: String,
    }
}

/// Brave web search client
#[derive(Debug, Clone)]
pub struct Brave {
    client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl Brave {
    pub fn new(client: HttpClient, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }
}

impl SearchProvider for Brave {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Brave
    }

    fn client(&self) -> &HttpClient {
        &self.client
    }

    fn request(&self, query: &SearchQuery) -> Result<ProviderRequest, SearchError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SearchError::Config("missing BRAVE_API_KEY".to_string()))?;

        let count = query.max_results().min(MAX_COUNT);

        Ok(ProviderRequest::get(format!(
            "{}/web/search",
            self.base_url.trim_end_matches('/')
        ))
        .header("X-Subscription-Token", key)
        .param("q", query.text())
        .param("count", count.to_string()))
    }

    fn response(
        &self,
        _query: &SearchQuery,
        response: ProviderResponse,
    ) -> Result<ProviderResults, SearchError> {
        response.error_for_status(self.name())?;
        let body: api::BraveResponse = response.json()?;

        let mut output = ProviderResults::new();
        for item in body.web.map(|w| w.results).unwrap_or_default() {
            match SearchResult::new(item.title, item.url.as_str(), item.description) {
                Some(result) => output.add_result(result),
                None => debug!("brave returned unusable url {:?}", item.url),
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn brave() -> Brave {
        Brave::new(
            HttpClient::new().unwrap(),
            "https://api.search.brave.com/res/v1",
            Some("brave-key".to_string()),
        )
    }

    #[tokio::test]
    async fn test_brave_request() {
        let query = SearchQuery::new("rust programming").unwrap().with_max_results(40);
        let request = brave().request(&query).unwrap();

        assert_eq!(request.url, "https://api.search.brave.com/res/v1/web/search");
        assert_eq!(request.headers["X-Subscription-Token"], "brave-key");
        assert!(request
            .params
            .contains(&("q".to_string(), "rust programming".to_string())));
        assert!(request
            .params
            .contains(&("count".to_string(), "20".to_string())));
    }

    #[tokio::test]
    async fn test_brave_without_web_section() {
        let query = SearchQuery::new("rust").unwrap();
        let response = ProviderResponse {
            status: 200,
            headers: HashMap::new(),
            text: r#"{"query": {"original": "rust"}}"#.to_string(),
            url: String::new(),
        };

        let output = brave().response(&query, response).unwrap();
        assert!(output.is_empty());
    }
}
