//! Firecrawl search API

use super::traits::*;
use crate::error::SearchError;
use crate::network::HttpClient;
use crate::results::{ProviderResults, SearchResult};
use crate::search::SearchQuery;
use serde_json::json;
use tracing::debug;

mod api {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct FirecrawlResponse {
        #[serde(default)]
        pub data: Vec<FirecrawlResult>,
    }

    #[derive(Debug, Deserialize)]
    pub struct FirecrawlResult {
        #[serde(default)]
        pub url: String,
        pub title: Option<String>,
        pub description: Option<String>,
    }
}

/// Firecrawl search client
#[derive(Debug, Clone)]
pub struct Firecrawl {
    client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl Firecrawl {
    pub fn new(client: HttpClient, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }
}

impl SearchProvider for Firecrawl {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Firecrawl
    }

    fn client(&self) -> &HttpClient {
        &self.client
    }

    fn request(&self, query: &SearchQuery) -> Result<ProviderRequest, SearchError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SearchError::Config("missing FIRECRAWL_API_KEY".to_string()))?;

        Ok(
            ProviderRequest::post(format!("{}/search", self.base_url.trim_end_matches('/')))
                .header("Authorization", format!("Bearer {}", key))
                .json(json!({
                    "query": query.text(),
                    "limit": query.max_results(),
                })),
        )
    }

    fn response(
        &self,
        _query: &SearchQuery,
        response: ProviderResponse,
    ) -> Result<ProviderResults, SearchError> {
        response.error_for_status(self.name())?;
        let body: api::FirecrawlResponse = response.json()?;

        let mut output = ProviderResults::new();
        for item in body.data {
            let title = item.title.unwrap_or_default();
            let content = item.description.unwrap_or_default();
            match SearchResult::new(title, item.url.as_str(), content) {
                Some(result) => output.add_result(result),
                None => debug!("firecrawl returned unusable url {:?}", item.url),
            }
        }

        Ok(output)
    }
}
