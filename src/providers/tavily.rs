//! Tavily search API

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
    pub struct TavilyResponse {
        #[serde(default)]
        pub results: Vec<TavilyResult>,
        #[serde(default)]
        pub images: Vec<TavilyImage>,
    }

    #[derive(Debug, Deserialize)]
    pub struct TavilyResult {
        #[serde(default)]
        pub title: String,
        #[serde(default)]
        pub url: String,
        #[serde(default)]
        pub content: String,
    }

    /// Plain URL, or an object when image descriptions are requested
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum TavilyImage {
        Url(String),
        Described { url: String },
    }
}

/// Tavily search client
#[derive(Debug, Clone)]
pub struct Tavily {
    client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl Tavily {
    pub fn new(client: HttpClient, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }
}

impl SearchProvider for Tavily {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Tavily
    }

    fn client(&self) -> &HttpClient {
        &self.client
    }

    fn request(&self, query: &SearchQuery) -> Result<ProviderRequest, SearchError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SearchError::Config("missing TAVILY_API_KEY".to_string()))?;

        let body = json!({
            "query": query.text(),
            "max_results": query.max_results(),
            "search_depth": query.search_depth().as_str(),
            "include_domains": query.include_domains(),
            "exclude_domains": query.exclude_domains(),
            "include_images": true,
        });

        Ok(
            ProviderRequest::post(format!("{}/search", self.base_url.trim_end_matches('/')))
                .header("Authorization", format!("Bearer {}", key))
                .json(body),
        )
    }

    fn response(
        &self,
        _query: &SearchQuery,
        response: ProviderResponse,
    ) -> Result<ProviderResults, SearchError> {
        response.error_for_status(self.name())?;
        let body: api::TavilyResponse = response.json()?;

        let mut output = ProviderResults::new();
        for item in body.results {
            match SearchResult::new(item.title, item.url.as_str(), item.content) {
                Some(result) => output.add_result(result),
                None => debug!("tavily returned unusable url {:?}", item.url),
            }
        }
        for image in body.images {
            match image {
                api::TavilyImage::Url(url) | api::TavilyImage::Described { url } => {
                    output.add_image(url)
                }
            }
        }

        Ok(output)
    }
}
