//! SearXNG instance JSON API
//!
//! The "credential" for this backend is the instance URL itself.

use super::traits::*;
use crate::error::SearchError;
use crate::network::HttpClient;
use crate::results::{ProviderResults, SearchResult};
use crate::search::SearchQuery;
use tracing::debug;

mod api {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct SearxngResponse {
        #[serde(default)]
        pub results: Vec<SearxngResult>,
    }

    #[derive(Debug, Deserialize)]
    pub struct SearxngResult {
        #[serde(default)]
        pub title: String,
        #[serde(default)]
        pub url: String,
        pub content: Option<String>,
        pub img_src: Option<String>,
    }
}

/// SearXNG client
#[derive(Debug, Clone)]
pub struct Searxng {
    client: HttpClient,
    instance_url: Option<String>,
}

impl Searxng {
    pub fn new(client: HttpClient, instance_url: Option<String>) -> Self {
        Self {
            client,
            instance_url,
        }
    }
}

impl SearchProvider for Searxng {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Searxng
    }

    fn client(&self) -> &HttpClient {
        &self.client
    }

    fn request(&self, query: &SearchQuery) -> Result<ProviderRequest, SearchError> {
        let instance = self
            .instance_url
            .as_deref()
            .ok_or_else(|| SearchError::Config("missing SEARXNG_API_URL".to_string()))?;

        Ok(
            ProviderRequest::get(format!("{}/search", instance.trim_end_matches('/')))
                .param("q", query.text())
                .param("format", "json"),
        )
    }

    fn response(
        &self,
        _query: &SearchQuery,
        response: ProviderResponse,
    ) -> Result<ProviderResults, SearchError> {
        response.error_for_status(self.name())?;
        let body: api::SearxngResponse = response.json()?;

        let mut output = ProviderResults::new();
        for item in body.results {
            if let Some(img) = item.img_src.filter(|s| !s.is_empty()) {
                output.add_image(img);
            }
            let content = item.content.unwrap_or_default();
            match SearchResult::new(item.title, item.url.as_str(), content) {
                Some(result) => output.add_result(result),
                None => debug!("searxng returned unusable url {:?}", item.url),
            }
        }

        Ok(output)
    }
}
