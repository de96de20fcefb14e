//! Exa search API

use super::traits::*;
use crate::error::SearchError;
use crate::network::HttpClient;
use crate::results::{ProviderResults, SearchResult};
use crate::search::{SearchDepth, SearchQuery};
use serde_json::json;
use tracing::debug;

/// Characters of page text requested per result
const SNIPPET_CHARACTERS: usize = 500;

mod api {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct ExaResponse {
        #[serde(default)]
        pub results: Vec<ExaResult>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ExaResult {
        pub title: Option<String>,
        #[serde(default)]
        pub url: String,
        pub text: Option<String>,
    }
}

/// Exa search client
#[derive(Debug, Clone)]
pub struct Exa {
    client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl Exa {
    pub fn new(client: HttpClient, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }
}

impl SearchProvider for Exa {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Exa
    }

    fn client(&self) -> &HttpClient {
        &self.client
    }

    fn request(&self, query: &SearchQuery) -> Result<ProviderRequest, SearchError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SearchError::Config("missing EXA_API_KEY".to_string()))?;

        let search_type = match query.search_depth() {
            SearchDepth::Basic => "auto",
            SearchDepth::Advanced => "neural",
        };

        let mut body = json!({
            "query": query.text(),
            "numResults": query.max_results(),
            "type": search_type,
            "contents": { "text": { "maxCharacters": SNIPPET_CHARACTERS } },
        });
        // Exa rejects empty domain arrays
        if !query.include_domains().is_empty() {
            body["includeDomains"] = json!(query.include_domains());
        }
        if !query.exclude_domains().is_empty() {
            body["excludeDomains"] = json!(query.exclude_domains());
        }

        Ok(
            ProviderRequest::post(format!("{}/search", self.base_url.trim_end_matches('/')))
                .header("x-api-key", key)
                .json(body),
        )
    }

    fn response(
        &self,
        _query: &SearchQuery,
        response: ProviderResponse,
    ) -> Result<ProviderResults, SearchError> {
        response.error_for_status(self.name())?;
        let body: api::ExaResponse = response.json()?;

        let mut output = ProviderResults::new();
        for item in body.results {
            let content = item
                .text
                .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            match SearchResult::new(item.title.unwrap_or_default(), item.url.as_str(), content) {
                Some(result) => output.add_result(result),
                None => debug!("exa returned unusable url {:?}", item.url),
            }
        }

        Ok(output)
    }
}
