//! DuckDuckGo fallback provider
//!
//! Scrapes the no-JavaScript HTML endpoint. Needs no credential, so it is
//! what answers when nothing else is configured.

use super::extract::Extractor;
use super::traits::*;
use crate::error::SearchError;
use crate::network::HttpClient;
use crate::results::ProviderResults;
use crate::search::SearchQuery;

/// Default HTML endpoint
pub const DUCKDUCKGO_HTML_URL: &str = "https://html.duckduckgo.com/html/";

/// DuckDuckGo HTML search
#[derive(Debug, Clone)]
pub struct DuckDuckGo {
    client: HttpClient,
    html_url: String,
    extractor: Extractor,
}

impl DuckDuckGo {
    pub fn new(client: HttpClient) -> Self {
        Self::with_url(client, DUCKDUCKGO_HTML_URL)
    }

    pub fn with_url(client: HttpClient, html_url: impl Into<String>) -> Self {
        Self {
            client,
            html_url: html_url.into(),
            extractor: Extractor::default(),
        }
    }

    /// Search URL with the query percent-encoded into `q`
    fn search_url(&self, text: &str) -> String {
        let separator = if self.html_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}q={}",
            self.html_url,
            separator,
            urlencoding::encode(text)
        )
    }
}

impl SearchProvider for DuckDuckGo {
    fn kind(&self) -> ProviderKind {
        ProviderKind::DuckDuckGo
    }

    fn client(&self) -> &HttpClient {
        &self.client
    }

    fn request(&self, query: &SearchQuery) -> Result<ProviderRequest, SearchError> {
        Ok(ProviderRequest::get(self.search_url(query.text())).browser())
    }

    fn response(
        &self,
        query: &SearchQuery,
        response: ProviderResponse,
    ) -> Result<ProviderResults, SearchError> {
        if !response.is_success() {
            return Err(SearchError::http(
                response.status,
                format!("DuckDuckGo search error: {}", response.status),
            ));
        }

        let results = self.extractor.extract(&response.text, query.max_results());
        Ok(ProviderResults::with_results(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn provider() -> DuckDuckGo {
        DuckDuckGo::new(HttpClient::new().unwrap())
    }

    fn html_response(status: u16, text: &str) -> ProviderResponse {
        ProviderResponse {
            status,
            headers: HashMap::new(),
            text: text.to_string(),
            url: DUCKDUCKGO_HTML_URL.to_string(),
        }
    }

    #[tokio::test]
    async fn test_duckduckgo_request() {
        let query = SearchQuery::new("rust ownership & borrowing").unwrap();
        let request = provider().request(&query).unwrap();

        assert_eq!(
            request.url,
            "https://html.duckduckgo.com/html/?q=rust%20ownership%20%26%20borrowing"
        );
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.browser);
        assert!(request.data.is_none());
    }

    #[tokio::test]
    async fn test_url_with_existing_params() {
        let ddg = DuckDuckGo::with_url(HttpClient::new().unwrap(), "http://127.0.0.1:8080/html/?kl=us-en");
        let query = SearchQuery::new("rust").unwrap();
        assert_eq!(
            ddg.request(&query).unwrap().url,
            "http://127.0.0.1:8080/html/?kl=us-en&q=rust"
        );
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let query = SearchQuery::new("rust").unwrap();
        let err = provider()
            .response(&query, html_response(403, "<html>blocked</html>"))
            .unwrap_err();

        assert!(matches!(err, SearchError::Network { status: Some(403), .. }));
    }

    #[tokio::test]
    async fn test_response_never_has_images() {
        let query = SearchQuery::new("rust").unwrap().with_max_results(2);
        let html = include_str!("../../tests/fixtures/duckduckgo/page.html");
        let output = provider().response(&query, html_response(200, html)).unwrap();

        assert_eq!(output.results.len(), 2);
        assert!(output.images.is_empty());
    }

    #[tokio::test]
    async fn test_garbage_body_is_empty_success() {
        let query = SearchQuery::new("rust").unwrap();
        let output = provider()
            .response(&query, html_response(200, "\u{0}\u{1}<<<>>>"))
            .unwrap();
        assert!(output.is_empty());
    }
}
