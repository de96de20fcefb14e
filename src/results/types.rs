//! Result type definitions

use crate::search::SearchQuery;
use serde::Serialize;
use url::Url;

/// A single search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// The title of the result
    title: String,
    /// Absolute destination URL
    url: String,
    /// Content snippet/description
    content: String,
}

impl SearchResult {
    /// Create a new result
    ///
    /// Returns `None` unless `url` is an absolute URL with a host.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Option<Self> {
        let url = url.into();
        let parsed = Url::parse(&url).ok()?;
        parsed.host_str().filter(|h| !h.is_empty())?;

        Some(Self {
            title: title.into(),
            url,
            content: content.into(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the hostname from the URL
    pub fn hostname(&self) -> Option<String> {
        Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
    }
}

/// Raw output of a single provider, before the response invariants are applied
#[derive(Debug, Clone, Default)]
pub struct ProviderResults {
    /// Results in backend relevance order
    pub results: Vec<SearchResult>,
    /// Image URLs
    pub images: Vec<String>,
}

impl ProviderResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            ..Default::default()
        }
    }

    pub fn add_result(&mut self, result: SearchResult) {
        self.results.push(result);
    }

    pub fn add_image(&mut self, image: impl Into<String>) {
        self.images.push(image.into());
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.images.is_empty()
    }
}

/// Normalized response of one search call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    query: String,
    results: Vec<SearchResult>,
    images: Vec<String>,
    number_of_results: usize,
}

impl SearchResults {
    /// Build the response for `query`
    ///
    /// Drops results pointing back at `own_host` (the backend's request
    /// host), truncates to the requested maximum and echoes the caller's
    /// query text verbatim.
    pub fn new(query: &SearchQuery, output: ProviderResults, own_host: Option<&str>) -> Self {
        let mut results = output.results;
        if let Some(host) = own_host {
            let host = host.to_ascii_lowercase();
            results.retain(|r| r.hostname().as_deref() != Some(host.as_str()));
        }
        results.truncate(query.max_results());

        Self {
            query: query.text().to_string(),
            number_of_results: results.len(),
            results,
            images: output.images,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn number_of_results(&self) -> usize {
        self.number_of_results
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_results(self) -> Vec<SearchResult> {
        self.results
    }
}
