//! Search query and related data models

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Requested search depth; only some backends distinguish the two
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    #[default]
    Basic,
    Advanced,
}

impl SearchDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SearchDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchDepth {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "advanced" => Ok(Self::Advanced),
            other => Err(SearchError::InvalidQuery(format!(
                "unknown search depth: {}",
                other
            ))),
        }
    }
}

/// Complete search query with all parameters
///
/// Fields are read-only once constructed; the `with_*` methods consume the
/// query and return a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    text: String,
    max_results: usize,
    search_depth: SearchDepth,
    include_domains: BTreeSet<String>,
    exclude_domains: BTreeSet<String>,
}

impl SearchQuery {
    /// Create a query with default options
    pub fn new(text: impl Into<String>) -> Result<Self, SearchError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SearchError::InvalidQuery("query text is empty".to_string()));
        }

        Ok(Self {
            text,
            max_results: crate::DEFAULT_MAX_RESULTS,
            search_depth: SearchDepth::default(),
            include_domains: BTreeSet::new(),
            exclude_domains: BTreeSet::new(),
        })
    }

    /// Set the maximum number of results (at least 1)
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    /// Set search depth
    pub fn with_search_depth(mut self, depth: SearchDepth) -> Self {
        self.search_depth = depth;
        self
    }

    /// Restrict results to these hostnames (advisory)
    pub fn with_include_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_domains = normalize_domains(domains);
        self
    }

    /// Exclude these hostnames (advisory)
    pub fn with_exclude_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_domains = normalize_domains(domains);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn search_depth(&self) -> SearchDepth {
        self.search_depth
    }

    pub fn include_domains(&self) -> &BTreeSet<String> {
        &self.include_domains
    }

    pub fn exclude_domains(&self) -> &BTreeSet<String> {
        &self.exclude_domains
    }
}

/// Per-call options of the inbound `search(text, options, kind)` contract
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub max_results: Option<usize>,
    pub search_depth: SearchDepth,
    pub include_domains: Vec<String>,
    pub exclude_domains: Vec<String>,
}

impl SearchOptions {
    /// Build a query for `text` with these options
    pub fn into_query(self, text: impl Into<String>) -> Result<SearchQuery, SearchError> {
        let mut query = SearchQuery::new(text)?
            .with_search_depth(self.search_depth)
            .with_include_domains(self.include_domains)
            .with_exclude_domains(self.exclude_domains);
        if let Some(max) = self.max_results {
            query = query.with_max_results(max);
        }
        Ok(query)
    }
}

fn normalize_domains<I, S>(domains: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    domains
        .into_iter()
        .map(|d| d.into().trim().to_ascii_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}
