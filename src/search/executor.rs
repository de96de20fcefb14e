//! Search execution

use super::models::{SearchOptions, SearchQuery};
use crate::error::SearchError;
use crate::providers::{ProviderKind, ProviderRegistry};
use crate::results::SearchResults;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Search executor: selects one provider per call and runs the query on it
///
/// A failed provider fails the whole call; there is no retry and no
/// fallback to another backend after selection.
#[derive(Clone)]
pub struct Search {
    /// Provider registry
    registry: Arc<ProviderRegistry>,
    /// Upper bound applied to a query's max results
    max_results_limit: usize,
}

impl Search {
    /// Create a new search executor
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            max_results_limit: usize::MAX,
        }
    }

    /// Cap the number of results any query may ask for
    pub fn with_max_results_limit(mut self, limit: usize) -> Self {
        self.max_results_limit = limit.max(1);
        self
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    /// Execute a query on the selected provider
    pub async fn execute(
        &self,
        query: &SearchQuery,
        kind: Option<ProviderKind>,
    ) -> Result<SearchResults, SearchError> {
        let provider = self.registry.select(kind);
        let start = Instant::now();

        let capped;
        let query = if query.max_results() > self.max_results_limit {
            capped = query.clone().with_max_results(self.max_results_limit);
            &capped
        } else {
            query
        };

        info!(
            "Executing search '{}' on {} (max {})",
            query.text(),
            provider.name(),
            query.max_results()
        );

        match provider.search(query).await {
            Ok(results) => {
                debug!(
                    "Provider {} returned {} results in {:?}",
                    provider.name(),
                    results.number_of_results(),
                    start.elapsed()
                );
                Ok(results)
            }
            Err(e) => {
                warn!(
                    "Search on {} failed after {:?}: {}",
                    provider.name(),
                    start.elapsed(),
                    e
                );
                Err(e)
            }
        }
    }

    /// Inbound call contract: `search(text, options, kind)`
    pub async fn search(
        &self,
        text: &str,
        options: SearchOptions,
        kind: Option<ProviderKind>,
    ) -> Result<SearchResults, SearchError> {
        let query = options.into_query(text)?;
        self.execute(&query, kind).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Credentials, ProvidersSettings};
    use crate::network::HttpClient;

    fn search(credentials: Credentials) -> Search {
        let registry = ProviderRegistry::new(
            credentials,
            &ProvidersSettings::default(),
            HttpClient::new().unwrap(),
        );
        Search::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_blank_text_rejected_before_any_request() {
        let err = search(Credentials::none())
            .search("  ", SearchOptions::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_explicit_provider_without_credential() {
        let err = search(Credentials::none())
            .search("rust", SearchOptions::default(), Some(ProviderKind::Tavily))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }
}
