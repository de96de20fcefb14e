//! Application state shared across handlers

use crate::config::{Credentials, Settings};
use crate::error::SearchError;
use crate::providers::ProviderRegistry;
use crate::search::Search;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Provider registry
    pub registry: Arc<ProviderRegistry>,
    /// Search executor
    pub search: Arc<Search>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, credentials: Credentials) -> Result<Self, SearchError> {
        let registry = ProviderRegistry::from_settings(&settings, credentials)?;
        Ok(Self::with_registry(settings, Arc::new(registry)))
    }

    /// Create state around an existing registry
    pub fn with_registry(settings: Settings, registry: Arc<ProviderRegistry>) -> Self {
        let search = Search::new(registry.clone())
            .with_max_results_limit(settings.search.max_results_limit);

        Self {
            settings: Arc::new(settings),
            registry,
            search: Arc::new(search),
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
