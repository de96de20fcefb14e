//! Provider registry and selection

use super::brave::Brave;
use super::duckduckgo::DuckDuckGo;
use super::exa::Exa;
use super::firecrawl::Firecrawl;
use super::searxng::Searxng;
use super::tavily::Tavily;
use super::traits::{ProviderKind, SearchProvider};
use crate::config::{Credentials, ProvidersSettings, Settings};
use crate::error::SearchError;
use crate::network::HttpClient;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Registry of every backend, built from resolved credentials
///
/// All kinds are registered regardless of credentials; an explicitly
/// requested backend without its credential fails when it is called.
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn SearchProvider>>,
    fallback: Arc<dyn SearchProvider>,
    credentials: Credentials,
    /// Credential-based choice, computed on first use
    default_kind: OnceCell<ProviderKind>,
}

impl ProviderRegistry {
    /// Create a registry over `credentials`, with backends at the configured URLs
    pub fn new(credentials: Credentials, urls: &ProvidersSettings, client: HttpClient) -> Self {
        let mut providers: HashMap<ProviderKind, Arc<dyn SearchProvider>> = HashMap::new();

        providers.insert(
            ProviderKind::Tavily,
            Arc::new(Tavily::new(
                client.clone(),
                &urls.tavily_url,
                credentials.tavily_api_key.clone(),
            )),
        );
        providers.insert(
            ProviderKind::Exa,
            Arc::new(Exa::new(
                client.clone(),
                &urls.exa_url,
                credentials.exa_api_key.clone(),
            )),
        );
        providers.insert(
            ProviderKind::Brave,
            Arc::new(Brave::new(
                client.clone(),
                &urls.brave_url,
                credentials.brave_api_key.clone(),
            )),
        );
        providers.insert(
            ProviderKind::Firecrawl,
            Arc::new(Firecrawl::new(
                client.clone(),
                &urls.firecrawl_url,
                credentials.firecrawl_api_key.clone(),
            )),
        );
        providers.insert(
            ProviderKind::Searxng,
            Arc::new(Searxng::new(
                client.clone(),
                credentials.searxng_api_url.clone(),
            )),
        );
        let fallback: Arc<dyn SearchProvider> =
            Arc::new(DuckDuckGo::with_url(client, &urls.duckduckgo_url));
        providers.insert(ProviderKind::DuckDuckGo, fallback.clone());

        Self {
            providers,
            fallback,
            credentials,
            default_kind: OnceCell::new(),
        }
    }

    /// Create a registry with a client built from `settings`
    pub fn from_settings(settings: &Settings, credentials: Credentials) -> Result<Self, SearchError> {
        let client = HttpClient::with_settings(&settings.outgoing, &settings.search)?;
        Ok(Self::new(credentials, &settings.providers, client))
    }

    /// Pick the provider answering a call
    ///
    /// Precedence: explicit kind, then the `SEARCH_API` override, then the
    /// first backend whose credential is present, then DuckDuckGo.
    pub fn select(&self, explicit: Option<ProviderKind>) -> Arc<dyn SearchProvider> {
        let kind = match explicit {
            Some(kind) => {
                debug!("Using explicitly requested provider: {}", kind);
                kind
            }
            None => self.override_kind().unwrap_or_else(|| self.default_kind()),
        };

        self.get(kind)
    }

    /// Provider for `kind`
    pub fn get(&self, kind: ProviderKind) -> Arc<dyn SearchProvider> {
        self.providers
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }

    /// Kind chosen from credential presence alone, memoized
    pub fn default_kind(&self) -> ProviderKind {
        *self.default_kind.get_or_init(|| {
            let kind = resolve_default(&self.credentials);
            debug!("Default provider resolved to {}", kind);
            kind
        })
    }

    /// Kind named by the override variable, if one is set
    fn override_kind(&self) -> Option<ProviderKind> {
        let name = self.credentials.search_api.as_deref()?;
        match name.parse::<ProviderKind>() {
            Ok(kind) => {
                debug!("Using provider from {}: {}", Credentials::SEARCH_API, kind);
                Some(kind)
            }
            Err(_) => {
                warn!(
                    "Unknown provider {:?} in {}, using duckduckgo",
                    name,
                    Credentials::SEARCH_API
                );
                Some(ProviderKind::DuckDuckGo)
            }
        }
    }

    /// Registered kinds, in precedence order
    pub fn kinds(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.providers.contains_key(kind))
            .collect()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// First credentialed backend in precedence order, else the fallback
fn resolve_default(credentials: &Credentials) -> ProviderKind {
    let candidates = [
        (ProviderKind::Tavily, &credentials.tavily_api_key),
        (ProviderKind::Exa, &credentials.exa_api_key),
        (ProviderKind::Brave, &credentials.brave_api_key),
        (ProviderKind::Firecrawl, &credentials.firecrawl_api_key),
        (ProviderKind::Searxng, &credentials.searxng_api_url),
    ];

    candidates
        .into_iter()
        .find(|(_, credential)| credential.is_some())
        .map(|(kind, _)| kind)
        .unwrap_or(ProviderKind::DuckDuckGo)
}
