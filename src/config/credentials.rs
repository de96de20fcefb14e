//! Backend credentials resolved from the environment

/// Credentials and the override identifier, read once at startup
///
/// Empty or whitespace-only values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub tavily_api_key: Option<String>,
    pub exa_api_key: Option<String>,
    pub brave_api_key: Option<String>,
    pub firecrawl_api_key: Option<String>,
    /// Base URL of a SearXNG instance; its presence enables the adapter
    pub searxng_api_url: Option<String>,
    /// Backend forced through `SEARCH_API`
    pub search_api: Option<String>,
}

impl Credentials {
    pub const TAVILY_API_KEY: &'static str = "TAVILY_API_KEY";
    pub const EXA_API_KEY: &'static str = "EXA_API_KEY";
    pub const BRAVE_API_KEY: &'static str = "BRAVE_API_KEY";
    pub const FIRECRAWL_API_KEY: &'static str = "FIRECRAWL_API_KEY";
    pub const SEARXNG_API_URL: &'static str = "SEARXNG_API_URL";
    pub const SEARCH_API: &'static str = "SEARCH_API";

    /// Read credentials from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            tavily_api_key: read(Self::TAVILY_API_KEY),
            exa_api_key: read(Self::EXA_API_KEY),
            brave_api_key: read(Self::BRAVE_API_KEY),
            firecrawl_api_key: read(Self::FIRECRAWL_API_KEY),
            searxng_api_url: read(Self::SEARXNG_API_URL),
            search_api: read(Self::SEARCH_API),
        }
    }

    /// No credentials at all
    pub fn none() -> Self {
        Self::default()
    }
}
