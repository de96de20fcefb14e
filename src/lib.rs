//! search-bridge: one search call, many interchangeable backends
//!
//! A query goes to exactly one provider: an explicitly requested one, the
//! one named by `SEARCH_API`, the first credentialed API, or the DuckDuckGo
//! HTML fallback. Every backend answers with the same normalized
//! [`SearchResults`].

pub mod config;
pub mod error;
pub mod network;
pub mod providers;
pub mod results;
pub mod search;
pub mod web;

pub use config::{Credentials, Settings};
pub use error::SearchError;
pub use providers::{ProviderKind, ProviderRegistry, SearchProvider};
pub use results::{SearchResult, SearchResults};
pub use search::{Search, SearchDepth, SearchOptions, SearchQuery};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Results returned when the caller does not ask for a count
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Default per-call deadline in seconds
pub const DEFAULT_TIMEOUT: f64 = 15.0;
