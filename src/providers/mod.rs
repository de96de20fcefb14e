//! Search backends
//!
//! Defines the `SearchProvider` trait, one implementation per backend and
//! the registry that picks which one answers a call.

mod extract;
mod registry;
mod traits;

// Provider implementations
pub mod brave;
pub mod duckduckgo;
pub mod exa;
pub mod firecrawl;
pub mod searxng;
pub mod tavily;

pub use extract::{extract, Extractor, DUCKDUCKGO_DOMAIN};
pub use registry::ProviderRegistry;
pub use traits::*;
