//! Search error taxonomy
//!
//! Every failure a search call can surface to its caller. Markup drift in the
//! scraped fallback backend is not an error: the extraction engine degrades
//! to fewer (or zero) results instead.

use std::time::Duration;
use thiserror::Error;

/// Errors returned by providers and the search executor
#[derive(Debug, Error)]
pub enum SearchError {
    /// A backend was requested whose credential is not configured
    #[error("configuration error: {0}")]
    Config(String),

    /// The query could not be constructed (e.g. blank text)
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The backend rejected the configured credential
    #[error("{provider} rejected the configured credential (HTTP {status})")]
    Auth {
        /// Provider identifier
        provider: &'static str,
        /// HTTP status returned by the backend
        status: u16,
    },

    /// Transport failure or non-success HTTP status
    #[error("network error{}: {message}", .status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    Network {
        /// HTTP status, when the backend answered at all
        status: Option<u16>,
        /// Human readable cause
        message: String,
    },

    /// The call did not complete before its deadline
    #[error("search timed out after {0:?}")]
    Timeout(Duration),
}

impl SearchError {
    /// Network failure carrying an HTTP status
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Network {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Network failure without a response
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Network {
            status: None,
            message: message.into(),
        }
    }

    /// Whether the deadline expired
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Whether the backend answered 429
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// HTTP status attached to the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } => Some(*status),
            Self::Network { status, .. } => *status,
            _ => None,
        }
    }

    /// Short machine-readable kind, used by the HTTP surface
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::InvalidQuery(_) => "invalid_query",
            Self::Auth { .. } => "auth",
            Self::Network { .. } => "network",
            Self::Timeout(_) => "timeout",
        }
    }
}
