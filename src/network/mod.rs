//! HTTP networking module
//!
//! Provides the HTTP client used by every search backend.

mod client;
mod user_agent;

pub use client::HttpClient;
pub use user_agent::{accept_html, accept_language, generate_user_agent};
