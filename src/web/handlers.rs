//! HTTP request handlers

use super::state::AppState;
use crate::error::SearchError;
use crate::providers::ProviderKind;
use crate::search::{SearchDepth, SearchOptions};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search query
    pub q: Option<String>,
    /// Maximum number of results
    pub max_results: Option<usize>,
    /// `basic` or `advanced`
    pub search_depth: Option<String>,
    /// Hostnames (comma-separated)
    pub include_domains: Option<String>,
    /// Hostnames (comma-separated)
    pub exclude_domains: Option<String>,
    /// Force a backend
    pub provider: Option<String>,
}

/// Search failure rendered as `{error, kind}`
#[derive(Debug)]
pub struct ApiError(pub SearchError);

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SearchError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            SearchError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SearchError::Auth { .. } | SearchError::Network { .. } => StatusCode::BAD_GATEWAY,
            SearchError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        };

        let body = Json(json!({
            "error": self.0.to_string(),
            "kind": self.0.kind(),
        }));
        (status, body).into_response()
    }
}

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let text = params
        .q
        .ok_or_else(|| SearchError::InvalidQuery("missing q parameter".to_string()))?;

    let kind = params
        .provider
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .map(str::parse::<ProviderKind>)
        .transpose()?;

    let search_depth = match params.search_depth.as_deref() {
        Some(depth) if !depth.trim().is_empty() => depth.parse::<SearchDepth>()?,
        _ => SearchDepth::default(),
    };

    let options = SearchOptions {
        max_results: Some(
            params
                .max_results
                .unwrap_or(state.settings.search.default_max_results),
        ),
        search_depth,
        include_domains: split_list(params.include_domains.as_deref()),
        exclude_domains: split_list(params.exclude_domains.as_deref()),
    };

    let results = state.search.search(&text, options, kind).await?;
    Ok(Json(results).into_response())
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
        "instance": state.instance_name(),
        "default_provider": state.registry.default_kind(),
    }))
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
