//! search-bridge: normalized web search over interchangeable backends
//!
//! This is the main entry point for the application.

use anyhow::{Context, Result};
use clap::Parser;
use search_bridge::{
    config::{self, Credentials, SearchSettings},
    web::{create_router, AppState},
    ProviderKind, SearchOptions,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Normalized web search over interchangeable backends
///
/// Backend credentials come from TAVILY_API_KEY, EXA_API_KEY, BRAVE_API_KEY,
/// FIRECRAWL_API_KEY and SEARXNG_API_URL; SEARCH_API forces a backend.
#[derive(Debug, Parser)]
#[command(name = "search-bridge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run one search, print JSON and exit
    #[arg(short, long, value_name = "TEXT")]
    query: Option<String>,

    /// Maximum results for --query
    #[arg(short = 'n', long, value_name = "N", requires = "query")]
    max_results: Option<usize>,

    /// Force a backend for --query
    #[arg(short, long, value_name = "NAME", requires = "query", value_parser = ProviderKind::from_str)]
    provider: Option<ProviderKind>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = config::load_settings(cli.config.as_deref())?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.general.log_filter())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let credentials = Credentials::from_env();
    let state = AppState::new(settings.clone(), credentials)?;

    if let Some(text) = cli.query {
        let options = one_shot_options(cli.max_results, &settings.search);
        let results = state.search.search(&text, options, cli.provider).await?;
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    info!("Starting search-bridge v{}", search_bridge::VERSION);
    info!("Default provider: {}", state.registry.default_kind());

    let app = create_router(state);

    let addr = SocketAddr::new(
        settings
            .server
            .bind_address
            .parse()
            .with_context(|| format!("invalid bind address {}", settings.server.bind_address))?,
        settings.server.port,
    );

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Options for a `--query` run; the configured default applies without `-n`
fn one_shot_options(max_results: Option<usize>, search: &SearchSettings) -> SearchOptions {
    SearchOptions {
        max_results: max_results.or(Some(search.default_max_results)),
        ..Default::default()
    }
}
