//! VedicAI Terminal Client
//!
//! Collects birth details, submits them to the remote analysis service,
//! and presents the computed kundli, doshas, dasha timeline, and
//! panchang in a tabbed terminal UI.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vedicai::app;
use vedicai::services::{HttpAnalysisClient, HttpPlaceResolver};

/// Configuration for the client, read from the environment.
struct ClientConfig {
    /// Base URL of the VedicAI API
    api_url: String,
    /// Directory for the rolling log file
    log_dir: String,
}

impl ClientConfig {
    fn from_env() -> Self {
        Self {
            api_url: std::env::var("VEDICAI_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            log_dir: std::env::var("VEDICAI_LOG_DIR").unwrap_or_else(|_| ".".to_string()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();
    let config = ClientConfig::from_env();

    // The TUI owns the terminal, so logs go to a file instead of stderr.
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "vedicai.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("vedicai=debug".parse()?))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    info!("starting VedicAI client against {}", config.api_url);

    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;
    let analysis = Arc::new(HttpAnalysisClient::new(http.clone(), config.api_url.clone()));
    let resolver = Arc::new(HttpPlaceResolver::new(http, config.api_url));

    app::run(analysis, resolver).await
}
