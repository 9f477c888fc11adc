// Standalone MCP server binary

use anyhow::{Context, Result};
use banksheets_mcp::config::{FileConfig, ServerConfig};
use banksheets_mcp::{Catalog, Dispatcher, McpServer};
use banksheets_sdk::BankSheetsClient;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "banksheets-mcp")]
#[command(about = "MCP server exposing the Bank Sheets API over stdio", long_about = None)]
#[command(version)]
struct Args {
    /// Bank Sheets API key
    #[arg(long, env = "MCP_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the Bank Sheets API
    #[arg(long, env = "MCP_BASE_URL")]
    base_url: Option<String>,

    /// Optional TOML file with api_key and base_url
    #[arg(short, long, env = "BANKSHEETS_MCP_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries protocol frames, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "banksheets=info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let file = args.config.as_deref().map(FileConfig::load).transpose()?;
    let config = ServerConfig::resolve(args.api_key, args.base_url, file)?;

    tracing::info!("Starting Bank Sheets MCP Server...");
    tracing::info!("API Key: {}", config.redacted_api_key());
    tracing::info!("Base URL: {}", config.base_url);

    let client = BankSheetsClient::builder()
        .api_key(&config.api_key)
        .base_url(&config.base_url)
        .build()
        .context("Failed to create Bank Sheets client")?;

    let catalog = Arc::new(Catalog::builtin());
    tracing::info!(
        "Registered {} tools and {} resources",
        catalog.tools().len(),
        catalog.resources().len()
    );

    let server = Arc::new(McpServer::new(Dispatcher::new(catalog, Arc::new(client))));

    // Not awaited: the process exits at stdin EOF even while the connection check is pending
    let checker = Arc::clone(&server);
    tokio::spawn(async move {
        if checker.test_connection().await {
            tracing::info!("Successfully connected to Bank Sheets API");
        } else {
            tracing::warn!("Could not connect to Bank Sheets API");
        }
    });

    tokio::select! {
        result = server.serve_stdio() => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down MCP Server...");
        }
    }

    Ok(())
}
