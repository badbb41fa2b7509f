use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devtrack_client::{ApiClient, ClientConfig};

mod args;
mod commands;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devtrack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // --- Configuration ---
    let config = ClientConfig::from_env().context("invalid client configuration")?;
    tracing::info!(
        api_url = %config.api_url,
        timeout_secs = config.timeout.as_secs(),
        assign_route = %config.assign_route,
        "Loaded client configuration"
    );

    let client = Arc::new(ApiClient::new(&config).context("failed to build HTTP client")?);

    commands::run(cli.command, client).await
}
