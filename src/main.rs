// ABOUTME: Entry point for sidechat — a terminal chat widget for a remote
// ABOUTME: assistant endpoint. Parses CLI args, resolves config, runs the app.

use std::path::PathBuf;

use clap::Parser;

use sidechat::app::App;
use sidechat::client::ChatClient;
use sidechat::config::Config;

#[derive(Parser)]
#[command(name = "sidechat", about = "Terminal chat widget for a remote assistant endpoint")]
struct Cli {
    /// Path to a config file (default: ~/.sidechat/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Chat API base URL (overrides config file and environment)
    #[arg(long)]
    endpoint: Option<String>,

    /// Static API key sent as the x-api-key header
    #[arg(long)]
    api_key: Option<String>,

    /// Probe the endpoint's health and exit instead of starting the TUI
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load local .env if present, then the config file, then overrides.
    let _ = dotenvy::dotenv();
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env();
    if let Some(endpoint) = cli.endpoint {
        config.endpoint.base_url = endpoint;
    }
    if let Some(api_key) = cli.api_key {
        config.endpoint.api_key = Some(api_key);
    }

    if cli.check {
        return check_endpoint(&config).await;
    }

    App::new(config).run().await
}

/// Probe `GET {base}/health` and report the outcome on stdout/stderr.
async fn check_endpoint(config: &Config) -> anyhow::Result<()> {
    if !config.endpoint.is_configured() {
        anyhow::bail!("chat API endpoint is not configured");
    }
    let client = ChatClient::new(&config.endpoint)?;
    match client.health().await {
        Ok(()) => {
            println!("{}: ok", config.endpoint.display_label());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "{}: {}",
            config.endpoint.display_label(),
            e
        )),
    }
}
