use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use headlines::app::{build_http_client, App};
use headlines::categories::resolve_initial;
use headlines::config::{Config, API_KEY_ENV};
use headlines::news::NewsClient;
use headlines::view::CardOptions;

/// Get the config directory path (~/.config/headlines/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("headlines"))
}

#[derive(Parser, Debug)]
#[command(name = "headlines", about = "Terminal news reader for the GNews search API")]
struct Args {
    /// Category to open at startup (e.g. india, world, sports)
    #[arg(long, value_name = "ID")]
    category: Option<String>,

    /// Path to an alternate config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Articles requested per load (1-100)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..=100))]
    page_size: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from '{}'", config_path.display()))?;
    tracing::debug!(config = ?config, "Configuration resolved");

    let Some(api_key) = config.resolve_api_key() else {
        eprintln!("No GNews API key configured.");
        eprintln!();
        eprintln!("Set the {} environment variable, or add", API_KEY_ENV);
        eprintln!("  api_key = \"...\"");
        eprintln!("to {}", config_path.display());
        eprintln!();
        eprintln!("Keys are available from https://gnews.io");
        std::process::exit(1);
    };

    let page_size = args
        .page_size
        .map(usize::from)
        .unwrap_or(config.page_size);
    let initial = resolve_initial(
        &config.categories,
        Some(args.category.as_deref().unwrap_or(&config.default_category)),
    );

    let http = build_http_client(Duration::from_secs(config.request_timeout_secs))
        .context("Failed to build HTTP client")?;
    let client = NewsClient::new(http, &config.base_url, api_key, &config.language)
        .with_context(|| format!("Invalid base_url '{}'", config.base_url))?;

    let card_options = CardOptions {
        excerpt_length: config.excerpt_length,
    };
    let mut app = App::new(
        Arc::new(client),
        config.categories,
        initial,
        page_size,
        card_options,
    );

    let (event_tx, event_rx) = mpsc::channel(32);

    tracing::info!(
        category = %app.active_category().id,
        page_size,
        "Starting headlines"
    );

    headlines::ui::run(&mut app, event_tx, event_rx).await
}
