use anyhow::Context;
use arena_website::{Api, Config, Site};
use clap::Parser;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    config: PathBuf,

    /// Overrides the port from the config file.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Load config
    let mut config = Config::load(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    if let Some(port) = args.port {
        config.port = port;
    }
    let config = config.validate().context("invalid config")?;

    // Create logger
    let subscriber = tracing_subscriber::fmt().with_max_level(config.log_level);
    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let site = Site::from_config(&config).context("failed to build site")?;
    let app = Api::new(Arc::new(site))
        .with_rate_limit(config.rate_limit)
        .router()?;

    // Start server
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    info!("Listening on {}", config.addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("axum server error")?;

    Ok(())
}
