//! Tenantry CLI - standalone REST server for buildings and interests

use clap::Parser;
use std::path::PathBuf;
use tenantry::config::expand_path;
use tenantry::{Config, Core};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "tenantry")]
#[command(author = "Tenantry Team")]
#[command(version)]
#[command(about = "Tenantry - REST service for buildings and interests", long_about = None)]
struct Args {
    /// Path to configuration file (defaults to ~/.tenantry/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override server host
    #[arg(long)]
    host: Option<String>,

    /// Override SQLite database path
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initialize a new config file with defaults
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config_path = args
        .config
        .as_deref()
        .map(expand_path)
        .unwrap_or_else(Config::default_path);

    // Load configuration before logging so [logging] can shape the subscriber
    let config_result = if config_path.exists() {
        Config::from_file(&config_path).map(Some)
    } else {
        Ok(None)
    };

    let logging = match &config_result {
        Ok(Some(config)) => config.logging.clone(),
        _ => Default::default(),
    };
    let log_level = if args.verbose {
        "debug".to_string()
    } else {
        logging.level.clone()
    };

    let file_layer = logging.dir.as_ref().map(|dir| {
        let appender = tracing_appender::rolling::daily(expand_path(dir), "tenantry.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
            guard,
        )
    });
    let (file_layer, _log_guard) = match file_layer {
        Some((layer, guard)) => (Some(layer), Some(guard)),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tenantry={},tower_http=debug", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    // Handle --init flag
    if args.init {
        if config_path.exists() {
            tracing::warn!("Config file already exists: {}", config_path.display());
            return Ok(());
        }
        Config::create_default(&config_path)?;
        tracing::info!("Created default config at: {}", config_path.display());
        return Ok(());
    }

    let mut config = match config_result? {
        Some(config) => config,
        None => {
            tracing::warn!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            Config::default()
        }
    };

    // Apply CLI overrides
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(database) = args.database {
        config.database.path = Some(database);
    }

    let core = Core::new(config)?;

    // Start API server (blocks until shutdown)
    core.start_api_server().await?;

    Ok(())
}
