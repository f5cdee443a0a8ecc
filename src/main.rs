use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use linkpush::config::Config;
use linkpush::indexer::IndexingClient;
use linkpush::models::LinkStats;
use linkpush::orchestrator;
use linkpush::server::LinkServer;
use linkpush::store::{LinkStore, RedisStore};

#[derive(Parser)]
#[command(
    name = "linkpush",
    version,
    about = "Batch URL submission service for search-engine indexing APIs",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    /// Path to a TOML config file; environment variables are used when absent
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one submission cycle and exit
    Submit,

    /// Print link collection counts
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    setup_tracing(&cli.log_format, cli.verbose)?;

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    match cli.command {
        Commands::Serve { host, port } => {
            tracing::info!(host = ?host, port = ?port, "Starting serve command");
            serve(config, host, port).await?;
        }

        Commands::Submit => {
            tracing::info!("Starting submit command");
            submit(config).await?;
        }

        Commands::Status => {
            status(config).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("linkpush=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("linkpush=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

async fn serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        let port = port.unwrap_or_else(|| config.server.bind_address.port());
        config.server.bind_address = format!("{host}:{port}")
            .parse()
            .context("invalid bind address")?;
    } else if let Some(port) = port {
        config.server.bind_address.set_port(port);
    }

    let server = LinkServer::new(config).await?;

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Shutdown signal received");
    };

    server.start_with_shutdown(shutdown).await?;
    Ok(())
}

async fn submit(config: Config) -> Result<()> {
    config.validate()?;

    let store = RedisStore::connect(&config.store).await?;
    let indexer = IndexingClient::new(&config.indexing)?;

    let outcome = orchestrator::run(&store, &indexer, config.indexing.batch_size).await?;
    println!("{}", outcome.message);
    Ok(())
}

async fn status(config: Config) -> Result<()> {
    let store = RedisStore::connect(&config.store).await?;
    let records = store.load_all().await?;
    let stats = LinkStats::from_records(&records);

    println!("Link collection status");
    println!("  Total:     {}", stats.total);
    println!("  Submitted: {}", stats.submitted);
    println!("  Pending:   {}", stats.pending);
    Ok(())
}
