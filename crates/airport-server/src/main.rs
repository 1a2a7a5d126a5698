//! Airport Server - Main entry point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;

use airport_common::logging::{init_logging, LogConfig};
use airport_server::{
    api,
    config::{Config, StorageBackend},
    db::{self, DbConfig, MemoryRepository, PgRepository, SharedRepository},
};

#[derive(Debug, Parser)]
#[command(name = "airport-server", version, about = "Airport booking REST server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override AIRPORT_STORAGE
    #[arg(long, value_enum, global = true)]
    storage: Option<StorageBackend>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::builder()
        .log_file_prefix("airport-server")
        .filter_directives("airport_server=debug,tower_http=debug,sqlx=warn")
        .build()
        .merge_env()?;
    let _guard = init_logging(&log_config)?;

    dotenvy::dotenv().ok();
    let mut config = Config::from_env()?;
    if let Some(storage) = cli.storage {
        config.storage = storage;
    }
    config.validate()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Migrate => migrate(&config).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    info!(
        host = %config.server.host,
        port = config.server.port,
        storage = %config.storage,
        "Starting Airport Server"
    );

    let repo: SharedRepository = match config.storage {
        StorageBackend::Postgres => {
            let pool = connect_and_migrate(&config).await?;
            Arc::new(PgRepository::new(pool))
        },
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on shutdown");
            Arc::new(MemoryRepository::new())
        },
    };

    api::serve(
        &config,
        repo,
        shutdown_signal(config.server.shutdown_timeout_secs),
    )
    .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn migrate(config: &Config) -> Result<()> {
    if config.storage == StorageBackend::Memory {
        info!("In-memory storage has no schema, nothing to migrate");
        return Ok(());
    }
    connect_and_migrate(config).await?;
    Ok(())
}

async fn connect_and_migrate(config: &Config) -> Result<sqlx::PgPool> {
    let pool = db::create_pool(&DbConfig::from(&config.database))
        .await
        .context("Failed to connect to the database")?;
    info!("Database connection pool established");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    info!("Database migrations completed");

    Ok(pool)
}

/// Resolves on Ctrl+C or SIGTERM, then waits briefly for in-flight requests
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }

    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
