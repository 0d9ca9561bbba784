//! Hearthbase server entry point.
//!
//! Wires configuration, logging and the application together, then runs
//! bootstrap → serve → terminate.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use hearthbase_app::{App, MemoryStore, builtin};
use hearthbase_core::config::AppConfig;
use hearthbase_core::error::AppError;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config, &cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = execute(cli.command, config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn execute(command: Commands, mut config: AppConfig) -> Result<(), AppError> {
    match command {
        Commands::Serve { data_dir, dev } => {
            if let Some(data_dir) = data_dir {
                config.app.data_dir = data_dir;
            }
            config.app.is_dev |= dev;
            run(config).await
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Hearthbase v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(MemoryStore::new());
    let app = App::new(config, store.clone());

    builtin::install_audit_log(app.hooks());
    builtin::install_collection_guard(app.hooks(), store);
    tracing::info!(
        handlers = app.hooks().handler_count(),
        "Built-in hook handlers installed"
    );

    app.bootstrap().await?;

    app.serve(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
        }
        tracing::info!("Shutdown signal received");
    })
    .await?;

    app.terminate(false).await?;
    tracing::info!("Hearthbase stopped");
    Ok(())
}
