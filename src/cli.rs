//! Command line definitions.

use clap::{Parser, Subcommand};

/// Hearthbase server: embeddable backend with hookable lifecycle events
#[derive(Debug, Parser)]
#[command(name = "hearthbase-server", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file, without extension
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded from `config/<env>`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Bootstrap and serve until Ctrl+C
    Serve {
        /// Override the data directory
        #[arg(long)]
        data_dir: Option<String>,

        /// Run in development mode
        #[arg(long)]
        dev: bool,
    },
    /// Print the resolved configuration as JSON
    Config,
}
