//! # illie
//!
//! Command-line entry point for the Illie agent service.
//!
//! ## Usage
//!
//! - `illie` / `illie serve` - Serve the agent over HTTP
//! - `illie prompt` - Show the instructions the agent would use right now
//! - `illie agent` - Print the current agent descriptor as JSON

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

mod commands;
mod config;
mod server;

use commands::{agent_command, prompt_command, serve_command};
use config::ServerConfigLoader;

/// illie - turns raw notes into LinkedIn posts
#[derive(Parser)]
#[command(name = "illie")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve the Illie agent with its operator-editable prompt")]
#[command(long_about = None)]
struct Cli {
    /// .env file to load (defaults to ./.env when present)
    #[arg(long, env = "ILLIE_ENV_FILE", global = true)]
    env_file: Option<PathBuf>,

    /// Configuration store connection string override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Model name override
    #[arg(long, global = true)]
    model: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the agent over HTTP (default)
    Serve {
        /// Bind host
        #[arg(long)]
        host: Option<String>,

        /// Bind port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show the resolved instructions and where they came from
    Prompt {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the agent descriptor as JSON
    Agent,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> ServerConfigLoader {
    let mut loader = ServerConfigLoader::new();

    if let Some(url) = &cli.database_url {
        loader = loader.with_database_url_override(url.clone());
    }

    if let Some(model) = &cli.model {
        loader = loader.with_model_override(model.clone());
    }

    if let Some(Commands::Serve { host, port }) = &cli.command {
        if let Some(host) = host {
            loader = loader.with_host_override(host.clone());
        }
        if let Some(port) = port {
            loader = loader.with_port_override(*port);
        }
    }

    loader
}

/// Load variables from `path`, or from `./.env` when it exists
fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load env file: {}", path.display()))?;
            Ok(Some(path.to_path_buf()))
        }
        None => match dotenvy::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(err) if err.not_found() => Ok(None),
            Err(err) => Err(err).context("Failed to load .env file"),
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_file = load_env_file(cli.env_file.as_deref())?;
    let config = build_config_loader(&cli).load()?;

    // Initialize tracing on stderr; RUST_LOG wins when set
    let filter = if cli.verbose || config.runtime_env.reload() {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    if let Some(path) = &env_file {
        debug!("Loaded environment from {}", path.display());
    }

    match cli.command {
        None | Some(Commands::Serve { .. }) => serve_command(config).await,
        Some(Commands::Prompt { json }) => prompt_command(config, json).await,
        Some(Commands::Agent) => agent_command(config).await,
    }
}
