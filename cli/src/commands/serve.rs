//! HTTP serve command

use crate::config::ServerConfig;
use crate::server::register_agent;
use anyhow::{Context, Result};
use illie_core::llm::create_client;
use tracing::{info, warn};

/// Serve the agent over HTTP until interrupted
pub async fn serve_command(config: ServerConfig) -> Result<()> {
    info!("🤖 Using model: {}", config.model);
    info!("⚙️  Runtime environment: {}", config.runtime_env.as_str());
    if config.runtime_env.reload() {
        info!("🔄 Reload requested; run under `cargo watch -x run` to restart on edits");
    }

    if config.database_url.is_none() {
        warn!("No DATABASE_URL or DB_URL set; the agent will use its built-in instructions");
    }

    let llm = config
        .llm
        .as_ref()
        .map(create_client)
        .transpose()
        .context("Failed to create language model client")?;
    if llm.is_none() {
        warn!("OPENAI_API_KEY not set; run requests will be rejected");
    }

    let app = register_agent(config.agent_factory(), llm);
    app.serve(&config.bind_addr()).await
}
