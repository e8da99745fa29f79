//! Agent descriptor command

use crate::config::ServerConfig;
use anyhow::Result;

/// Print a freshly built agent descriptor as JSON
pub async fn agent_command(config: ServerConfig) -> Result<()> {
    let descriptor = config.agent_factory().build_agent().await;
    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    Ok(())
}
