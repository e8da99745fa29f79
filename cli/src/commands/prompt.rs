//! Prompt inspection command

use crate::config::ServerConfig;
use anyhow::Result;
use illie_core::prompt::PromptSource;

/// Print the instructions the agent would get right now
pub async fn prompt_command(config: ServerConfig, json: bool) -> Result<()> {
    let resolved = config.agent_factory().resolver().resolve().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    match resolved.source {
        PromptSource::Stored => eprintln!("📄 Source: configuration store"),
        PromptSource::Default(reason) => {
            eprintln!("📄 Source: built-in instructions ({:?})", reason)
        }
    }
    println!("{}", resolved.instructions);
    Ok(())
}
