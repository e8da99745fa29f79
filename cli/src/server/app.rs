//! Hosting boundary: turns an agent factory into a running HTTP service

use anyhow::{Context, Result};
use axum::Router;
use illie_core::llm::LlmClient;
use illie_core::{AgentFactory, AgentRunner};
use std::sync::Arc;
use tracing::{error, info};

use super::routes;

/// Name the service reports on `/config`
pub const OS_NAME: &str = "Illie";

/// Shared, immutable state behind every route
#[derive(Clone)]
pub struct AppState {
    pub(crate) os_name: String,
    pub(crate) factory: Arc<AgentFactory>,
    pub(crate) runner: Option<Arc<AgentRunner>>,
}

/// An agent registered with the HTTP host, ready to serve
pub struct ServableApp {
    state: AppState,
}

/// Register the agent built by `factory`.
///
/// Without an LLM client the descriptor routes still work and run requests
/// answer 503.
pub fn register_agent(factory: AgentFactory, llm: Option<Arc<dyn LlmClient>>) -> ServableApp {
    ServableApp {
        state: AppState {
            os_name: OS_NAME.to_string(),
            factory: Arc::new(factory),
            runner: llm.map(|client| Arc::new(AgentRunner::new(client))),
        },
    }
}

impl ServableApp {
    pub fn router(&self) -> Router {
        routes::router(self.state.clone())
    }

    /// Bind `addr` and serve until Ctrl-C
    pub async fn serve(self, addr: &str) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        info!(
            addr = %listener.local_addr()?,
            agent = self.state.factory.agent_id(),
            runs_enabled = self.state.runner.is_some(),
            "Serving agent"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server terminated with an error")
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
