//! HTTP routes for the registered agent

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use illie_core::{AgentDescriptor, RunOutput};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use super::app::AppState;

/// Health endpoint path.
pub const HEALTH_PATH: &str = "/health";
/// Service configuration endpoint path.
pub const CONFIG_PATH: &str = "/config";
/// Agent list endpoint path.
pub const AGENTS_PATH: &str = "/agents";
/// Agent detail endpoint path.
pub const AGENT_PATH: &str = "/agents/:agent_id";
/// Agent run endpoint path.
pub const AGENT_RUNS_PATH: &str = "/agents/:agent_id/runs";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(CONFIG_PATH, get(os_config))
        .route(AGENTS_PATH, get(list_agents))
        .route(AGENT_PATH, get(get_agent))
        .route(AGENT_RUNS_PATH, post(create_run))
        .with_state(state)
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("agent not found: {0}")]
    AgentNotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("no language model configured")]
    ModelUnavailable,

    #[error("model request failed: {0}")]
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = match &self {
            ApiError::AgentNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        let body = Json(json!({ "error": self.to_string() }));
        (code, body).into_response()
    }
}

#[derive(Debug, Serialize)]
struct AgentSummary {
    id: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct OsConfig {
    os_name: String,
    agents: Vec<AgentSummary>,
}

#[derive(Debug, Deserialize)]
struct RunRequest {
    message: String,
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn os_config(State(st): State<AppState>) -> Json<OsConfig> {
    Json(OsConfig {
        os_name: st.os_name.clone(),
        agents: vec![AgentSummary {
            id: st.factory.agent_id().to_string(),
            name: st.factory.agent_name().to_string(),
        }],
    })
}

async fn list_agents(State(st): State<AppState>) -> Json<Vec<AgentDescriptor>> {
    Json(vec![st.factory.build_agent().await])
}

async fn get_agent(
    State(st): State<AppState>,
    Path(agent_id): Path<String>,
) -> Result<Json<AgentDescriptor>, ApiError> {
    ensure_known(&st, &agent_id)?;
    Ok(Json(st.factory.build_agent().await))
}

async fn create_run(
    State(st): State<AppState>,
    Path(agent_id): Path<String>,
    request: Result<Json<RunRequest>, JsonRejection>,
) -> Result<Json<RunOutput>, ApiError> {
    ensure_known(&st, &agent_id)?;
    let Json(request) =
        request.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }
    let Some(runner) = st.runner.as_ref() else {
        return Err(ApiError::ModelUnavailable);
    };

    let descriptor = st.factory.build_agent().await;
    let output = runner
        .run(&descriptor, &request.message)
        .await
        .map_err(|e| {
            error!(agent = %agent_id, error = %e, "Agent run failed");
            ApiError::Upstream(e.to_string())
        })?;
    info!(
        agent = %agent_id,
        run_id = %output.run_id,
        draft = output.draft.is_some(),
        "Agent run completed"
    );
    Ok(Json(output))
}

fn ensure_known(st: &AppState, agent_id: &str) -> Result<(), ApiError> {
    if agent_id == st.factory.agent_id() {
        Ok(())
    } else {
        Err(ApiError::AgentNotFound(agent_id.to_string()))
    }
}
