use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use loadsim_model::{Policy, StatsSnapshot, TaskId, TaskKind};

use crate::{error::ApiError, handler::AgentHandler};

/// Duration used when a run_task request omits one, in seconds.
const DEFAULT_TASK_SECS: f64 = 5.0;

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
}

impl<H> HttpApi<H>
where
    H: AgentHandler,
{
    /// Create new HTTP API with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - GET  /health        - Agent identity and capacity
    /// - GET  /stats         - Utilization and task telemetry
    /// - POST /run_task      - Launch a simulated task
    /// - POST /set_algorithm - Switch the scheduling policy
    /// - POST /clear_history - Drop completed-task history
    pub fn router(self) -> Router {
        Router::new()
            .route("/health", get(health::<H>))
            .route("/stats", get(stats::<H>))
            .route("/run_task", post(run_task::<H>))
            .route("/set_algorithm", post(set_algorithm::<H>))
            .route("/clear_history", post(clear_history::<H>))
            .with_state(self.handler)
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    agent_id: String,
    core_count: usize,
    hostname: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct RunTaskRequest {
    /// Task kind; unknown or missing values default to cpu_bound.
    #[serde(rename = "type", default)]
    kind: Option<String>,
    /// Requested duration in seconds, clamped to the allowed range.
    #[serde(default)]
    duration: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunTaskResponse {
    task_id: TaskId,
    status: &'static str,
    #[serde(rename = "type")]
    kind: TaskKind,
    policy: Policy,
}

#[derive(Debug, Serialize, Deserialize)]
struct SetAlgorithmRequest {
    algorithm: String,
}

#[derive(Debug, Serialize)]
struct SetAlgorithmResponse {
    algorithm: Policy,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
async fn health<H>(State(handler): State<Arc<H>>) -> Json<HealthResponse>
where
    H: AgentHandler,
{
    let info = handler.health().await;

    Json(HealthResponse {
        status: "healthy",
        agent_id: info.agent_id,
        core_count: info.core_count,
        hostname: info.hostname,
    })
}

/// GET /stats
async fn stats<H>(State(handler): State<Arc<H>>) -> Json<StatsSnapshot>
where
    H: AgentHandler,
{
    Json(handler.stats().await)
}

/// POST /run_task
async fn run_task<H>(
    State(handler): State<Arc<H>>,
    Json(req): Json<RunTaskRequest>,
) -> Result<Json<RunTaskResponse>, ApiError>
where
    H: AgentHandler,
{
    let kind = TaskKind::from_request(req.kind.as_deref());
    let duration = req.duration.unwrap_or(DEFAULT_TASK_SECS);

    let started = handler.run_task(kind, duration).await?;

    Ok(Json(RunTaskResponse {
        task_id: started.id,
        status: "started",
        kind: started.kind,
        policy: started.policy,
    }))
}

/// POST /set_algorithm
async fn set_algorithm<H>(
    State(handler): State<Arc<H>>,
    Json(req): Json<SetAlgorithmRequest>,
) -> Result<Json<SetAlgorithmResponse>, ApiError>
where
    H: AgentHandler,
{
    let policy = handler.set_policy(&req.algorithm).await?;

    Ok(Json(SetAlgorithmResponse {
        algorithm: policy,
        status: "updated",
    }))
}

/// POST /clear_history
async fn clear_history<H>(State(handler): State<Arc<H>>) -> Json<StatusResponse>
where
    H: AgentHandler,
{
    handler.clear_history().await;

    Json(StatusResponse {
        status: "history cleared",
    })
}
