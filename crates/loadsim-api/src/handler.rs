use async_trait::async_trait;

use loadsim_model::{Policy, StatsSnapshot, TaskId, TaskKind};

use crate::error::ApiError;

/// Agent identity reported by the health endpoint.
#[derive(Debug, Clone)]
pub struct HealthInfo {
    pub agent_id: String,
    pub core_count: usize,
    pub hostname: String,
}

/// Result of a successful task launch.
#[derive(Debug, Clone)]
pub struct StartedTask {
    pub id: TaskId,
    pub kind: TaskKind,
    pub policy: Policy,
}

/// Agent API handler.
///
/// This trait abstracts the backend implementation; the provided
/// [`crate::AgentAdapter`] delegates straight to the core, and custom
/// handlers can wrap it with additional logic.
#[async_trait]
pub trait AgentHandler: Send + Sync + 'static {
    /// Agent identity and capacity.
    async fn health(&self) -> HealthInfo;

    /// Point-in-time utilization and task telemetry.
    async fn stats(&self) -> StatsSnapshot;

    /// Launch one simulated task under the current policy.
    async fn run_task(&self, kind: TaskKind, duration_secs: f64) -> Result<StartedTask, ApiError>;

    /// Switch the process-wide scheduling policy.
    async fn set_policy(&self, name: &str) -> Result<Policy, ApiError>;

    /// Drop all completed-task history.
    async fn clear_history(&self);
}
