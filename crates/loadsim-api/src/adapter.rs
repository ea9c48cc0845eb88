use std::sync::Arc;

use async_trait::async_trait;

use loadsim_core::{
    Registry, ResourceSampler, Scheduler, StatsAggregator, TaskRunner, system,
};
use loadsim_model::{Policy, StatsSnapshot, TaskKind};

use crate::error::ApiError;
use crate::handler::{AgentHandler, HealthInfo, StartedTask};

/// Ready-to-use [`AgentHandler`] that delegates to the core engine.
pub struct AgentAdapter {
    registry: Registry,
    scheduler: Arc<Scheduler>,
    runner: TaskRunner,
    stats: StatsAggregator,
    core_count: usize,
}

impl AgentAdapter {
    /// Wire an adapter over a fresh registry and scheduler, placing
    /// over `core_count` slots and sampling through `sampler`.
    pub fn new(sampler: Arc<dyn ResourceSampler>, core_count: usize) -> Self {
        let registry = Registry::new();
        let scheduler = Arc::new(Scheduler::new());
        let runner = TaskRunner::new(registry.clone(), Arc::clone(&scheduler), core_count);
        let stats = StatsAggregator::new(
            registry.clone(),
            Arc::clone(&scheduler),
            sampler,
            core_count,
        );

        Self {
            registry,
            scheduler,
            runner,
            stats,
            core_count,
        }
    }
}

#[async_trait]
impl AgentHandler for AgentAdapter {
    async fn health(&self) -> HealthInfo {
        HealthInfo {
            agent_id: system::agent_id().to_string(),
            core_count: self.core_count,
            hostname: system::host_name(),
        }
    }

    async fn stats(&self) -> StatsSnapshot {
        self.stats.collect().await
    }

    async fn run_task(&self, kind: TaskKind, duration_secs: f64) -> Result<StartedTask, ApiError> {
        let record = self.runner.start(kind, duration_secs)?;
        Ok(StartedTask {
            id: record.id,
            kind: record.kind,
            policy: self.scheduler.current(),
        })
    }

    async fn set_policy(&self, name: &str) -> Result<Policy, ApiError> {
        Ok(self.scheduler.set_policy(name)?)
    }

    async fn clear_history(&self) {
        self.registry.clear_history();
    }
}
