use std::sync::Arc;

use loadsim_model::StatsSnapshot;

use crate::{registry::Registry, sampler::ResourceSampler, scheduler::Scheduler};

/// Composes resource utilization, registry state and current policy
/// into one snapshot.
///
/// Pure read path: sampling awaits only the calling request, and the
/// registry snapshot is a clone, so concurrent collects never block
/// each other or running tasks.
pub struct StatsAggregator {
    registry: Registry,
    scheduler: Arc<Scheduler>,
    sampler: Arc<dyn ResourceSampler>,
    core_count: usize,
}

impl StatsAggregator {
    pub fn new(
        registry: Registry,
        scheduler: Arc<Scheduler>,
        sampler: Arc<dyn ResourceSampler>,
        core_count: usize,
    ) -> Self {
        Self {
            registry,
            scheduler,
            sampler,
            core_count,
        }
    }

    /// Take one point-in-time snapshot.
    ///
    /// A sampler reporting zero cores yields `cpu_average = 0.0`; there
    /// is no division by zero.
    pub async fn collect(&self) -> StatsSnapshot {
        let sample = self.sampler.sample().await;
        let registry = self.registry.snapshot();

        let cpu_average = if sample.per_core_percent.is_empty() {
            0.0
        } else {
            sample.per_core_percent.iter().sum::<f64>() / sample.per_core_percent.len() as f64
        };

        StatsSnapshot {
            per_core_percent: sample.per_core_percent,
            cpu_average,
            memory_percent: sample.memory_percent,
            policy: self.scheduler.current(),
            active_tasks: registry.active,
            recent_history: registry.recent_history,
            core_count: self.core_count,
        }
    }
}
