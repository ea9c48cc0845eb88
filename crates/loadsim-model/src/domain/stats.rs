use serde::{Deserialize, Serialize};

use crate::{Policy, TaskRecord};

/// Point-in-time aggregation of resource utilization and task state.
///
/// Produced by the stats aggregator on every query; never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Utilization percentage per logical core, index = core.
    pub per_core_percent: Vec<f64>,
    /// Mean of `per_core_percent`, `0.0` when no cores were sampled.
    pub cpu_average: f64,
    /// Memory utilization percentage.
    pub memory_percent: f64,
    /// Policy in effect at snapshot time.
    pub policy: Policy,
    /// All currently running tasks, unspecified order.
    pub active_tasks: Vec<TaskRecord>,
    /// Most recently completed tasks, completion order, bounded window.
    pub recent_history: Vec<TaskRecord>,
    /// Number of logical cores the agent schedules over.
    pub core_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip_empty() {
        let snap = StatsSnapshot {
            per_core_percent: vec![12.5, 40.0],
            cpu_average: 26.25,
            memory_percent: 61.0,
            policy: Policy::RoundRobin,
            active_tasks: vec![],
            recent_history: vec![],
            core_count: 2,
        };

        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("perCorePercent"));
        assert!(json.contains(r#""policy":"round_robin""#));

        let back: StatsSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.core_count, 2);
        assert_eq!(back.cpu_average, 26.25);
    }
}
