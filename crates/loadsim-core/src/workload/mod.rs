use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use loadsim_model::TaskKind;

/// Inner busy-loop iterations between voluntary yields of the CPU
/// workload.
const YIELD_EVERY: u64 = 1_000_000;

/// One simulated workload body.
///
/// Implementations must run for approximately the requested duration
/// and then return; there is no cancellation. CPU-style workloads must
/// yield to the runtime at least once per [`YIELD_EVERY`] inner
/// iterations so concurrent work can interleave.
#[async_trait]
pub trait Workload: Send + Sync {
    /// Short identifier for logging.
    fn name(&self) -> &'static str;

    /// Whether this workload implements the given task kind.
    fn supports(&self, kind: TaskKind) -> bool;

    /// Run the simulation for `requested` wall time.
    async fn run(&self, requested: Duration);
}

/// Busy computation occupying a compute resource until the deadline.
pub struct CpuWorkload;

#[async_trait]
impl Workload for CpuWorkload {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn supports(&self, kind: TaskKind) -> bool {
        matches!(kind, TaskKind::CpuBound)
    }

    async fn run(&self, requested: Duration) {
        let deadline = Instant::now() + requested;
        let mut acc: f64 = 0.0;

        while Instant::now() < deadline {
            for i in 0..YIELD_EVERY {
                acc += i as f64;
                acc *= 1.000_000_1;
            }
            // Keeps the arithmetic observable so the loop is not elided.
            std::hint::black_box(acc);
            tokio::task::yield_now().await;
        }
    }
}

/// Pure wait: suspends without consuming compute.
pub struct WaitWorkload;

#[async_trait]
impl Workload for WaitWorkload {
    fn name(&self) -> &'static str {
        "wait"
    }

    fn supports(&self, kind: TaskKind) -> bool {
        matches!(kind, TaskKind::WaitBound)
    }

    async fn run(&self, requested: Duration) {
        tokio::time::sleep(requested).await;
    }
}

/// Registered workloads, picked per task kind at launch.
#[derive(Default, Clone)]
pub struct WorkloadSet {
    workloads: Vec<Arc<dyn Workload>>,
}

impl WorkloadSet {
    pub fn new() -> Self {
        Self {
            workloads: Vec::new(),
        }
    }

    /// The built-in CPU and wait simulations.
    pub fn defaults() -> Self {
        let mut set = Self::new();
        set.register(Arc::new(CpuWorkload));
        set.register(Arc::new(WaitWorkload));
        set
    }

    pub fn register(&mut self, workload: Arc<dyn Workload>) {
        self.workloads.push(workload);
    }

    pub fn pick(&self, kind: TaskKind) -> Option<Arc<dyn Workload>> {
        self.workloads.iter().find(|w| w.supports(kind)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_both_kinds() {
        let set = WorkloadSet::defaults();
        assert_eq!(set.pick(TaskKind::CpuBound).unwrap().name(), "cpu");
        assert_eq!(set.pick(TaskKind::WaitBound).unwrap().name(), "wait");
    }

    #[test]
    fn empty_set_picks_nothing() {
        let set = WorkloadSet::new();
        assert!(set.pick(TaskKind::CpuBound).is_none());
    }

    #[tokio::test]
    async fn wait_workload_sleeps_for_duration() {
        let start = Instant::now();
        WaitWorkload.run(Duration::from_millis(50)).await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn cpu_workload_runs_until_deadline() {
        let start = Instant::now();
        CpuWorkload.run(Duration::from_millis(30)).await;
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn cpu_workload_zero_duration_returns_immediately() {
        CpuWorkload.run(Duration::ZERO).await;
    }
}
