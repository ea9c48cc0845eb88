use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{debug, error, instrument};

use loadsim_model::{TaskKind, TaskRecord};

use crate::{
    error::CoreError,
    registry::Registry,
    scheduler::Scheduler,
    system,
    workload::{Workload, WorkloadSet},
};

/// Launches one independent execution unit per admitted task.
///
/// The runner is the only writer that pairs a registry entry with a
/// live tokio task: admission happens only after the launch
/// preconditions (a workload for the kind, a reachable runtime) are
/// known to hold, so every active record has a backing execution.
pub struct TaskRunner {
    registry: Registry,
    scheduler: Arc<Scheduler>,
    workloads: WorkloadSet,
    slots: usize,
}

impl TaskRunner {
    pub fn new(registry: Registry, scheduler: Arc<Scheduler>, slots: usize) -> Self {
        Self::with_workloads(registry, scheduler, slots, WorkloadSet::defaults())
    }

    pub fn with_workloads(
        registry: Registry,
        scheduler: Arc<Scheduler>,
        slots: usize,
        workloads: WorkloadSet,
    ) -> Self {
        Self {
            registry,
            scheduler,
            workloads,
            slots,
        }
    }

    /// Admit and launch one task; never waits for it to finish.
    ///
    /// The advisory slot comes from the current scheduling policy. The
    /// spawned unit reports its worker thread id, runs the workload for
    /// the clamped duration and completes the registry entry exactly
    /// once. Fails with [`CoreError::LaunchFailed`] before touching the
    /// registry when no execution can be spawned.
    #[instrument(level = "debug", skip(self), fields(kind = kind.as_str()))]
    pub fn start(&self, kind: TaskKind, requested_secs: f64) -> Result<TaskRecord, CoreError> {
        let workload = self
            .workloads
            .pick(kind)
            .ok_or_else(|| CoreError::LaunchFailed(format!("no workload for {}", kind.as_str())))?;
        let handle = Handle::try_current()
            .map_err(|e| CoreError::LaunchFailed(format!("no runtime: {e}")))?;

        let slot = self.scheduler.place(&self.registry.slot_loads(self.slots));
        let record = self.registry.submit(kind, requested_secs, slot);
        debug!(id = %record.id, slot, secs = record.requested_secs, "task admitted");

        let registry = self.registry.clone();
        let id = record.id.clone();
        let requested = Duration::from_secs_f64(record.requested_secs);
        handle.spawn(async move {
            registry.record_worker(&id, system::thread_id());
            workload.run(requested).await;

            match registry.complete(&id) {
                Ok(done) => {
                    debug!(id = %done.id, secs = done.duration_secs, "task completed");
                }
                Err(err) => {
                    // The unit owns its id, so a missing entry means the
                    // registry state is inconsistent.
                    error!(id = %id, %err, "failed to complete task");
                }
            }
        });

        Ok(record)
    }
}
