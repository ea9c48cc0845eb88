use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
    time::SystemTime,
};

use loadsim_model::{MAX_TASK_SECS, Slot, TaskId, TaskKind, TaskRecord, TaskStatus};

use crate::error::CoreError;

/// Number of completed tasks returned by [`Registry::snapshot`].
///
/// The underlying history is unbounded; only queries are windowed.
pub const HISTORY_WINDOW: usize = 20;

/// Immutable copy of registry state at one point in time.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    /// All running tasks, unspecified order.
    pub active: Vec<TaskRecord>,
    /// Last [`HISTORY_WINDOW`] completed tasks, completion order.
    pub recent_history: Vec<TaskRecord>,
}

/// Concurrent store of in-flight and completed tasks.
///
/// A task id lives in exactly one partition at a time: the active map
/// while running, the history list once completed. All mutation goes
/// through one lock over the combined state, so concurrent submit,
/// complete, snapshot and clear calls never observe a torn record.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RwLock<RegistryInner>>,
}

struct RegistryInner {
    /// Running tasks indexed by TaskId.
    active: HashMap<TaskId, TaskRecord>,
    /// Completed tasks in completion order, append-only between clears.
    history: Vec<TaskRecord>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                active: HashMap::new(),
                history: Vec::new(),
            })),
        }
    }

    /// Admit a new task: fresh id, clamped duration, Running status.
    ///
    /// Returns a clone of the stored record. Does not block on the
    /// task's execution in any way.
    pub fn submit(&self, kind: TaskKind, requested_secs: f64, slot: Slot) -> TaskRecord {
        let record = TaskRecord {
            id: TaskId::from(uuid::Uuid::new_v4().to_string()),
            kind,
            slot,
            worker: 0,
            pid: std::process::id(),
            requested_secs: requested_secs.clamp(0.0, MAX_TASK_SECS),
            started_at: SystemTime::now(),
            finished_at: None,
            status: TaskStatus::Running,
            duration_secs: None,
        };

        let mut inner = self.inner.write().unwrap();
        inner.active.insert(record.id.clone(), record.clone());
        record
    }

    /// Record the native thread id of the unit executing `id`.
    ///
    /// Diagnostic only; a missing id is ignored (the task may already
    /// have completed on a fast path).
    pub fn record_worker(&self, id: &TaskId, worker: u64) {
        let mut inner = self.inner.write().unwrap();
        if let Some(record) = inner.active.get_mut(id) {
            record.worker = worker;
        }
    }

    /// Mark `id` completed: stamp the finish time, compute the measured
    /// duration and move the record from active to history atomically.
    ///
    /// Fails with [`CoreError::NotFound`] when `id` is not active.
    pub fn complete(&self, id: &TaskId) -> Result<TaskRecord, CoreError> {
        let mut inner = self.inner.write().unwrap();

        let mut record = inner
            .active
            .remove(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        let finished = SystemTime::now();
        record.finished_at = Some(finished);
        record.duration_secs = Some(
            finished
                .duration_since(record.started_at)
                .unwrap_or_default()
                .as_secs_f64(),
        );
        record.status = TaskStatus::Completed;

        inner.history.push(record.clone());
        Ok(record)
    }

    /// Immutable point-in-time copy of both partitions.
    ///
    /// History is windowed to the last [`HISTORY_WINDOW`] entries.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let inner = self.inner.read().unwrap();

        let start = inner.history.len().saturating_sub(HISTORY_WINDOW);
        RegistrySnapshot {
            active: inner.active.values().cloned().collect(),
            recent_history: inner.history[start..].to_vec(),
        }
    }

    /// Drop all completed tasks. Active tasks are untouched.
    pub fn clear_history(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.history.clear();
    }

    /// Number of currently running tasks.
    pub fn active_count(&self) -> usize {
        let inner = self.inner.read().unwrap();
        inner.active.len()
    }

    /// Active task count per slot over `slots` slots.
    ///
    /// Records with a slot index beyond `slots` are ignored; the
    /// scheduler only places within the configured range.
    pub fn slot_loads(&self, slots: usize) -> Vec<usize> {
        let inner = self.inner.read().unwrap();

        let mut loads = vec![0usize; slots];
        for record in inner.active.values() {
            if let Some(load) = loads.get_mut(record.slot) {
                *load += 1;
            }
        }
        loads
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_creates_running_record() {
        let registry = Registry::new();
        let record = registry.submit(TaskKind::CpuBound, 5.0, 1);

        assert_eq!(record.status, TaskStatus::Running);
        assert_eq!(record.kind, TaskKind::CpuBound);
        assert_eq!(record.slot, 1);
        assert!(record.finished_at.is_none());
        assert!(record.duration_secs.is_none());
        assert_eq!(registry.active_count(), 1);
    }

    #[test]
    fn submit_generates_unique_ids() {
        let registry = Registry::new();
        let mut ids = std::collections::HashSet::new();
        for _ in 0..100 {
            let record = registry.submit(TaskKind::WaitBound, 0.0, 0);
            assert!(ids.insert(record.id));
        }
    }

    #[test]
    fn submit_clamps_duration() {
        let registry = Registry::new();
        assert_eq!(registry.submit(TaskKind::CpuBound, 100.0, 0).requested_secs, 30.0);
        assert_eq!(registry.submit(TaskKind::CpuBound, -3.0, 0).requested_secs, 0.0);
        assert_eq!(registry.submit(TaskKind::CpuBound, 7.5, 0).requested_secs, 7.5);
    }

    #[test]
    fn complete_moves_record_to_history() {
        let registry = Registry::new();
        let record = registry.submit(TaskKind::WaitBound, 1.0, 0);

        let done = registry.complete(&record.id).unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
        assert!(done.finished_at.unwrap() >= done.started_at);
        assert!(done.duration_secs.unwrap() >= 0.0);

        let snap = registry.snapshot();
        assert!(snap.active.is_empty());
        assert_eq!(snap.recent_history.len(), 1);
        assert_eq!(snap.recent_history[0].id, record.id);
    }

    #[test]
    fn complete_unknown_id_fails() {
        let registry = Registry::new();
        let err = registry.complete(&TaskId::from("missing")).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn complete_twice_fails() {
        let registry = Registry::new();
        let record = registry.submit(TaskKind::CpuBound, 1.0, 0);

        registry.complete(&record.id).unwrap();
        let err = registry.complete(&record.id).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn record_worker_updates_active_record() {
        let registry = Registry::new();
        let record = registry.submit(TaskKind::CpuBound, 1.0, 0);

        registry.record_worker(&record.id, 777);
        let snap = registry.snapshot();
        assert_eq!(snap.active[0].worker, 777);

        // Unknown id is a no-op, not a panic.
        registry.record_worker(&TaskId::from("missing"), 1);
    }

    #[test]
    fn snapshot_windows_history() {
        let registry = Registry::new();
        for _ in 0..(HISTORY_WINDOW + 15) {
            let record = registry.submit(TaskKind::WaitBound, 0.0, 0);
            registry.complete(&record.id).unwrap();
        }

        let snap = registry.snapshot();
        assert_eq!(snap.recent_history.len(), HISTORY_WINDOW);
    }

    #[test]
    fn snapshot_history_keeps_completion_order() {
        let registry = Registry::new();
        let first = registry.submit(TaskKind::CpuBound, 0.0, 0);
        let second = registry.submit(TaskKind::CpuBound, 0.0, 0);

        registry.complete(&second.id).unwrap();
        registry.complete(&first.id).unwrap();

        let snap = registry.snapshot();
        assert_eq!(snap.recent_history[0].id, second.id);
        assert_eq!(snap.recent_history[1].id, first.id);
    }

    #[test]
    fn clear_history_keeps_active() {
        let registry = Registry::new();
        let running = registry.submit(TaskKind::CpuBound, 5.0, 0);
        let done = registry.submit(TaskKind::WaitBound, 0.0, 0);
        registry.complete(&done.id).unwrap();

        registry.clear_history();

        let snap = registry.snapshot();
        assert!(snap.recent_history.is_empty());
        assert_eq!(snap.active.len(), 1);
        assert_eq!(snap.active[0].id, running.id);
    }

    #[test]
    fn slot_loads_counts_active_per_slot() {
        let registry = Registry::new();
        registry.submit(TaskKind::CpuBound, 1.0, 0);
        registry.submit(TaskKind::CpuBound, 1.0, 2);
        registry.submit(TaskKind::CpuBound, 1.0, 2);
        let done = registry.submit(TaskKind::CpuBound, 1.0, 1);
        registry.complete(&done.id).unwrap();

        assert_eq!(registry.slot_loads(3), vec![1, 0, 2]);
    }

    #[test]
    fn concurrent_submit_and_complete_lose_nothing() {
        let registry = Registry::new();

        let submit_handles: Vec<_> = (0..100)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || registry.submit(TaskKind::CpuBound, 1.0, 0).id)
            })
            .collect();
        let ids: Vec<TaskId> = submit_handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect();

        assert_eq!(registry.active_count(), 100);

        let complete_handles: Vec<_> = ids
            .into_iter()
            .map(|id| {
                let registry = registry.clone();
                std::thread::spawn(move || registry.complete(&id).unwrap())
            })
            .collect();
        for handle in complete_handles {
            handle.join().unwrap();
        }

        let snap = registry.snapshot();
        assert_eq!(registry.active_count(), 0);
        assert_eq!(snap.recent_history.len(), HISTORY_WINDOW);

        // Full history retained 100 distinct completions even though the
        // snapshot window is bounded.
        let inner = registry.inner.read().unwrap();
        assert_eq!(inner.history.len(), 100);
        let distinct: std::collections::HashSet<_> =
            inner.history.iter().map(|r| r.id.clone()).collect();
        assert_eq!(distinct.len(), 100);
    }
}
