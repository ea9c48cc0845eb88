use std::sync::{
    RwLock,
    atomic::{AtomicUsize, Ordering},
};

use rand::Rng;
use tracing::info;

use loadsim_model::Policy;

use crate::error::CoreError;

/// Process-wide scheduling policy state.
///
/// Holds the single current policy and the round-robin cursor. The
/// policy is read on every admission and mutated only by
/// [`Scheduler::set_policy`]; already-running tasks are never affected
/// by a switch.
pub struct Scheduler {
    current: RwLock<Policy>,
    /// Shared round-robin cursor; advances exactly once per placement
    /// made under [`Policy::RoundRobin`].
    cursor: AtomicUsize,
}

impl Scheduler {
    /// Create a scheduler with the default policy.
    pub fn new() -> Self {
        Self::with_policy(Policy::default())
    }

    pub fn with_policy(policy: Policy) -> Self {
        Self {
            current: RwLock::new(policy),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Policy in effect for the next admission.
    pub fn current(&self) -> Policy {
        *self.current.read().unwrap()
    }

    /// Switch the process-wide policy by name.
    ///
    /// Unknown names fail with [`CoreError::InvalidPolicy`] and leave
    /// the current policy unchanged.
    pub fn set_policy(&self, name: &str) -> Result<Policy, CoreError> {
        let policy: Policy = name.parse().map_err(CoreError::InvalidPolicy)?;

        let mut current = self.current.write().unwrap();
        *current = policy;
        info!(policy = %policy, "scheduling policy updated");
        Ok(policy)
    }

    /// Pick the advisory slot for a new task.
    ///
    /// `loads` holds the current active-task count per slot; its length
    /// is the slot count. An empty load vector degrades to slot 0.
    pub fn place(&self, loads: &[usize]) -> usize {
        if loads.is_empty() {
            return 0;
        }

        match self.current() {
            Policy::RoundRobin => self.cursor.fetch_add(1, Ordering::SeqCst) % loads.len(),
            Policy::Random => rand::thread_rng().gen_range(0..loads.len()),
            Policy::LeastLoaded => {
                let mut best = 0;
                for (slot, &load) in loads.iter().enumerate() {
                    if load < loads[best] {
                        best = slot;
                    }
                }
                best
            }
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
