use serde::{Deserialize, Serialize};

/// Current execution state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is currently executing.
    Running,
    /// Task ran for its full requested duration and finished.
    Completed,
}

impl TaskStatus {
    /// Returns `true` if the task is still executing.
    pub fn is_active(&self) -> bool {
        matches!(self, TaskStatus::Running)
    }

    /// Returns `true` if the task will not transition further.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}
