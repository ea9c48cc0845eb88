use thiserror::Error;

use loadsim_model::InvalidPolicy;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Unrecognized scheduling policy name. Process-wide policy state
    /// is left unchanged.
    #[error(transparent)]
    InvalidPolicy(#[from] InvalidPolicy),

    /// Completion was requested for a task id that is not active.
    ///
    /// Execution units own their own ids, so this is an internal
    /// consistency violation rather than an expected runtime condition.
    #[error("task not found in active partition: {0}")]
    NotFound(String),

    /// The execution unit backing a task could not be started.
    /// No registry entry is left behind.
    #[error("failed to launch task execution: {0}")]
    LaunchFailed(String),
}
