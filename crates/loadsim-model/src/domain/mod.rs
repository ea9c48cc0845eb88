mod task_id;
pub use task_id::TaskId;

mod task_kind;
pub use task_kind::TaskKind;

mod task_status;
pub use task_status::TaskStatus;

mod task_record;
pub use task_record::TaskRecord;

mod policy;
pub use policy::{InvalidPolicy, Policy};

mod stats;
pub use stats::StatsSnapshot;

/// Advisory resource-slot index (a logical core).
///
/// A slot is a placement target recorded on each task for reporting.
/// It carries no affinity guarantee; the runtime places work wherever
/// it likes.
pub type Slot = usize;

/// Maximum requested task duration in seconds.
///
/// Submissions above this are clamped silently, never rejected.
pub const MAX_TASK_SECS: f64 = 30.0;
