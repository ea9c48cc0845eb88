pub mod error;
pub use error::CoreError;

pub mod registry;
pub use registry::{Registry, RegistrySnapshot, HISTORY_WINDOW};

pub mod scheduler;
pub use scheduler::Scheduler;

pub mod workload;
pub use workload::{CpuWorkload, WaitWorkload, Workload, WorkloadSet};

pub mod runner;
pub use runner::TaskRunner;

pub mod sampler;
pub use sampler::{ProcSampler, ResourceSample, ResourceSampler, StaticSampler};

pub mod stats;
pub use stats::StatsAggregator;

pub mod system;
