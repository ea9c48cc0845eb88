use std::sync::OnceLock;

static AGENT_ID: OnceLock<String> = OnceLock::new();

/// Process-lifetime unique agent identifier, generated once at first use.
///
/// Not persisted: a restarted agent gets a fresh id.
pub fn agent_id() -> &'static str {
    AGENT_ID.get_or_init(|| uuid::Uuid::new_v4().to_string())
}

/// Host name, or `"unknown"` when it cannot be resolved.
pub fn host_name() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Number of logical cores available to this process.
///
/// This is the slot count the scheduler places over.
pub fn core_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Native OS thread id of the calling thread. Diagnostic only.
#[cfg(target_os = "linux")]
pub fn thread_id() -> u64 {
    // gettid(2) never fails.
    (unsafe { libc::gettid() }) as u64
}

#[cfg(not(target_os = "linux"))]
pub fn thread_id() -> u64 {
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_id_is_stable() {
        let first = agent_id();
        let second = agent_id();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn core_count_is_positive() {
        assert!(core_count() >= 1);
    }

    #[test]
    fn host_name_is_not_empty() {
        assert!(!host_name().is_empty());
    }
}
