use serde::{Deserialize, Serialize};

/// Simulated workload class of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Busy computation that occupies a compute resource for the whole
    /// requested duration, yielding periodically.
    CpuBound,
    /// Pure wait: suspends for the requested duration without computing.
    WaitBound,
}

impl TaskKind {
    /// Returns a short symbolic identifier, intended for logging and wire use.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::CpuBound => "cpu_bound",
            TaskKind::WaitBound => "wait_bound",
        }
    }

    /// Lenient parse used at the request boundary.
    ///
    /// Unknown or missing kinds default to `CpuBound`.
    pub fn from_request(s: Option<&str>) -> Self {
        match s.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("wait_bound") | Some("io_bound") => TaskKind::WaitBound,
            _ => TaskKind::CpuBound,
        }
    }
}

impl Default for TaskKind {
    fn default() -> Self {
        TaskKind::CpuBound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaskKind::CpuBound).unwrap(),
            r#""cpu_bound""#
        );
        assert_eq!(
            serde_json::to_string(&TaskKind::WaitBound).unwrap(),
            r#""wait_bound""#
        );
    }

    #[test]
    fn request_parse_defaults_to_cpu_bound() {
        assert_eq!(TaskKind::from_request(None), TaskKind::CpuBound);
        assert_eq!(TaskKind::from_request(Some("bogus")), TaskKind::CpuBound);
        assert_eq!(
            TaskKind::from_request(Some("wait_bound")),
            TaskKind::WaitBound
        );
        assert_eq!(
            TaskKind::from_request(Some("IO_BOUND")),
            TaskKind::WaitBound
        );
    }
}
