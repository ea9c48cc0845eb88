use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::{Slot, TaskId, TaskKind, TaskStatus};

/// One unit of simulated work, as tracked by the registry.
///
/// Exactly one of the following holds at any point in time:
/// - `finished_at` is `None` and `status` is [`TaskStatus::Running`];
/// - `finished_at` is `Some` and `status` is [`TaskStatus::Completed`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Unique task identifier, generated at submission.
    pub id: TaskId,
    /// Workload class.
    pub kind: TaskKind,
    /// Advisory resource slot chosen by the scheduling policy.
    pub slot: Slot,
    /// Native OS thread id of the executing unit. Diagnostic only;
    /// zero until the execution unit has reported in.
    pub worker: u64,
    /// Agent process id. Diagnostic only.
    pub pid: u32,
    /// Requested (already clamped) duration in seconds.
    pub requested_secs: f64,
    /// When the task was admitted.
    #[serde(with = "time_serde")]
    pub started_at: SystemTime,
    /// When the task finished. `None` while running.
    #[serde(with = "time_serde_opt", skip_serializing_if = "Option::is_none", default)]
    pub finished_at: Option<SystemTime>,
    /// Current execution state.
    pub status: TaskStatus,
    /// Measured duration in seconds (`finished_at - started_at`).
    /// `None` while running.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub duration_secs: Option<f64>,
}

mod time_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    pub fn serialize<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let since_epoch = time
            .duration_since(UNIX_EPOCH)
            .map_err(serde::ser::Error::custom)?;
        since_epoch.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SystemTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Ok(UNIX_EPOCH + Duration::from_secs_f64(secs))
    }
}

mod time_serde_opt {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    pub fn serialize<S>(time: &Option<SystemTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(time) => {
                let since_epoch = time
                    .duration_since(UNIX_EPOCH)
                    .map_err(serde::ser::Error::custom)?;
                since_epoch.as_secs_f64().serialize(serializer)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SystemTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<f64>::deserialize(deserializer)?;
        Ok(secs.map(|secs| UNIX_EPOCH + Duration::from_secs_f64(secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_record() -> TaskRecord {
        TaskRecord {
            id: TaskId::from("task-1"),
            kind: TaskKind::CpuBound,
            slot: 2,
            worker: 4242,
            pid: 100,
            requested_secs: 5.0,
            started_at: SystemTime::now(),
            finished_at: None,
            status: TaskStatus::Running,
            duration_secs: None,
        }
    }

    #[test]
    fn serde_roundtrip() {
        let mut record = running_record();
        record.finished_at = Some(record.started_at + std::time::Duration::from_secs(5));
        record.status = TaskStatus::Completed;
        record.duration_secs = Some(5.0);

        let json = serde_json::to_string(&record).unwrap();
        let back: TaskRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, record.id);
        assert_eq!(back.kind, record.kind);
        assert_eq!(back.slot, record.slot);
        assert_eq!(back.status, record.status);
        assert_eq!(back.duration_secs, record.duration_secs);
    }

    #[test]
    fn running_record_omits_finish_fields() {
        let json = serde_json::to_string(&running_record()).unwrap();
        assert!(!json.contains("finishedAt"));
        assert!(!json.contains("durationSecs"));
        assert!(json.contains("startedAt"));
    }
}
