use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque unique task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_inner() {
        let id = TaskId::from("task-1");
        assert_eq!(id.to_string(), "task-1");
        assert_eq!(id.as_str(), "task-1");
    }

    #[test]
    fn serde_is_transparent() {
        let id = TaskId::from("abc-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""abc-123""#);

        let back: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
