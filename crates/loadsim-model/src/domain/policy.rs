use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a policy name does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid scheduling policy: {0} (expected: round_robin|random|least_loaded)")]
pub struct InvalidPolicy(pub String);

/// Named strategy that picks the advisory resource slot for a new task.
///
/// Policy choice has no effect on where the runtime physically places
/// work; it only determines the slot index recorded for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Cycle deterministically through slots, wrapping modulo slot count.
    RoundRobin,
    /// Uniform random slot, stateless.
    Random,
    /// Slot with the fewest active tasks, ties broken by lowest index.
    LeastLoaded,
}

impl Policy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::RoundRobin => "round_robin",
            Policy::Random => "random",
            Policy::LeastLoaded => "least_loaded",
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy::RoundRobin
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = InvalidPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "round_robin" => Ok(Policy::RoundRobin),
            "random" => Ok(Policy::Random),
            "least_loaded" => Ok(Policy::LeastLoaded),
            _ => Err(InvalidPolicy(s.to_string())),
        }
    }
}
