use std::time::Duration;

use async_trait::async_trait;

/// One reading of host resource utilization.
#[derive(Debug, Clone, Default)]
pub struct ResourceSample {
    /// Utilization percentage per logical core, index = core.
    pub per_core_percent: Vec<f64>,
    /// Memory utilization percentage.
    pub memory_percent: f64,
}

/// Read-only collaborator providing resource utilization readings.
///
/// Sampling may take a bounded interval; implementations must only
/// block the calling request at an await point, never any shared state.
#[async_trait]
pub trait ResourceSampler: Send + Sync {
    async fn sample(&self) -> ResourceSample;
}

/// Fixed sample, for tests and platforms without `/proc`.
#[derive(Debug, Clone, Default)]
pub struct StaticSampler(pub ResourceSample);

#[async_trait]
impl ResourceSampler for StaticSampler {
    async fn sample(&self) -> ResourceSample {
        self.0.clone()
    }
}

/// `/proc`-backed sampler: per-core utilization from two `/proc/stat`
/// readings one interval apart, memory from `/proc/meminfo`.
///
/// On failure (or off Linux) it degrades to an empty sample; the
/// aggregator defines the zero-resource fallback.
pub struct ProcSampler {
    interval: Duration,
}

impl ProcSampler {
    pub fn new() -> Self {
        Self {
            interval: Duration::from_millis(500),
        }
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for ProcSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceSampler for ProcSampler {
    #[cfg(target_os = "linux")]
    async fn sample(&self) -> ResourceSample {
        let Ok(before) = std::fs::read_to_string("/proc/stat") else {
            return ResourceSample::default();
        };
        tokio::time::sleep(self.interval).await;
        let Ok(after) = std::fs::read_to_string("/proc/stat") else {
            return ResourceSample::default();
        };

        let per_core_percent =
            core_utilization(&parse_core_times(&before), &parse_core_times(&after));
        let memory_percent = std::fs::read_to_string("/proc/meminfo")
            .ok()
            .and_then(|text| parse_memory_percent(&text))
            .unwrap_or(0.0);

        ResourceSample {
            per_core_percent,
            memory_percent,
        }
    }

    #[cfg(not(target_os = "linux"))]
    async fn sample(&self) -> ResourceSample {
        ResourceSample::default()
    }
}

/// Per-core `(busy, total)` jiffy counters from `/proc/stat` text.
///
/// Only the per-core `cpuN` lines count; the aggregate `cpu` line is
/// skipped. Idle time includes iowait.
fn parse_core_times(text: &str) -> Vec<(u64, u64)> {
    let mut cores = Vec::new();

    for line in text.lines() {
        let Some(rest) = line.strip_prefix("cpu") else {
            continue;
        };
        if !rest.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }

        let fields: Vec<u64> = rest
            .split_whitespace()
            .skip(1)
            .take(8)
            .filter_map(|f| f.parse().ok())
            .collect();
        if fields.len() < 4 {
            continue;
        }

        let idle = fields[3] + fields.get(4).copied().unwrap_or(0);
        let total: u64 = fields.iter().sum();
        cores.push((total - idle, total));
    }

    cores
}

/// Utilization percentage per core from two counter readings.
fn core_utilization(before: &[(u64, u64)], after: &[(u64, u64)]) -> Vec<f64> {
    before
        .iter()
        .zip(after.iter())
        .map(|(&(busy0, total0), &(busy1, total1))| {
            let total = total1.saturating_sub(total0);
            if total == 0 {
                0.0
            } else {
                let busy = busy1.saturating_sub(busy0);
                busy as f64 / total as f64 * 100.0
            }
        })
        .collect()
}

/// Memory utilization percentage from `/proc/meminfo` text.
fn parse_memory_percent(text: &str) -> Option<f64> {
    let mut total_kb = None;
    let mut available_kb = None;

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("MemTotal:") {
            total_kb = rest.split_whitespace().next()?.parse::<f64>().ok();
        } else if let Some(rest) = line.strip_prefix("MemAvailable:") {
            available_kb = rest.split_whitespace().next()?.parse::<f64>().ok();
        }
    }

    let total = total_kb?;
    let available = available_kb?;
    if total <= 0.0 {
        return None;
    }
    Some((1.0 - available / total) * 100.0)
}
