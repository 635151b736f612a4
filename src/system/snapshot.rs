use std::fmt;

use serde::Serialize;

pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Sentinel GPU model meaning "no reliable identity".
pub const UNKNOWN_GPU: &str = "Unknown GPU";
pub const UNKNOWN_CPU: &str = "Unknown CPU";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryPressure {
    Normal,
    Warning,
    Critical,
    Urgent,
    #[default]
    Unknown,
}

impl MemoryPressure {
    pub fn from_label(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "normal" => MemoryPressure::Normal,
            "warning" => MemoryPressure::Warning,
            "critical" => MemoryPressure::Critical,
            "urgent" => MemoryPressure::Urgent,
            _ => MemoryPressure::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MemoryPressure::Normal => "normal",
            MemoryPressure::Warning => "warning",
            MemoryPressure::Critical => "critical",
            MemoryPressure::Urgent => "urgent",
            MemoryPressure::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 1, 5 and 15 minute run-queue averages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

impl LoadAverage {
    pub fn new(one: f64, five: f64, fifteen: f64) -> Self {
        Self { one, five, fifteen }
    }

    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value)
    }

    pub fn is_zero(&self) -> bool {
        self.one == 0.0 && self.five == 0.0 && self.fifteen == 0.0
    }
}

/// One point-in-time reading of the host, produced by a collector once per
/// polling cycle and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MetricsSnapshot {
    pub cpu_usage_percent: f64,
    pub load_average: LoadAverage,
    pub cpu_core_count: usize,
    pub cpu_model: String,
    pub memory_total_bytes: u64,
    pub memory_used_bytes: u64,
    pub swap_used_bytes: u64,
    pub swap_total_bytes: u64,
    pub memory_pressure: MemoryPressure,
    pub gpu_model: String,
    pub uptime_secs: u64,
}

impl MetricsSnapshot {
    /// Percentage of physical memory in use, or 0 when the total is unknown.
    pub fn memory_used_percent(&self) -> f64 {
        if self.memory_total_bytes == 0 {
            return 0.0;
        }
        self.memory_used_bytes as f64 / self.memory_total_bytes as f64 * 100.0
    }

    pub fn memory_total_gb(&self) -> f64 {
        self.memory_total_bytes as f64 / BYTES_PER_GB
    }

    pub fn memory_used_gb(&self) -> f64 {
        self.memory_used_bytes as f64 / BYTES_PER_GB
    }

    pub fn swap_used_gb(&self) -> f64 {
        self.swap_used_bytes as f64 / BYTES_PER_GB
    }

    pub fn has_gpu_identity(&self) -> bool {
        !self.gpu_model.is_empty() && self.gpu_model != UNKNOWN_GPU
    }
}

/// Cross-platform pressure estimate for hosts that do not report one.
pub fn estimate_memory_pressure(used: u64, total: u64, swap_used: u64) -> MemoryPressure {
    if total == 0 {
        return MemoryPressure::Unknown;
    }

    let used_percent = used as f64 / total as f64 * 100.0;
    let swap_gb = swap_used as f64 / BYTES_PER_GB;

    if used_percent > 95.0 || swap_gb > 2.0 {
        MemoryPressure::Critical
    } else if used_percent > 85.0 || swap_gb > 0.1 {
        MemoryPressure::Warning
    } else {
        MemoryPressure::Normal
    }
}
