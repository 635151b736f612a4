//! Traffic-light levels for the quick-status line.

use crate::system::snapshot::{BYTES_PER_GB, MetricsSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusLevel {
    Good,
    Warning,
    Critical,
}

impl StatusLevel {
    pub fn label(self) -> &'static str {
        match self {
            StatusLevel::Good => "Green",
            StatusLevel::Warning => "Yellow",
            StatusLevel::Critical => "Red",
        }
    }
}

pub fn cpu_level(usage_percent: f64) -> StatusLevel {
    if usage_percent > 80.0 {
        StatusLevel::Critical
    } else if usage_percent > 60.0 {
        StatusLevel::Warning
    } else {
        StatusLevel::Good
    }
}

pub fn memory_level(used_percent: f64) -> StatusLevel {
    if used_percent > 90.0 {
        StatusLevel::Critical
    } else if used_percent > 75.0 {
        StatusLevel::Warning
    } else {
        StatusLevel::Good
    }
}

pub fn load_level(load_one: f64, cores: usize) -> StatusLevel {
    let cores = cores as f64;
    if load_one > cores * 1.5 {
        StatusLevel::Critical
    } else if load_one > cores {
        StatusLevel::Warning
    } else {
        StatusLevel::Good
    }
}

/// `None` when no swap is in use; any swap use is at least a warning.
pub fn swap_level(swap_used_bytes: u64) -> Option<StatusLevel> {
    if swap_used_bytes == 0 {
        return None;
    }
    let swap_gb = swap_used_bytes as f64 / BYTES_PER_GB;
    Some(if swap_gb > 2.0 {
        StatusLevel::Critical
    } else {
        StatusLevel::Warning
    })
}

/// One quick-status entry: label, formatted value, level.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickStatus {
    pub label: &'static str,
    pub value: String,
    pub level: StatusLevel,
}

pub fn quick_status(snapshot: &MetricsSnapshot) -> Vec<QuickStatus> {
    let mut entries = vec![
        QuickStatus {
            label: "CPU",
            value: format!("{:.1}%", snapshot.cpu_usage_percent),
            level: cpu_level(snapshot.cpu_usage_percent),
        },
        QuickStatus {
            label: "Load",
            value: format!("{:.2}", snapshot.load_average.one),
            level: load_level(snapshot.load_average.one, snapshot.cpu_core_count),
        },
        QuickStatus {
            label: "Memory",
            value: format!("{:.1}%", snapshot.memory_used_percent()),
            level: memory_level(snapshot.memory_used_percent()),
        },
    ];
    if let Some(level) = swap_level(snapshot.swap_used_bytes) {
        entries.push(QuickStatus {
            label: "Swap",
            value: format!("{:.1}GB", snapshot.swap_used_gb()),
            level,
        });
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::snapshot::LoadAverage;

    const GB: u64 = 1024 * 1024 * 1024;

    #[test]
    fn cpu_thresholds_are_exclusive() {
        assert_eq!(cpu_level(60.0), StatusLevel::Good);
        assert_eq!(cpu_level(60.1), StatusLevel::Warning);
        assert_eq!(cpu_level(80.0), StatusLevel::Warning);
        assert_eq!(cpu_level(80.1), StatusLevel::Critical);
    }

    #[test]
    fn memory_thresholds() {
        assert_eq!(memory_level(75.0), StatusLevel::Good);
        assert_eq!(memory_level(76.0), StatusLevel::Warning);
        assert_eq!(memory_level(91.0), StatusLevel::Critical);
    }

    #[test]
    fn load_is_relative_to_cores() {
        assert_eq!(load_level(4.0, 4), StatusLevel::Good);
        assert_eq!(load_level(5.0, 4), StatusLevel::Warning);
        assert_eq!(load_level(6.5, 4), StatusLevel::Critical);
        assert_eq!(load_level(0.1, 0), StatusLevel::Critical);
    }

    #[test]
    fn swap_only_reported_when_used() {
        assert_eq!(swap_level(0), None);
        assert_eq!(swap_level(GB), Some(StatusLevel::Warning));
        assert_eq!(swap_level(3 * GB), Some(StatusLevel::Critical));
    }

    #[test]
    fn quick_status_entries() {
        let snapshot = MetricsSnapshot {
            cpu_usage_percent: 65.0,
            load_average: LoadAverage::uniform(1.5),
            cpu_core_count: 8,
            memory_total_bytes: 16 * GB,
            memory_used_bytes: 8 * GB,
            ..Default::default()
        };
        let entries = quick_status(&snapshot);
        let labels: Vec<&str> = entries.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["CPU", "Load", "Memory"]);
        assert_eq!(entries[0].value, "65.0%");
        assert_eq!(entries[0].level, StatusLevel::Warning);
        assert_eq!(entries[1].value, "1.50");
        assert_eq!(entries[2].value, "50.0%");

        let swapping = MetricsSnapshot {
            swap_used_bytes: GB / 2,
            ..snapshot
        };
        let entries = quick_status(&swapping);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[3].value, "0.5GB");
    }
}
