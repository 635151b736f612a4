use crate::analysis::recommendation::{Component, Recommendation, Severity};
use crate::analysis::sizing::{CONSERVATIVE_FACTOR, conservative_target_gb, headroom_target_gb};
use crate::system::snapshot::{MemoryPressure, MetricsSnapshot};

pub const USAGE_CRITICAL_PERCENT: f64 = 95.0;
pub const USAGE_HIGH_PERCENT: f64 = 85.0;
pub const USAGE_MEDIUM_PERCENT: f64 = 70.0;

pub const SWAP_HEAVY_GB: f64 = 2.0;
pub const SWAP_MODERATE_GB: f64 = 0.5;

pub const CAPACITY_MINIMUM_GB: f64 = 8.0;
pub const CAPACITY_LIMITING_GB: f64 = 16.0;
pub const CAPACITY_COMFORTABLE_GB: f64 = 32.0;

/// Usage above which a 16–32 GB machine is still considered starved.
pub const CAPACITY_STARVED_PERCENT: f64 = 80.0;

/// Four independent ladders: usage, swap, pressure and installed capacity.
/// Each picks at most one tier; all four may fire together.
pub fn analyze_memory(snapshot: &MetricsSnapshot) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let usage = MemoryUsage::from_snapshot(snapshot);

    if let Some(usage) = usage {
        recommendations.extend(usage_finding(&usage));
    }
    recommendations.extend(swap_finding(snapshot));
    recommendations.extend(pressure_finding(snapshot.memory_pressure));
    if let Some(usage) = usage {
        recommendations.extend(capacity_finding(&usage, snapshot.swap_used_bytes > 0));
    }

    recommendations
}

/// Derived readings shared by the ladders. Absent when total memory is
/// unknown, which silences the ladders that divide by it.
#[derive(Debug, Clone, Copy)]
struct MemoryUsage {
    total_gb: f64,
    used_gb: f64,
    used_percent: f64,
    swap_gb: f64,
}

impl MemoryUsage {
    fn from_snapshot(snapshot: &MetricsSnapshot) -> Option<Self> {
        if snapshot.memory_total_bytes == 0 {
            return None;
        }
        let total_gb = snapshot.memory_total_gb();
        let used_percent = snapshot.memory_used_percent();
        Some(Self {
            total_gb,
            used_gb: used_percent / 100.0 * total_gb,
            used_percent,
            swap_gb: snapshot.swap_used_gb(),
        })
    }
}

fn usage_finding(usage: &MemoryUsage) -> Option<Recommendation> {
    let MemoryUsage {
        total_gb,
        used_gb,
        used_percent,
        swap_gb,
    } = *usage;
    let reading = format!("{used_gb:.1}GB/{total_gb:.1}GB = {used_percent:.1}% used");

    if used_percent > USAGE_CRITICAL_PERCENT {
        let minimum = conservative_target_gb(total_gb, used_percent, swap_gb);
        Some(Recommendation::new(
            Component::Memory,
            Severity::Critical,
            format!("Memory usage is critical ({reading})"),
            format!(
                "Urgently need more RAM. Minimum upgrade: {minimum:.0}GB (gives you {:.1}GB headroom). Close applications immediately.",
                minimum - used_gb
            ),
        ))
    } else if used_percent > USAGE_HIGH_PERCENT {
        let target = headroom_target_gb(total_gb, used_percent, swap_gb);
        Some(Recommendation::new(
            Component::Memory,
            Severity::High,
            format!("Memory usage is high ({reading})"),
            format!(
                "Consider upgrading to {target:.0}GB RAM to prevent slowdowns (provides {:.1}GB buffer).",
                target - used_gb
            ),
        ))
    } else if used_percent > USAGE_MEDIUM_PERCENT {
        let target = headroom_target_gb(total_gb, used_percent, swap_gb);
        Some(Recommendation::new(
            Component::Memory,
            Severity::Medium,
            format!("Memory usage is moderate ({reading})"),
            format!("Monitor memory usage. Consider {target:.0}GB for intensive tasks."),
        ))
    } else {
        None
    }
}

fn swap_finding(snapshot: &MetricsSnapshot) -> Option<Recommendation> {
    if snapshot.swap_used_bytes == 0 {
        return None;
    }

    let swap_gb = snapshot.swap_used_gb();
    let total_gb = snapshot.memory_total_gb();
    let used_percent = snapshot.memory_used_percent();
    let used_gb = used_percent / 100.0 * total_gb;
    let need_gb = used_gb + swap_gb;
    let minimum = conservative_target_gb(total_gb, used_percent, swap_gb);
    let optimal = headroom_target_gb(total_gb, used_percent, swap_gb);

    if swap_gb > SWAP_HEAVY_GB {
        Some(Recommendation::new(
            Component::Memory,
            Severity::High,
            format!("Heavy swap usage ({swap_gb:.1}GB) - system is using disk as memory"),
            format!(
                "Add more RAM immediately. Memory needed: {need_gb:.1}GB ({used_gb:.1}GB used + {swap_gb:.1}GB swap). Minimum: {minimum:.0}GB, Optimal: {optimal:.0}GB for headroom."
            ),
        ))
    } else if swap_gb > SWAP_MODERATE_GB {
        Some(Recommendation::new(
            Component::Memory,
            Severity::Medium,
            format!("Moderate swap usage ({swap_gb:.1}GB)"),
            format!(
                "Consider upgrading to {minimum:.0}GB RAM to eliminate swap (total need: {:.1}GB with buffer). Optimal: {optimal:.0}GB for headroom.",
                need_gb * CONSERVATIVE_FACTOR
            ),
        ))
    } else {
        None
    }
}

fn pressure_finding(pressure: MemoryPressure) -> Option<Recommendation> {
    match pressure {
        MemoryPressure::Critical | MemoryPressure::Urgent => Some(Recommendation::new(
            Component::Memory,
            Severity::Critical,
            format!("Memory pressure is {pressure}"),
            "System is under severe memory pressure. Upgrade RAM immediately.",
        )),
        MemoryPressure::Warning => Some(Recommendation::new(
            Component::Memory,
            Severity::High,
            "Memory pressure warning detected",
            "Consider upgrading RAM to prevent performance issues.",
        )),
        MemoryPressure::Normal | MemoryPressure::Unknown => None,
    }
}

fn capacity_finding(usage: &MemoryUsage, swap_in_use: bool) -> Option<Recommendation> {
    let total_gb = usage.total_gb;

    if total_gb < CAPACITY_MINIMUM_GB {
        Some(Recommendation::new(
            Component::Memory,
            Severity::High,
            format!("Total RAM ({total_gb:.1}GB) is below modern standards"),
            format!(
                "Upgrade to at least 16GB RAM for modern applications (current: {total_gb:.1}GB → recommended: 16GB+)."
            ),
        ))
    } else if total_gb < CAPACITY_LIMITING_GB {
        Some(Recommendation::new(
            Component::Memory,
            Severity::Medium,
            format!("Total RAM ({total_gb:.1}GB) may be limiting for intensive tasks"),
            format!(
                "Consider upgrading to 32GB RAM for development/content creation (current: {total_gb:.1}GB → recommended: 32GB)."
            ),
        ))
    } else if total_gb < CAPACITY_COMFORTABLE_GB
        && (usage.used_percent > CAPACITY_STARVED_PERCENT || swap_in_use)
    {
        Some(Recommendation::new(
            Component::Memory,
            Severity::Medium,
            format!("Despite having {total_gb:.1}GB RAM, still experiencing memory pressure"),
            format!(
                "Upgrade to 64GB RAM for heavy workloads (current: {total_gb:.1}GB → recommended: 64GB)."
            ),
        ))
    } else {
        None
    }
}
