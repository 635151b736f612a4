//! Metrics-to-recommendation engine.
//!
//! Everything in here is a pure function of a [`MetricsSnapshot`]: no I/O, no
//! state carried between calls, no failure path. Degenerate readings (zero
//! cores, zero memory) silence the affected rules instead of erroring.

pub mod cpu;
pub mod gpu;
pub mod memory;
pub mod recommendation;
pub mod sizing;

use crate::system::snapshot::MetricsSnapshot;

pub use recommendation::{
    AlertSummary, Component, Recommendation, Severity, SeverityGroup, group_by_severity,
};

/// Runs every rule set, CPU first, then memory, then GPU.
pub fn analyze(snapshot: &MetricsSnapshot) -> Vec<Recommendation> {
    let mut recommendations = cpu::analyze_cpu(snapshot);
    recommendations.extend(memory::analyze_memory(snapshot));
    recommendations.extend(gpu::analyze_gpu(snapshot));
    recommendations
}
