//! Plain-text and JSON renderings of one reading, for `--once`.

use std::fmt;

use serde::Serialize;

use crate::analysis::{AlertSummary, Recommendation, group_by_severity};
use crate::format::format_uptime;
use crate::system::snapshot::{BYTES_PER_MB, MetricsSnapshot};

const RULE: &str = "────────────────";

pub struct Report<'a> {
    snapshot: &'a MetricsSnapshot,
    recommendations: &'a [Recommendation],
}

impl<'a> Report<'a> {
    pub fn new(snapshot: &'a MetricsSnapshot, recommendations: &'a [Recommendation]) -> Self {
        Self {
            snapshot,
            recommendations,
        }
    }

    fn write_status(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.snapshot;
        writeln!(f, "Current System Status")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "CPU: {} ({} cores)", s.cpu_model, s.cpu_core_count)?;
        writeln!(f, "  Usage: {:.1}%", s.cpu_usage_percent)?;
        writeln!(
            f,
            "  Load Average: {:.2}, {:.2}, {:.2}",
            s.load_average.one, s.load_average.five, s.load_average.fifteen
        )?;
        writeln!(
            f,
            "Memory: {:.1}GB used / {:.1}GB total ({:.1}%)",
            s.memory_used_gb(),
            s.memory_total_gb(),
            s.memory_used_percent()
        )?;
        if s.swap_used_bytes > 0 {
            writeln!(
                f,
                "  Swap: {:.1}MB used / {:.1}MB total",
                s.swap_used_bytes as f64 / BYTES_PER_MB,
                s.swap_total_bytes as f64 / BYTES_PER_MB
            )?;
        }
        writeln!(f, "  Memory Pressure: {}", s.memory_pressure)?;
        if !s.gpu_model.is_empty() {
            writeln!(f, "GPU: {}", s.gpu_model)?;
        }
        if s.uptime_secs > 0 {
            writeln!(f, "Uptime: {}", format_uptime(s.uptime_secs))?;
        }
        Ok(())
    }

    fn write_alerts(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alerts = AlertSummary::from_recommendations(self.recommendations);
        if alerts.is_healthy() {
            return writeln!(f, "System Status: Good");
        }
        writeln!(f, "Active Alerts")?;
        writeln!(f, "{RULE}")?;
        if alerts.critical > 0 {
            writeln!(
                f,
                "● CRITICAL: {} issue(s) need immediate attention",
                alerts.critical
            )?;
        }
        if alerts.high > 0 {
            writeln!(f, "● HIGH: {} issue(s) affecting performance", alerts.high)?;
        }
        Ok(())
    }

    fn write_recommendations(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.recommendations.is_empty() {
            writeln!(f, "Great! No bottlenecks detected")?;
            return writeln!(f, "Your system appears to be running optimally.");
        }

        writeln!(f, "Upgrade Recommendations")?;
        for group in group_by_severity(self.recommendations) {
            writeln!(f)?;
            writeln!(f, "{}", group.severity.label())?;
            writeln!(f, "{RULE}")?;
            for rec in group.recommendations {
                writeln!(f, "• {} ({})", rec.component.label(), rec.reason)?;
                writeln!(f, "  → {}", rec.suggestion)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_status(f)?;
        writeln!(f)?;
        self.write_alerts(f)?;
        writeln!(f)?;
        self.write_recommendations(f)
    }
}

pub fn render_report(snapshot: &MetricsSnapshot, recommendations: &[Recommendation]) -> String {
    Report::new(snapshot, recommendations).to_string()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    snapshot: &'a MetricsSnapshot,
    alerts: AlertSummary,
    recommendations: &'a [Recommendation],
}

pub fn render_json(
    snapshot: &MetricsSnapshot,
    recommendations: &[Recommendation],
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        snapshot,
        alerts: AlertSummary::from_recommendations(recommendations),
        recommendations,
    })
}
