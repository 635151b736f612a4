use crate::analysis::recommendation::{Component, Recommendation, Severity};
use crate::system::snapshot::MetricsSnapshot;

pub const USAGE_CRITICAL_PERCENT: f64 = 90.0;
pub const USAGE_HIGH_PERCENT: f64 = 70.0;

/// Load above `cores * LOAD_PER_CORE_LIMIT` counts as overloaded.
pub const LOAD_PER_CORE_LIMIT: f64 = 1.5;

const RECENT_GENERATIONS: [&str; 3] = ["11th", "12th", "13th"];

pub fn analyze_cpu(snapshot: &MetricsSnapshot) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let usage = snapshot.cpu_usage_percent;

    if usage > USAGE_CRITICAL_PERCENT {
        recommendations.push(Recommendation::new(
            Component::Cpu,
            Severity::Critical,
            format!("CPU usage is very high ({usage:.1}%)"),
            "Consider upgrading to a faster CPU or adding more cores. Close unnecessary applications.",
        ));
    } else if usage > USAGE_HIGH_PERCENT {
        recommendations.push(Recommendation::new(
            Component::Cpu,
            Severity::High,
            format!("CPU usage is high ({usage:.1}%)"),
            "Monitor CPU usage patterns. Consider CPU upgrade if consistently high.",
        ));
    }

    let cores = snapshot.cpu_core_count;
    let load = snapshot.load_average.one;
    if cores > 0 && load > cores as f64 * LOAD_PER_CORE_LIMIT {
        recommendations.push(Recommendation::new(
            Component::Cpu,
            Severity::High,
            format!("Load average ({load:.2}) is high for {cores} cores"),
            "System is overloaded. Consider upgrading to more CPU cores or optimizing running processes.",
        ));
    }

    if is_older_generation(&snapshot.cpu_model) {
        recommendations.push(Recommendation::new(
            Component::Cpu,
            Severity::Medium,
            "CPU model appears to be older generation",
            "Consider upgrading to a newer CPU for better performance and efficiency.",
        ));
    }

    recommendations
}

/// Textual heuristic for dated Intel parts. The generation exclusion only
/// applies to the i5 branch: a "12th Gen Core i3" still matches.
pub fn is_older_generation(model: &str) -> bool {
    let model = model.to_lowercase();
    if !model.contains("intel") {
        return false;
    }

    let recent = RECENT_GENERATIONS.iter().any(|g| model.contains(g));
    model.contains("core 2") || model.contains("core i3") || (model.contains("core i5") && !recent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::snapshot::LoadAverage;

    fn snapshot(usage: f64, cores: usize, load1: f64, model: &str) -> MetricsSnapshot {
        MetricsSnapshot {
            cpu_usage_percent: usage,
            load_average: LoadAverage::new(load1, 0.0, 0.0),
            cpu_core_count: cores,
            cpu_model: model.to_string(),
            ..Default::default()
        }
    }

    fn severities(recs: &[Recommendation]) -> Vec<Severity> {
        recs.iter().map(|r| r.severity).collect()
    }

    #[test]
    fn usage_ladder_boundaries_are_exclusive() {
        assert!(analyze_cpu(&snapshot(70.0, 8, 0.0, "")).is_empty());
        assert_eq!(
            severities(&analyze_cpu(&snapshot(70.1, 8, 0.0, ""))),
            vec![Severity::High]
        );
        assert_eq!(
            severities(&analyze_cpu(&snapshot(90.0, 8, 0.0, ""))),
            vec![Severity::High]
        );
        assert_eq!(
            severities(&analyze_cpu(&snapshot(90.5, 8, 0.0, ""))),
            vec![Severity::Critical]
        );
    }

    #[test]
    fn usage_reason_embeds_reading() {
        let recs = analyze_cpu(&snapshot(95.0, 8, 0.0, ""));
        assert_eq!(recs[0].reason, "CPU usage is very high (95.0%)");
    }

    #[test]
    fn load_rule_compares_against_cores() {
        assert!(analyze_cpu(&snapshot(0.0, 4, 6.0, "")).is_empty());
        let recs = analyze_cpu(&snapshot(0.0, 4, 6.5, ""));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].severity, Severity::High);
        assert_eq!(recs[0].reason, "Load average (6.50) is high for 4 cores");
    }

    #[test]
    fn load_rule_is_silent_without_core_count() {
        assert!(analyze_cpu(&snapshot(0.0, 0, 12.0, "")).is_empty());
    }

    #[test]
    fn older_generation_heuristic() {
        assert!(!is_older_generation("Intel(R) Core(TM)2 Duo"));
        assert!(is_older_generation("Intel Core 2 Quad Q6600"));
        assert!(is_older_generation("Intel Core i3-2100"));
        assert!(is_older_generation("INTEL CORE I5-8250U"));
        assert!(!is_older_generation("11th Gen Intel Core i5-1135G7"));
        assert!(!is_older_generation("13th Gen Intel(R) Core(TM) i5-1340P"));
        assert!(!is_older_generation("Intel Core i7-8700K"));
        assert!(!is_older_generation("AMD Ryzen 5 core i5 lookalike"));
        assert!(!is_older_generation("Apple M2"));
    }

    #[test]
    fn generation_exclusion_binds_only_to_i5() {
        assert!(is_older_generation("12th Gen Intel Core i3-12100"));
        assert!(is_older_generation("13th Intel Core 2 replica"));
    }
}
