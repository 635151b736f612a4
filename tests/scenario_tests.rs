use bottleneck::analysis::{Component, Recommendation, Severity, analyze, group_by_severity};
use bottleneck::system::snapshot::{LoadAverage, MemoryPressure, MetricsSnapshot, UNKNOWN_GPU};
use insta::assert_debug_snapshot;

const GB: u64 = 1024 * 1024 * 1024;

fn gib(value: f64) -> u64 {
    (value * GB as f64) as u64
}

fn of(recommendations: &[Recommendation], component: Component) -> Vec<&Recommendation> {
    recommendations
        .iter()
        .filter(|r| r.component == component)
        .collect()
}

fn severities(recommendations: &[&Recommendation]) -> Vec<Severity> {
    recommendations.iter().map(|r| r.severity).collect()
}

#[test]
fn scenario_a_saturated_older_cpu() {
    let snapshot = MetricsSnapshot {
        cpu_usage_percent: 95.0,
        load_average: LoadAverage::new(8.0, 0.0, 0.0),
        cpu_core_count: 4,
        cpu_model: "Intel Core i5".to_string(),
        ..Default::default()
    };

    let recommendations = analyze(&snapshot);
    assert_debug_snapshot!("scenario_a_cpu_findings", recommendations);
}

#[test]
fn scenario_b_small_machine_nearly_full() {
    let snapshot = MetricsSnapshot {
        memory_total_bytes: 8 * GB,
        memory_used_bytes: gib(7.8),
        memory_pressure: MemoryPressure::Normal,
        ..Default::default()
    };

    let recommendations = analyze(&snapshot);
    let memory = of(&recommendations, Component::Memory);
    assert_eq!(severities(&memory), vec![Severity::Critical, Severity::Medium]);

    assert!(memory[0].reason.starts_with("Memory usage is critical"));
    assert!(
        memory[0].suggestion.contains("Minimum upgrade: 16GB"),
        "{}",
        memory[0].suggestion
    );
    assert!(memory[1].reason.contains("may be limiting"));
    assert!(
        !recommendations
            .iter()
            .any(|r| r.reason.contains("below modern standards"))
    );
}

#[test]
fn scenario_c_heavy_swap_reports_both_targets() {
    let snapshot = MetricsSnapshot {
        memory_total_bytes: 16 * GB,
        memory_used_bytes: 8 * GB,
        swap_used_bytes: 3 * GB,
        swap_total_bytes: 4 * GB,
        memory_pressure: MemoryPressure::Normal,
        ..Default::default()
    };

    let recommendations = analyze(&snapshot);
    let swap: Vec<_> = recommendations
        .iter()
        .filter(|r| r.reason.starts_with("Heavy swap usage"))
        .collect();
    assert_eq!(swap.len(), 1);
    assert_eq!(swap[0].severity, Severity::High);
    assert_eq!(
        swap[0].reason,
        "Heavy swap usage (3.0GB) - system is using disk as memory"
    );
    assert!(swap[0].suggestion.contains("Minimum: 16GB"));
    assert!(swap[0].suggestion.contains("Optimal: 16GB for headroom"));
}

#[test]
fn scenario_d_gpu_identity() {
    let apple = MetricsSnapshot {
        gpu_model: "Apple M2".to_string(),
        ..Default::default()
    };
    let gpu = analyze(&apple);
    assert_eq!(gpu.len(), 1);
    assert_eq!(gpu[0].component, Component::Gpu);
    assert_eq!(gpu[0].severity, Severity::Low);

    let unknown = MetricsSnapshot {
        gpu_model: UNKNOWN_GPU.to_string(),
        ..Default::default()
    };
    assert!(of(&analyze(&unknown), Component::Gpu).is_empty());
}

fn scenario_e(swap_used_bytes: u64) -> MetricsSnapshot {
    let total = 20 * GB;
    MetricsSnapshot {
        memory_total_bytes: total,
        memory_used_bytes: (total as f64 * 0.72) as u64,
        swap_used_bytes,
        swap_total_bytes: 4 * GB,
        memory_pressure: MemoryPressure::Normal,
        ..Default::default()
    }
}

#[test]
fn scenario_e_one_gib_swap_also_trips_moderate_swap() {
    let recommendations = analyze(&scenario_e(GB));
    let memory = of(&recommendations, Component::Memory);

    assert_eq!(
        severities(&memory),
        vec![Severity::Medium, Severity::Medium, Severity::Medium]
    );
    assert!(memory[0].reason.starts_with("Memory usage is moderate"));
    assert_eq!(memory[1].reason, "Moderate swap usage (1.0GB)");
    assert!(memory[2].reason.starts_with("Despite having 20.0GB RAM"));
}

#[test]
fn scenario_e_light_swap_yields_usage_and_capacity_only() {
    let recommendations = analyze(&scenario_e(GB / 4));
    let memory = of(&recommendations, Component::Memory);

    assert_eq!(memory.len(), 2);
    assert!(memory[0].reason.starts_with("Memory usage is moderate"));
    assert!(memory[1].reason.starts_with("Despite having 20.0GB RAM"));
}

#[test]
fn everything_at_once_groups_by_priority() {
    let snapshot = MetricsSnapshot {
        cpu_usage_percent: 75.0,
        load_average: LoadAverage::uniform(1.0),
        cpu_core_count: 8,
        cpu_model: "Intel(R) Core(TM) i3-7100U".to_string(),
        memory_total_bytes: 4 * GB,
        memory_used_bytes: gib(3.9),
        swap_used_bytes: 3 * GB,
        swap_total_bytes: 4 * GB,
        memory_pressure: MemoryPressure::Critical,
        gpu_model: "Intel HD Graphics 620".to_string(),
        ..Default::default()
    };

    let recommendations = analyze(&snapshot);
    let groups = group_by_severity(&recommendations);
    let order: Vec<Severity> = groups.iter().map(|g| g.severity).collect();
    assert_eq!(order, vec![Severity::Critical, Severity::High, Severity::Medium]);

    let critical: Vec<Component> = groups[0]
        .recommendations
        .iter()
        .map(|r| r.component)
        .collect();
    assert_eq!(critical, vec![Component::Memory, Component::Memory]);

    // cpu usage, swap, capacity
    assert_eq!(groups[1].recommendations.len(), 3);
    assert_eq!(groups[1].recommendations[0].component, Component::Cpu);
    // older cpu, intel graphics
    assert_eq!(groups[2].recommendations.len(), 2);
}
