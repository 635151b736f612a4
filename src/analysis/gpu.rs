use crate::analysis::recommendation::{Component, Recommendation, Severity};
use crate::system::snapshot::MetricsSnapshot;

/// Identity-based checks only; utilization is not measured.
pub fn analyze_gpu(snapshot: &MetricsSnapshot) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    if !snapshot.has_gpu_identity() {
        return recommendations;
    }

    let model = snapshot.gpu_model.to_lowercase();

    if model.contains("intel") && (model.contains("hd") || model.contains("iris")) {
        recommendations.push(Recommendation::new(
            Component::Gpu,
            Severity::Medium,
            "Using integrated Intel graphics",
            "For gaming or graphics-intensive work, consider a system with dedicated GPU.",
        ));
    }

    if model.contains("radeon") && (model.contains("r5") || model.contains("r7")) {
        recommendations.push(Recommendation::new(
            Component::Gpu,
            Severity::Medium,
            "Using older integrated AMD graphics",
            "Consider upgrading to a system with newer integrated or dedicated graphics.",
        ));
    }

    if model.contains("apple") {
        recommendations.push(Recommendation::new(
            Component::Gpu,
            Severity::Low,
            "Using Apple Silicon integrated GPU",
            "Apple Silicon GPUs are generally excellent. Consider Mac Studio/Pro for intensive GPU work.",
        ));
    }

    recommendations
}
