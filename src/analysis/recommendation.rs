use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Display order, most urgent first.
    pub const PRIORITY: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Severity::Critical => "Immediate action required",
            Severity::High => "Should address soon",
            Severity::Medium => "Consider for future upgrades",
            Severity::Low => "Optional improvements",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Component {
    #[serde(rename = "CPU")]
    Cpu,
    Memory,
    #[serde(rename = "GPU")]
    Gpu,
}

impl Component {
    pub fn label(self) -> &'static str {
        match self {
            Component::Cpu => "CPU",
            Component::Memory => "Memory",
            Component::Gpu => "GPU",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub component: Component,
    pub severity: Severity,
    pub reason: String,
    pub suggestion: String,
}

impl Recommendation {
    pub fn new(
        component: Component,
        severity: Severity,
        reason: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            component,
            severity,
            reason: reason.into(),
            suggestion: suggestion.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeverityGroup<'a> {
    pub severity: Severity,
    pub recommendations: Vec<&'a Recommendation>,
}

/// Buckets findings by severity, most urgent group first. Empty groups are
/// omitted and production order is kept inside each group.
pub fn group_by_severity(recommendations: &[Recommendation]) -> Vec<SeverityGroup<'_>> {
    Severity::PRIORITY
        .iter()
        .filter_map(|&severity| {
            let members: Vec<&Recommendation> = recommendations
                .iter()
                .filter(|r| r.severity == severity)
                .collect();
            (!members.is_empty()).then_some(SeverityGroup {
                severity,
                recommendations: members,
            })
        })
        .collect()
}

/// Counts backing the "Active Alerts" banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AlertSummary {
    pub critical: usize,
    pub high: usize,
}

impl AlertSummary {
    pub fn from_recommendations(recommendations: &[Recommendation]) -> Self {
        recommendations
            .iter()
            .fold(Self::default(), |mut acc, r| {
                match r.severity {
                    Severity::Critical => acc.critical += 1,
                    Severity::High => acc.high += 1,
                    Severity::Medium | Severity::Low => {}
                }
                acc
            })
    }

    pub fn is_healthy(&self) -> bool {
        self.critical == 0 && self.high == 0
    }
}
