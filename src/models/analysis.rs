use serde::{Deserialize, Serialize};

/// Issue counts grouped by severity. Severities with no issues report 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
}

impl SeverityCounts {
    pub fn total(&self) -> u32 {
        self.low + self.medium + self.high + self.critical
    }
}

/// Issue counts grouped by issue type. Types with no issues report 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCounts {
    pub security: u32,
    pub performance: u32,
    pub code_quality: u32,
    pub accessibility: u32,
    pub bug: u32,
    pub style: u32,
}

/// Result of running the aggregator over a repository's issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregation {
    pub severity_counts: SeverityCounts,
    pub type_counts: TypeCounts,
    pub total: u32,
    /// Quality score clamped to 0..=100.
    pub score: u8,
}

/// Summary returned by one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub repository_id: i64,
    pub total_issues: u32,
    pub issues_by_severity: SeverityCounts,
    pub issues_by_type: TypeCounts,
    pub code_quality_score: u8,
}
