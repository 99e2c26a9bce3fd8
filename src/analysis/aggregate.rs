use crate::models::{Aggregation, CodeIssue, IssueType, Severity, SeverityCounts, TypeCounts};

// Penalty weights per severity level.
const PENALTY_CRITICAL: i64 = 10;
const PENALTY_HIGH: i64 = 5;
const PENALTY_MEDIUM: i64 = 2;
const PENALTY_LOW: i64 = 1;

const BASE_SCORE: i64 = 100;

/// Count issues by severity and type and derive the quality score.
///
/// Pure function: no store access, deterministic for a given issue set.
/// `score = clamp(100 - (10*critical + 5*high + 2*medium + 1*low), 0, 100)`,
/// so an empty issue set scores 100.
pub fn aggregate(issues: &[CodeIssue]) -> Aggregation {
    let mut severity_counts = SeverityCounts::default();
    let mut type_counts = TypeCounts::default();

    for issue in issues {
        match issue.severity {
            Severity::Low => severity_counts.low += 1,
            Severity::Medium => severity_counts.medium += 1,
            Severity::High => severity_counts.high += 1,
            Severity::Critical => severity_counts.critical += 1,
        }
        match issue.issue_type {
            IssueType::Security => type_counts.security += 1,
            IssueType::Performance => type_counts.performance += 1,
            IssueType::CodeQuality => type_counts.code_quality += 1,
            IssueType::Accessibility => type_counts.accessibility += 1,
            IssueType::Bug => type_counts.bug += 1,
            IssueType::Style => type_counts.style += 1,
        }
    }

    let total = severity_counts.total();
    let penalty = PENALTY_CRITICAL * i64::from(severity_counts.critical)
        + PENALTY_HIGH * i64::from(severity_counts.high)
        + PENALTY_MEDIUM * i64::from(severity_counts.medium)
        + PENALTY_LOW * i64::from(severity_counts.low);
    let score = (BASE_SCORE - penalty).clamp(0, 100) as u8;

    Aggregation {
        severity_counts,
        type_counts,
        total,
        score,
    }
}
