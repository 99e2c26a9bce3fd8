use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::errors::RepolensError;

/// Severity level for a code issue, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Returns a numeric rank where lower values indicate higher severity.
    /// Critical = 0, High = 1, Medium = 2, Low = 3.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Case-insensitive parse. `"CRITICAL"` and `"critical"` both resolve
    /// to [`Severity::Critical`].
    pub fn parse(value: &str) -> Result<Self, RepolensError> {
        match value.to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(RepolensError::Validation(format!(
                "Invalid severity: {value}. Must be one of: low, medium, high, critical"
            ))),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for Severity {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Severity {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        Severity::parse(text).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// Classification of a code issue. Serialized names follow the stored
/// representation, including the camel-cased `codeQuality`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueType {
    Security,
    Performance,
    CodeQuality,
    Accessibility,
    Bug,
    Style,
}

impl IssueType {
    pub const ALL: [IssueType; 6] = [
        IssueType::Security,
        IssueType::Performance,
        IssueType::CodeQuality,
        IssueType::Accessibility,
        IssueType::Bug,
        IssueType::Style,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Security => "security",
            IssueType::Performance => "performance",
            IssueType::CodeQuality => "codeQuality",
            IssueType::Accessibility => "accessibility",
            IssueType::Bug => "bug",
            IssueType::Style => "style",
        }
    }

    pub fn parse(value: &str) -> Result<Self, RepolensError> {
        match value {
            "security" => Ok(IssueType::Security),
            "performance" => Ok(IssueType::Performance),
            "codeQuality" => Ok(IssueType::CodeQuality),
            "accessibility" => Ok(IssueType::Accessibility),
            "bug" => Ok(IssueType::Bug),
            "style" => Ok(IssueType::Style),
            _ => Err(RepolensError::Validation(format!(
                "Invalid issue type: {value}. Must be one of: security, performance, codeQuality, accessibility, bug, style"
            ))),
        }
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for IssueType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for IssueType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        IssueType::parse(text).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// A stored code issue, owned by exactly one repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeIssue {
    pub id: i64,
    pub repository_id: i64,
    pub file_path: String,
    pub line_number: i64,
    pub issue_type: IssueType,
    pub severity: Severity,
    pub category: String,
    pub message: String,
    pub code: String,
    pub suggestion: Option<String>,
}

/// Validated payload for inserting a new issue row.
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub file_path: String,
    pub line_number: i64,
    pub issue_type: IssueType,
    pub severity: Severity,
    pub category: String,
    pub message: String,
    pub code: String,
    pub suggestion: Option<String>,
}
