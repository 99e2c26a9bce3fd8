use serde::Deserialize;

use crate::errors::RepolensError;

pub const MAX_PAGE_SIZE: i64 = 100;
pub const DEFAULT_PAGE_SIZE: i64 = 100;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub repository_url: String,
}

#[derive(Deserialize)]
pub struct CreateRepositoryRequest {
    pub full_name: String,
    pub name: String,
    pub owner: String,
    pub description: Option<String>,
    pub url: String,
    pub visibility: Option<String>,
    pub stars: Option<i64>,
    pub forks: Option<i64>,
    pub watchers: Option<i64>,
    pub language: Option<String>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct IssueListQuery {
    pub severity: Option<String>,
    pub issue_type: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct CreateIssueRequest {
    pub file_path: String,
    pub line_number: i64,
    pub issue_type: String,
    pub severity: String,
    pub category: Option<String>,
    pub message: String,
    pub code: String,
    pub suggestion: Option<String>,
}

/// Clamp pagination to offset >= 0 and 1 <= limit <= 100.
pub fn page_params(skip: Option<i64>, limit: Option<i64>) -> Result<(i64, i64), RepolensError> {
    let skip = skip.unwrap_or(0);
    if skip < 0 {
        return Err(RepolensError::Validation(
            "skip must be non-negative".into(),
        ));
    }
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
    if limit < 1 || limit > MAX_PAGE_SIZE {
        return Err(RepolensError::Validation(format!(
            "limit must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok((skip, limit))
}
