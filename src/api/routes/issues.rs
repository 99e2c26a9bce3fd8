use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::models::{page_params, CreateIssueRequest, IssueListQuery};
use crate::api::AppState;
use crate::db::IssueFilter;
use crate::errors::RepolensError;
use crate::models::{CodeIssue, IssueType, NewIssue, Severity};

const MAX_FILE_PATH_LEN: usize = 500;

pub async fn list_repository_issues(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<IssueListQuery>,
) -> Result<Json<Vec<CodeIssue>>, RepolensError> {
    if state.db.find_repository(id)?.is_none() {
        return Err(RepolensError::not_found("Repository", id));
    }

    let (skip, limit) = page_params(query.skip, query.limit)?;
    let filter = IssueFilter {
        severity: query.severity.as_deref().map(Severity::parse).transpose()?,
        issue_type: query.issue_type.as_deref().map(IssueType::parse).transpose()?,
        offset: skip,
        limit,
    };

    let issues = state.db.list_issues(id, &filter)?;
    Ok(Json(issues))
}

/// Ingestion endpoint for externally detected issues. Enum fields and the
/// line number are validated before anything is written.
pub async fn create_repository_issue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CreateIssueRequest>,
) -> Result<(StatusCode, Json<CodeIssue>), RepolensError> {
    if state.db.find_repository(id)?.is_none() {
        return Err(RepolensError::not_found("Repository", id));
    }

    if req.line_number < 1 {
        return Err(RepolensError::Validation(
            "line_number must be at least 1".into(),
        ));
    }
    if req.file_path.is_empty() || req.file_path.len() > MAX_FILE_PATH_LEN {
        return Err(RepolensError::Validation(format!(
            "file_path must be between 1 and {MAX_FILE_PATH_LEN} characters"
        )));
    }
    if req.message.is_empty() {
        return Err(RepolensError::Validation("message must not be empty".into()));
    }

    let issue = state.db.insert_issue(
        id,
        &NewIssue {
            file_path: req.file_path,
            line_number: req.line_number,
            issue_type: IssueType::parse(&req.issue_type)?,
            severity: Severity::parse(&req.severity)?,
            category: req.category.unwrap_or_else(|| "codeQuality".to_string()),
            message: req.message,
            code: req.code,
            suggestion: req.suggestion,
        },
    )?;

    Ok((StatusCode::CREATED, Json(issue)))
}
