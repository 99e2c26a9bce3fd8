use axum::{extract::State, http::HeaderMap, Json};

use crate::analysis;
use crate::api::models::AnalyzeRequest;
use crate::api::{auth, AppState};
use crate::errors::RepolensError;
use crate::models::AnalysisSummary;

pub async fn analyze_repository(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisSummary>, RepolensError> {
    let token = auth::extract_token(&headers)?;
    let summary = analysis::analyze(
        &state.db,
        &state.github,
        &req.repository_url,
        token.as_deref(),
    )
    .await?;
    Ok(Json(summary))
}
