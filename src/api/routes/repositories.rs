use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::models::{page_params, CreateRepositoryRequest, ListQuery};
use crate::api::AppState;
use crate::errors::RepolensError;
use crate::github::resolve_identity;
use crate::models::{NewRepository, Repository, RepositoryUpdate};

pub async fn create_repository(
    State(state): State<AppState>,
    Json(req): Json<CreateRepositoryRequest>,
) -> Result<(StatusCode, Json<Repository>), RepolensError> {
    // The URL must resolve to a valid GitHub identity before it is stored.
    let identity = resolve_identity(&req.url)?;
    if identity.full_name() != req.full_name {
        return Err(RepolensError::Validation(format!(
            "URL resolves to '{}' but full_name is '{}'",
            identity.full_name(),
            req.full_name
        )));
    }

    let repository = state.db.insert_repository(&NewRepository {
        full_name: req.full_name,
        name: req.name,
        owner: req.owner,
        description: req.description,
        url: req.url,
        visibility: req.visibility,
        stars: req.stars,
        forks: req.forks,
        watchers: req.watchers,
        language: req.language,
    })?;

    Ok((StatusCode::CREATED, Json(repository)))
}

pub async fn list_repositories(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Repository>>, RepolensError> {
    let (skip, limit) = page_params(query.skip, query.limit)?;
    let repositories = state.db.list_repositories(limit, skip)?;
    Ok(Json(repositories))
}

pub async fn get_repository(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Repository>, RepolensError> {
    state
        .db
        .find_repository(id)?
        .map(Json)
        .ok_or_else(|| RepolensError::not_found("Repository", id))
}

pub async fn update_repository(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<RepositoryUpdate>,
) -> Result<Json<Repository>, RepolensError> {
    if let Some(score) = update.code_quality {
        if !(0..=100).contains(&score) {
            return Err(RepolensError::Validation(
                "code_quality must be between 0 and 100".into(),
            ));
        }
    }
    if update.issues_count.is_some_and(|count| count < 0) {
        return Err(RepolensError::Validation(
            "issues_count must be non-negative".into(),
        ));
    }

    // Empty patch: nothing to write, return the current row
    if update.is_empty() {
        return state
            .db
            .find_repository(id)?
            .map(Json)
            .ok_or_else(|| RepolensError::not_found("Repository", id));
    }

    state
        .db
        .update_repository(id, &update)?
        .map(Json)
        .ok_or_else(|| RepolensError::not_found("Repository", id))
}

pub async fn delete_repository(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, RepolensError> {
    if state.db.delete_repository(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(RepolensError::not_found("Repository", id))
    }
}
