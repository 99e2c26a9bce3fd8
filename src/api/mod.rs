pub mod auth;
pub mod errors;
pub mod models;
pub mod routes;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Database;
use crate::errors::RepolensError;
use crate::github::GithubClient;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub github: GithubClient,
}

pub fn create_app_state(db_path: &str, config: &Config) -> Result<AppState, RepolensError> {
    let db = Database::new(db_path)?;
    let github = GithubClient::new(config)?;
    Ok(AppState { db, github })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", axum::routing::get(routes::health::health_check))
        .route("/api/health/live", axum::routing::get(routes::health::liveness_check))
        .route("/api/health/ready", axum::routing::get(routes::health::readiness_check))
        .route("/api/analyze", axum::routing::post(routes::analysis::analyze_repository))
        .route(
            "/api/repositories",
            axum::routing::post(routes::repositories::create_repository)
                .get(routes::repositories::list_repositories),
        )
        .route(
            "/api/repositories/{id}",
            axum::routing::get(routes::repositories::get_repository)
                .patch(routes::repositories::update_repository)
                .delete(routes::repositories::delete_repository),
        )
        .route(
            "/api/repositories/{id}/issues",
            axum::routing::get(routes::issues::list_repository_issues)
                .post(routes::issues::create_repository_issue),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
