use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::errors::RepolensError;

impl IntoResponse for RepolensError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            RepolensError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RepolensError::Authentication(_) => StatusCode::UNAUTHORIZED,
            RepolensError::NotFound { .. } => StatusCode::NOT_FOUND,
            RepolensError::Conflict(_) => StatusCode::CONFLICT,
            RepolensError::ExternalService { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
