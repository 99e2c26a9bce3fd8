use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepolensError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("{resource} with identifier '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{service} service error: {message}")]
    ExternalService {
        service: &'static str,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RepolensError {
    pub fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        RepolensError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn github(message: impl Into<String>) -> Self {
        RepolensError::ExternalService {
            service: "GitHub",
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = RepolensError::not_found("Repository", 42);
        assert_eq!(err.to_string(), "Repository with identifier '42' not found");
    }

    #[test]
    fn test_external_service_message() {
        let err = RepolensError::github("API returned status 503");
        assert_eq!(err.to_string(), "GitHub service error: API returned status 503");
    }
}
