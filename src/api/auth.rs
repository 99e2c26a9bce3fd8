use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::errors::RepolensError;

/// Extract a GitHub token from the Authorization header, accepting both
/// `Bearer <token>` and `token <token>` schemes. A missing header is fine
/// (the client falls back to the configured default); a malformed one is
/// an authentication error.
pub fn extract_token(headers: &HeaderMap) -> Result<Option<String>, RepolensError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| {
        RepolensError::Authentication("Authorization header is not valid UTF-8".into())
    })?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") || scheme.eq_ignore_ascii_case("token") =>
        {
            Ok(Some(token.to_string()))
        }
        _ => Err(RepolensError::Authentication(
            "Invalid authorization header format".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_token_missing_header() {
        assert_eq!(extract_token(&HeaderMap::new()).unwrap(), None);
    }

    #[test]
    fn test_extract_token_bearer() {
        let token = extract_token(&headers_with("Bearer ghp_abc123")).unwrap();
        assert_eq!(token.as_deref(), Some("ghp_abc123"));
    }

    #[test]
    fn test_extract_token_token_scheme() {
        let token = extract_token(&headers_with("token ghp_abc123")).unwrap();
        assert_eq!(token.as_deref(), Some("ghp_abc123"));
    }

    #[test]
    fn test_extract_token_case_insensitive_scheme() {
        let token = extract_token(&headers_with("bearer ghp_abc123")).unwrap();
        assert_eq!(token.as_deref(), Some("ghp_abc123"));
    }

    #[test]
    fn test_extract_token_malformed() {
        assert!(extract_token(&headers_with("ghp_abc123")).is_err());
        assert!(extract_token(&headers_with("Basic dXNlcjpwYXNz")).is_err());
        assert!(extract_token(&headers_with("Bearer a b")).is_err());
    }
}
