use std::sync::LazyLock;

use regex::Regex;

use crate::errors::RepolensError;

/// The (owner, name) pair identifying a repository on GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoIdentity {
    pub owner: String,
    pub name: String,
}

impl RepoIdentity {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

const MAX_SEGMENT_LEN: usize = 100;

// Alphanumeric with interior hyphens/underscores; no leading or trailing
// hyphen or underscore.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9_-]*[A-Za-z0-9])?$").unwrap());

fn validate_segment(value: &str, field: &str) -> Result<(), RepolensError> {
    if value.len() > MAX_SEGMENT_LEN {
        return Err(RepolensError::Validation(format!(
            "Invalid {field}: '{value}' exceeds {MAX_SEGMENT_LEN} characters"
        )));
    }
    if !NAME_PATTERN.is_match(value) {
        return Err(RepolensError::Validation(format!(
            "Invalid {field}: '{value}'"
        )));
    }
    Ok(())
}

/// Resolve a repository URL into its (owner, name) identity.
///
/// Accepted forms:
/// - `https://github.com/owner/repo` (also `http://`, `www.github.com`)
/// - `github.com/owner/repo`
/// - `git@github.com:owner/repo`
///
/// Trailing `.git` and `/` are tolerated. Anything else is a validation
/// error, never a transport error.
pub fn resolve_identity(url: &str) -> Result<RepoIdentity, RepolensError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(RepolensError::Validation("Repository URL is empty".into()));
    }

    // ssh form: user@host:owner/repo
    let rest = if let Some((user_host, path)) = trimmed.split_once(':').filter(|(lhs, _)| {
        lhs.contains('@') && !lhs.contains('/')
    }) {
        let host = user_host.split('@').next_back().unwrap_or_default();
        check_host(host)?;
        path
    } else {
        let without_scheme = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .unwrap_or(trimmed);

        let (host, path) = without_scheme
            .split_once('/')
            .ok_or_else(|| invalid_format())?;
        check_host(host)?;
        path
    };

    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < 2 {
        return Err(invalid_format());
    }

    let owner = segments[0];
    let name = segments[1].strip_suffix(".git").unwrap_or(segments[1]);

    validate_segment(owner, "repository owner")?;
    validate_segment(name, "repository name")?;

    Ok(RepoIdentity {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

fn check_host(host: &str) -> Result<(), RepolensError> {
    match host {
        "github.com" | "www.github.com" => Ok(()),
        _ => Err(RepolensError::Validation(format!(
            "URL must be a GitHub repository URL, got host '{host}'"
        ))),
    }
}

fn invalid_format() -> RepolensError {
    RepolensError::Validation(
        "Invalid GitHub repository URL format. Expected: https://github.com/owner/repo".into(),
    )
}
