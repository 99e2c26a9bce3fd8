use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::errors::RepolensError;

const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("repolens/", env!("CARGO_PKG_VERSION"));

/// Repository metadata as returned by the GitHub repository-detail endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoMetadata {
    pub full_name: String,
    pub name: String,
    pub owner: RepoOwner,
    pub description: Option<String>,
    pub html_url: String,
    pub visibility: Option<String>,
    pub stargazers_count: Option<i64>,
    pub forks_count: Option<i64>,
    pub watchers_count: Option<i64>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

/// Thin client over the GitHub REST API. One request per call, no retries;
/// a failed call propagates immediately.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    base_url: String,
    default_token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &Config) -> Result<Self, RepolensError> {
        let client = Client::builder()
            .timeout(config.github_timeout)
            .build()
            .map_err(|e| RepolensError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.github_api_url.trim_end_matches('/').to_string(),
            default_token: config.github_token.clone(),
        })
    }

    /// Fetch repository metadata. A caller-supplied token wins over the
    /// configured default; with neither, the request goes unauthenticated.
    pub async fn fetch_repository(
        &self,
        owner: &str,
        name: &str,
        token: Option<&str>,
    ) -> Result<RepoMetadata, RepolensError> {
        let url = format!("{}/repos/{}/{}", self.base_url, owner, name);
        debug!(owner, name, "Fetching repository metadata from GitHub");

        let mut request = self
            .client
            .get(&url)
            .header("Accept", ACCEPT_HEADER)
            .header("User-Agent", USER_AGENT);

        if let Some(token) = token.or(self.default_token.as_deref()) {
            request = request.header("Authorization", format!("token {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| RepolensError::github(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RepolensError::not_found(
                "Repository",
                format!("{owner}/{name}"),
            ));
        }
        if !status.is_success() {
            return Err(RepolensError::github(format!(
                "API returned status {}",
                status.as_u16()
            )));
        }

        response
            .json::<RepoMetadata>()
            .await
            .map_err(|e| RepolensError::github(format!("Invalid response body: {}", e)))
    }
}
