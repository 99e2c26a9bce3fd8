use std::time::Duration;

use crate::errors::RepolensError;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GITHUB_TIMEOUT_SECS: u64 = 30;

/// Process-wide settings, constructed once at startup and passed by
/// reference into the external client and orchestrator.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default GitHub token used when the caller supplies none.
    pub github_token: Option<String>,
    pub github_api_url: String,
    pub github_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, RepolensError> {
        let github_token = env_non_empty("GITHUB_TOKEN");

        let github_api_url = env_non_empty("REPOLENS_GITHUB_API_URL")
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());

        let timeout_secs = match env_non_empty("REPOLENS_GITHUB_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                RepolensError::Config(format!(
                    "REPOLENS_GITHUB_TIMEOUT_SECS must be an integer, got '{raw}'"
                ))
            })?,
            None => DEFAULT_GITHUB_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(RepolensError::Config(
                "REPOLENS_GITHUB_TIMEOUT_SECS must be greater than zero".into(),
            ));
        }

        Ok(Self {
            github_token,
            github_api_url,
            github_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            github_timeout: Duration::from_secs(DEFAULT_GITHUB_TIMEOUT_SECS),
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.github_api_url, DEFAULT_GITHUB_API_URL);
        assert_eq!(config.github_timeout, Duration::from_secs(30));
        assert!(config.github_token.is_none());
    }

    // Single test to avoid parallel runs racing on the shared env var.
    #[test]
    fn test_config_from_env_timeout() {
        std::env::set_var("REPOLENS_GITHUB_TIMEOUT_SECS", "10");
        let config = Config::from_env().unwrap();
        assert_eq!(config.github_timeout, Duration::from_secs(10));

        std::env::set_var("REPOLENS_GITHUB_TIMEOUT_SECS", "soon");
        assert!(Config::from_env().is_err());

        std::env::set_var("REPOLENS_GITHUB_TIMEOUT_SECS", "0");
        assert!(Config::from_env().is_err());

        std::env::remove_var("REPOLENS_GITHUB_TIMEOUT_SECS");
    }
}
