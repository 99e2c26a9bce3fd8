use serde::{Deserialize, Serialize};

/// A registered repository row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: i64,
    /// Canonical "owner/name" identifier, unique in the store.
    pub full_name: String,
    pub name: String,
    pub owner: String,
    pub description: Option<String>,
    pub url: String,
    pub visibility: Option<String>,
    pub stars: Option<i64>,
    pub forks: Option<i64>,
    pub watchers: Option<i64>,
    pub language: Option<String>,
    /// Derived quality score in 0..=100, set by the analysis pipeline.
    pub code_quality: Option<i64>,
    pub issues_count: Option<i64>,
    pub last_updated: Option<String>,
}

/// Payload for inserting a repository row. Quality fields start unset.
#[derive(Debug, Clone)]
pub struct NewRepository {
    pub full_name: String,
    pub name: String,
    pub owner: String,
    pub description: Option<String>,
    pub url: String,
    pub visibility: Option<String>,
    pub stars: Option<i64>,
    pub forks: Option<i64>,
    pub watchers: Option<i64>,
    pub language: Option<String>,
}

/// Partial update for PATCH; unset fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryUpdate {
    pub description: Option<String>,
    pub visibility: Option<String>,
    pub stars: Option<i64>,
    pub forks: Option<i64>,
    pub watchers: Option<i64>,
    pub language: Option<String>,
    pub code_quality: Option<i64>,
    pub issues_count: Option<i64>,
}

impl RepositoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.visibility.is_none()
            && self.stars.is_none()
            && self.forks.is_none()
            && self.watchers.is_none()
            && self.language.is_none()
            && self.code_quality.is_none()
            && self.issues_count.is_none()
    }
}
