use tracing::info;

use super::aggregate::aggregate;
use crate::db::Database;
use crate::errors::RepolensError;
use crate::github::{resolve_identity, GithubClient, RepoMetadata};
use crate::models::{AnalysisSummary, NewRepository};

impl From<RepoMetadata> for NewRepository {
    fn from(meta: RepoMetadata) -> Self {
        NewRepository {
            full_name: meta.full_name,
            name: meta.name,
            owner: meta.owner.login,
            description: meta.description,
            url: meta.html_url,
            visibility: meta.visibility,
            stars: meta.stargazers_count,
            forks: meta.forks_count,
            watchers: meta.watchers_count,
            language: meta.language,
        }
    }
}

/// Run one analysis pass over a repository URL.
///
/// Resolves the URL, fetches current metadata from GitHub, upserts the
/// repository row, aggregates its stored issues, and persists the derived
/// quality metrics. Issues themselves are never created or mutated here;
/// they arrive through the ingestion endpoint.
///
/// Re-running recomputes from current issue state, so the summary tracks
/// whatever issues exist at call time.
pub async fn analyze(
    db: &Database,
    github: &GithubClient,
    repository_url: &str,
    token: Option<&str>,
) -> Result<AnalysisSummary, RepolensError> {
    let identity = resolve_identity(repository_url)?;

    let metadata = github
        .fetch_repository(&identity.owner, &identity.name, token)
        .await?;

    let repository_id = db.upsert_repository(&NewRepository::from(metadata))?;

    let issues = db.issues_for_repository(repository_id)?;
    let aggregation = aggregate(&issues);

    db.update_repository_metrics(repository_id, aggregation.score, aggregation.total)?;

    info!(
        repository = %identity.full_name(),
        repository_id,
        total_issues = aggregation.total,
        score = aggregation.score,
        "Analysis complete"
    );

    Ok(AnalysisSummary {
        repository_id,
        total_issues: aggregation.total,
        issues_by_severity: aggregation.severity_counts,
        issues_by_type: aggregation.type_counts,
        code_quality_score: aggregation.score,
    })
}
