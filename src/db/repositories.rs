use chrono::Utc;
use rusqlite::ErrorCode;

use super::Database;
use crate::errors::RepolensError;
use crate::models::{NewRepository, Repository, RepositoryUpdate};

const REPOSITORY_COLUMNS: &str = "id, full_name, name, owner, description, url, visibility, stars, forks, watchers, language, code_quality, issues_count, last_updated";

fn row_to_repository(row: &rusqlite::Row) -> rusqlite::Result<Repository> {
    Ok(Repository {
        id: row.get(0)?,
        full_name: row.get(1)?,
        name: row.get(2)?,
        owner: row.get(3)?,
        description: row.get(4)?,
        url: row.get(5)?,
        visibility: row.get(6)?,
        stars: row.get(7)?,
        forks: row.get(8)?,
        watchers: row.get(9)?,
        language: row.get(10)?,
        code_quality: row.get(11)?,
        issues_count: row.get(12)?,
        last_updated: row.get(13)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

impl Database {
    /// Insert a new repository row. Fails with a conflict if `full_name`
    /// is already registered.
    pub fn insert_repository(&self, repo: &NewRepository) -> Result<Repository, RepolensError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO repositories (full_name, name, owner, description, url, visibility, stars, forks, watchers, language, last_updated) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            rusqlite::params![
                repo.full_name,
                repo.name,
                repo.owner,
                repo.description,
                repo.url,
                repo.visibility,
                repo.stars,
                repo.forks,
                repo.watchers,
                repo.language,
                Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepolensError::Conflict(format!(
                    "Repository '{}' already exists",
                    repo.full_name
                ))
            } else {
                RepolensError::Database(format!("Failed to insert repository: {}", e))
            }
        })?;

        let id = conn.last_insert_rowid();
        drop(conn);
        self.find_repository(id)?
            .ok_or_else(|| RepolensError::Internal("Inserted repository row missing".into()))
    }

    /// Atomic insert-or-refresh keyed on the unique `full_name`. Fetched
    /// metadata is written on both paths; the derived quality fields are
    /// left untouched so a failed analysis never clobbers them.
    pub fn upsert_repository(&self, repo: &NewRepository) -> Result<i64, RepolensError> {
        let conn = self.conn.lock().unwrap();
        let id = conn
            .query_row(
                "INSERT INTO repositories (full_name, name, owner, description, url, visibility, stars, forks, watchers, language, last_updated) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11) \
                 ON CONFLICT(full_name) DO UPDATE SET \
                   name = excluded.name, \
                   owner = excluded.owner, \
                   description = excluded.description, \
                   url = excluded.url, \
                   visibility = excluded.visibility, \
                   stars = excluded.stars, \
                   forks = excluded.forks, \
                   watchers = excluded.watchers, \
                   language = excluded.language, \
                   last_updated = excluded.last_updated \
                 RETURNING id",
                rusqlite::params![
                    repo.full_name,
                    repo.name,
                    repo.owner,
                    repo.description,
                    repo.url,
                    repo.visibility,
                    repo.stars,
                    repo.forks,
                    repo.watchers,
                    repo.language,
                    Utc::now().to_rfc3339(),
                ],
                |row| row.get::<_, i64>(0),
            )
            .map_err(|e| RepolensError::Database(format!("Failed to upsert repository: {}", e)))?;
        Ok(id)
    }

    pub fn find_repository(&self, id: i64) -> Result<Option<Repository>, RepolensError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {REPOSITORY_COLUMNS} FROM repositories WHERE id = ?1"
            ))
            .map_err(|e| RepolensError::Database(format!("Query failed: {}", e)))?;

        match stmt.query_row(rusqlite::params![id], row_to_repository) {
            Ok(repo) => Ok(Some(repo)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RepolensError::Database(format!("Query error: {}", e))),
        }
    }

    pub fn find_repository_by_full_name(
        &self,
        full_name: &str,
    ) -> Result<Option<Repository>, RepolensError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {REPOSITORY_COLUMNS} FROM repositories WHERE full_name = ?1"
            ))
            .map_err(|e| RepolensError::Database(format!("Query failed: {}", e)))?;

        match stmt.query_row(rusqlite::params![full_name], row_to_repository) {
            Ok(repo) => Ok(Some(repo)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RepolensError::Database(format!("Query error: {}", e))),
        }
    }

    /// Newest registrations first (descending id).
    pub fn list_repositories(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Repository>, RepolensError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {REPOSITORY_COLUMNS} FROM repositories ORDER BY id DESC LIMIT ?1 OFFSET ?2"
            ))
            .map_err(|e| RepolensError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt
            .query_map(rusqlite::params![limit, offset], row_to_repository)
            .map_err(|e| RepolensError::Database(format!("Query error: {}", e)))?;

        let mut repositories = Vec::new();
        for row in rows {
            repositories.push(row.map_err(|e| RepolensError::Database(format!("Row error: {}", e)))?);
        }
        Ok(repositories)
    }

    /// Partial update; unset fields keep their stored value.
    pub fn update_repository(
        &self,
        id: i64,
        update: &RepositoryUpdate,
    ) -> Result<Option<Repository>, RepolensError> {
        {
            let conn = self.conn.lock().unwrap();
            let affected = conn
                .execute(
                    "UPDATE repositories SET \
                       description = COALESCE(?2, description), \
                       visibility = COALESCE(?3, visibility), \
                       stars = COALESCE(?4, stars), \
                       forks = COALESCE(?5, forks), \
                       watchers = COALESCE(?6, watchers), \
                       language = COALESCE(?7, language), \
                       code_quality = COALESCE(?8, code_quality), \
                       issues_count = COALESCE(?9, issues_count), \
                       last_updated = ?10 \
                     WHERE id = ?1",
                    rusqlite::params![
                        id,
                        update.description,
                        update.visibility,
                        update.stars,
                        update.forks,
                        update.watchers,
                        update.language,
                        update.code_quality,
                        update.issues_count,
                        Utc::now().to_rfc3339(),
                    ],
                )
                .map_err(|e| RepolensError::Database(format!("Update failed: {}", e)))?;

            if affected == 0 {
                return Ok(None);
            }
        }
        self.find_repository(id)
    }

    /// Single write of the derived analysis metrics.
    pub fn update_repository_metrics(
        &self,
        id: i64,
        code_quality: u8,
        issues_count: u32,
    ) -> Result<(), RepolensError> {
        let conn = self.conn.lock().unwrap();
        let affected = conn
            .execute(
                "UPDATE repositories SET code_quality = ?2, issues_count = ?3, last_updated = ?4 WHERE id = ?1",
                rusqlite::params![id, code_quality, issues_count, Utc::now().to_rfc3339()],
            )
            .map_err(|e| RepolensError::Database(format!("Metrics update failed: {}", e)))?;

        if affected == 0 {
            return Err(RepolensError::not_found("Repository", id));
        }
        Ok(())
    }

    /// Delete a repository; owned issues go with it via the FK cascade,
    /// in the same statement.
    pub fn delete_repository(&self, id: i64) -> Result<bool, RepolensError> {
        let conn = self.conn.lock().unwrap();
        let affected = conn
            .execute("DELETE FROM repositories WHERE id = ?1", rusqlite::params![id])
            .map_err(|e| RepolensError::Database(format!("Delete failed: {}", e)))?;
        Ok(affected > 0)
    }
}
