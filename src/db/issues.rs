use super::Database;
use crate::errors::RepolensError;
use crate::models::{CodeIssue, IssueType, NewIssue, Severity};

/// Optional filters and pagination for issue listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueFilter {
    pub severity: Option<Severity>,
    pub issue_type: Option<IssueType>,
    pub offset: i64,
    pub limit: i64,
}

const ISSUE_COLUMNS: &str = "id, repository_id, file_path, line_number, issue_type, severity, category, message, code, suggestion";

fn row_to_issue(row: &rusqlite::Row) -> rusqlite::Result<CodeIssue> {
    Ok(CodeIssue {
        id: row.get(0)?,
        repository_id: row.get(1)?,
        file_path: row.get(2)?,
        line_number: row.get(3)?,
        issue_type: row.get(4)?,
        severity: row.get(5)?,
        category: row.get(6)?,
        message: row.get(7)?,
        code: row.get(8)?,
        suggestion: row.get(9)?,
    })
}

// Severity is stored as text; rank it explicitly so critical sorts first.
const SEVERITY_RANK: &str = "CASE severity WHEN 'critical' THEN 0 WHEN 'high' THEN 1 WHEN 'medium' THEN 2 WHEN 'low' THEN 3 ELSE 4 END";

impl Database {
    pub fn insert_issue(
        &self,
        repository_id: i64,
        issue: &NewIssue,
    ) -> Result<CodeIssue, RepolensError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO code_issues (repository_id, file_path, line_number, issue_type, severity, category, message, code, suggestion) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                repository_id,
                issue.file_path,
                issue.line_number,
                issue.issue_type,
                issue.severity,
                issue.category,
                issue.message,
                issue.code,
                issue.suggestion,
            ],
        )
        .map_err(|e| RepolensError::Database(format!("Failed to insert issue: {}", e)))?;

        let id = conn.last_insert_rowid();
        Ok(CodeIssue {
            id,
            repository_id,
            file_path: issue.file_path.clone(),
            line_number: issue.line_number,
            issue_type: issue.issue_type,
            severity: issue.severity,
            category: issue.category.clone(),
            message: issue.message.clone(),
            code: issue.code.clone(),
            suggestion: issue.suggestion.clone(),
        })
    }

    /// Every issue owned by the repository, unpaginated. Feeds the aggregator.
    pub fn issues_for_repository(
        &self,
        repository_id: i64,
    ) -> Result<Vec<CodeIssue>, RepolensError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {ISSUE_COLUMNS} FROM code_issues WHERE repository_id = ?1 ORDER BY id"
            ))
            .map_err(|e| RepolensError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt
            .query_map(rusqlite::params![repository_id], row_to_issue)
            .map_err(|e| RepolensError::Database(format!("Query error: {}", e)))?;

        let mut issues = Vec::new();
        for row in rows {
            issues.push(row.map_err(|e| RepolensError::Database(format!("Row error: {}", e)))?);
        }
        Ok(issues)
    }

    /// Filtered, paginated listing ordered by severity (critical first),
    /// then by id.
    pub fn list_issues(
        &self,
        repository_id: i64,
        filter: &IssueFilter,
    ) -> Result<Vec<CodeIssue>, RepolensError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {ISSUE_COLUMNS} FROM code_issues \
                 WHERE repository_id = ?1 \
                   AND (?2 IS NULL OR severity = ?2) \
                   AND (?3 IS NULL OR issue_type = ?3) \
                 ORDER BY {SEVERITY_RANK}, id \
                 LIMIT ?4 OFFSET ?5"
            ))
            .map_err(|e| RepolensError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt
            .query_map(
                rusqlite::params![
                    repository_id,
                    filter.severity,
                    filter.issue_type,
                    filter.limit,
                    filter.offset,
                ],
                row_to_issue,
            )
            .map_err(|e| RepolensError::Database(format!("Query error: {}", e)))?;

        let mut issues = Vec::new();
        for row in rows {
            issues.push(row.map_err(|e| RepolensError::Database(format!("Row error: {}", e)))?);
        }
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewRepository;

    fn seed_repo(db: &Database) -> i64 {
        db.insert_repository(&NewRepository {
            full_name: "octocat/Hello-World".to_string(),
            name: "Hello-World".to_string(),
            owner: "octocat".to_string(),
            description: None,
            url: "https://github.com/octocat/Hello-World".to_string(),
            visibility: Some("public".to_string()),
            stars: None,
            forks: None,
            watchers: None,
            language: None,
        })
        .unwrap()
        .id
    }

    fn make_issue(severity: Severity, issue_type: IssueType) -> NewIssue {
        NewIssue {
            file_path: "src/main.rs".to_string(),
            line_number: 42,
            issue_type,
            severity,
            category: "codeQuality".to_string(),
            message: "test issue".to_string(),
            code: "let x = 1;".to_string(),
            suggestion: None,
        }
    }

    #[test]
    fn test_db_insert_and_load_issues() {
        let db = Database::in_memory().unwrap();
        let repo_id = seed_repo(&db);

        let issue = db
            .insert_issue(repo_id, &make_issue(Severity::High, IssueType::Security))
            .unwrap();
        assert_eq!(issue.repository_id, repo_id);
        assert_eq!(issue.severity, Severity::High);
        assert_eq!(issue.issue_type, IssueType::Security);

        let issues = db.issues_for_repository(repo_id).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, issue.id);
    }

    #[test]
    fn test_db_issues_empty_repository() {
        let db = Database::in_memory().unwrap();
        let repo_id = seed_repo(&db);
        assert!(db.issues_for_repository(repo_id).unwrap().is_empty());
    }

    #[test]
    fn test_db_list_issues_severity_order() {
        let db = Database::in_memory().unwrap();
        let repo_id = seed_repo(&db);

        db.insert_issue(repo_id, &make_issue(Severity::Low, IssueType::Style)).unwrap();
        db.insert_issue(repo_id, &make_issue(Severity::Critical, IssueType::Security)).unwrap();
        db.insert_issue(repo_id, &make_issue(Severity::Medium, IssueType::Bug)).unwrap();

        let filter = IssueFilter { limit: 100, ..Default::default() };
        let issues = db.list_issues(repo_id, &filter).unwrap();
        assert_eq!(issues.len(), 3);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[1].severity, Severity::Medium);
        assert_eq!(issues[2].severity, Severity::Low);
    }

    #[test]
    fn test_db_list_issues_filters() {
        let db = Database::in_memory().unwrap();
        let repo_id = seed_repo(&db);

        db.insert_issue(repo_id, &make_issue(Severity::High, IssueType::Security)).unwrap();
        db.insert_issue(repo_id, &make_issue(Severity::High, IssueType::Performance)).unwrap();
        db.insert_issue(repo_id, &make_issue(Severity::Low, IssueType::Security)).unwrap();

        let by_severity = db
            .list_issues(repo_id, &IssueFilter {
                severity: Some(Severity::High),
                limit: 100,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_severity.len(), 2);

        let by_type = db
            .list_issues(repo_id, &IssueFilter {
                issue_type: Some(IssueType::Security),
                limit: 100,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_type.len(), 2);

        let both = db
            .list_issues(repo_id, &IssueFilter {
                severity: Some(Severity::High),
                issue_type: Some(IssueType::Security),
                limit: 100,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(both.len(), 1);
    }

    #[test]
    fn test_db_list_issues_pagination() {
        let db = Database::in_memory().unwrap();
        let repo_id = seed_repo(&db);
        for _ in 0..5 {
            db.insert_issue(repo_id, &make_issue(Severity::Low, IssueType::Style)).unwrap();
        }

        let page = db
            .list_issues(repo_id, &IssueFilter { limit: 2, offset: 0, ..Default::default() })
            .unwrap();
        assert_eq!(page.len(), 2);

        let tail = db
            .list_issues(repo_id, &IssueFilter { limit: 100, offset: 4, ..Default::default() })
            .unwrap();
        assert_eq!(tail.len(), 1);
    }

    #[test]
    fn test_db_issues_cascade_delete() {
        let db = Database::in_memory().unwrap();
        let repo_id = seed_repo(&db);
        db.insert_issue(repo_id, &make_issue(Severity::High, IssueType::Bug)).unwrap();

        assert_eq!(db.issues_for_repository(repo_id).unwrap().len(), 1);
        assert!(db.delete_repository(repo_id).unwrap());
        assert!(db.issues_for_repository(repo_id).unwrap().is_empty());
    }
}
