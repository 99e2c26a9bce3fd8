pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS repositories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    owner TEXT NOT NULL,
    description TEXT,
    url TEXT NOT NULL,
    visibility TEXT,
    stars INTEGER,
    forks INTEGER,
    watchers INTEGER,
    language TEXT,
    code_quality INTEGER,
    issues_count INTEGER,
    last_updated TEXT
);

CREATE TABLE IF NOT EXISTS code_issues (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    repository_id INTEGER NOT NULL REFERENCES repositories(id) ON DELETE CASCADE,
    file_path TEXT NOT NULL,
    line_number INTEGER NOT NULL,
    issue_type TEXT NOT NULL,
    severity TEXT NOT NULL,
    category TEXT NOT NULL DEFAULT 'codeQuality',
    message TEXT NOT NULL,
    code TEXT NOT NULL,
    suggestion TEXT
);

CREATE INDEX IF NOT EXISTS idx_repositories_owner ON repositories(owner);
CREATE INDEX IF NOT EXISTS idx_issues_repo ON code_issues(repository_id);
CREATE INDEX IF NOT EXISTS idx_issues_repo_severity ON code_issues(repository_id, severity);
CREATE INDEX IF NOT EXISTS idx_issues_repo_type ON code_issues(repository_id, issue_type);
";
