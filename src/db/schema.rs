//! SQL shared by the MySQL and SQLite message stores.
//! Both drivers use `?` placeholders, so the DML is common.

/// Rows returned by the listing endpoint, newest first.
pub const RECENT_LIMIT: i64 = 100;

pub const LIST_RECENT: &str = r#"
SELECT id, author, message, created_at
FROM posts
ORDER BY created_at DESC
LIMIT ?
"#;

pub const DELETE_BY_ID: &str = "DELETE FROM posts WHERE id = ?";

/// MySQL bootstrap for a fresh database; a no-op when the table exists.
pub const MYSQL_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    author VARCHAR(100) NOT NULL,
    message TEXT NOT NULL,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    INDEX idx_posts_created_at (created_at)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

/// SQLite equivalent, used for local development and tests.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    author TEXT NOT NULL,
    message TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts(created_at);
"#;

/// Split a multi-statement script; `sqlx::query` runs one statement at a time.
pub fn statements(script: &str) -> impl Iterator<Item = &str> {
    script.split(';').map(str::trim).filter(|s| !s.is_empty())
}
