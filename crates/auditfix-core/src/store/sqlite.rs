//! SQLite-backed `IssueStore`.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, Row, params};
use tracing::{debug, info};

use crate::normalize::NormalizedIssue;
use crate::rules::catalog::Priority;
use crate::store::error::{StoreError, StoreResult};
use crate::store::schema;
use crate::store::{IssueStore, StoreStats, StoredIssue};

const SELECT_COLUMNS: &str = "SELECT id, session_id, url, description, fix, priority, applied, created_at, updated_at
     FROM accessibility_issues";

/// Newest first; rowid breaks ties inside one batch (same timestamp).
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, rowid DESC";

const INSERT_ISSUE: &str = "INSERT INTO accessibility_issues
        (id, session_id, url, description, fix, priority, applied, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)";

/// A single SQLite connection behind a mutex.
///
/// All access goes through `with_conn`, so the lock is released on every
/// exit path, including early returns through `?`.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (creating if needed) a database file.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Storage(format!("open {}: {e}", path.display())))?;
        schema::apply_file_pragmas(&conn)?;
        schema::bootstrap(&conn)?;
        info!(path = %path.display(), "opened issue store");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Private in-memory database, for tests and dry runs.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        schema::bootstrap(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Connection) -> StoreResult<T>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::Storage("connection lock poisoned".to_string()))?;
        f(&mut conn)
    }

    fn query_issues(
        &self,
        filter: &str,
        args: &[&dyn rusqlite::ToSql],
    ) -> StoreResult<Vec<StoredIssue>> {
        let sql = format!("{SELECT_COLUMNS} {filter} {NEWEST_FIRST}");
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(&sql)?;
            let issues = stmt
                .query_map(args, map_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(issues)
        })
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn insert(conn: &Connection, issue: &NormalizedIssue, now: &str) -> StoreResult<()> {
    conn.prepare_cached(INSERT_ISSUE)?.execute(params![
        issue.id,
        issue.session_id,
        issue.url,
        issue.description,
        issue.fix,
        issue.priority.as_str(),
        issue.applied,
        now,
    ])?;
    Ok(())
}

fn conversion_err(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| conversion_err(idx, e))
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<StoredIssue> {
    let priority: String = row.get(5)?;
    Ok(StoredIssue {
        id: row.get(0)?,
        session_id: row.get(1)?,
        url: row.get(2)?,
        description: row.get(3)?,
        fix: row.get(4)?,
        priority: priority
            .parse::<Priority>()
            .map_err(|e| conversion_err(5, e))?,
        applied: row.get(6)?,
        created_at: parse_timestamp(row, 7)?,
        updated_at: parse_timestamp(row, 8)?,
    })
}

fn count(conn: &Connection, sql: &str) -> StoreResult<u64> {
    let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
    Ok(n.max(0) as u64)
}

impl IssueStore for SqliteStore {
    fn insert_one(&self, issue: &NormalizedIssue) -> StoreResult<String> {
        self.with_conn(|conn| {
            insert(conn, issue, &now_timestamp())?;
            Ok(issue.id.clone())
        })
    }

    fn insert_many(&self, issues: &[NormalizedIssue]) -> StoreResult<Vec<String>> {
        if issues.is_empty() {
            return Ok(Vec::new());
        }

        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            let now = now_timestamp();
            for issue in issues {
                insert(&tx, issue, &now)?;
            }
            tx.commit()?;
            debug!(count = issues.len(), "inserted issue batch");
            Ok(issues.iter().map(|i| i.id.clone()).collect())
        })
    }

    fn update_applied(&self, id: &str, applied: bool) -> StoreResult<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE accessibility_issues SET applied = ?1, updated_at = ?2 WHERE id = ?3",
                params![applied, now_timestamp(), id],
            )?;
            Ok(changed > 0)
        })
    }

    fn by_session(&self, session_id: &str) -> StoreResult<Vec<StoredIssue>> {
        self.query_issues("WHERE session_id = ?1", &[&session_id])
    }

    fn by_url(&self, url: &str) -> StoreResult<Vec<StoredIssue>> {
        self.query_issues("WHERE url = ?1", &[&url])
    }

    fn unapplied(&self, session_id: Option<&str>) -> StoreResult<Vec<StoredIssue>> {
        match session_id {
            Some(session_id) => {
                self.query_issues("WHERE applied = 0 AND session_id = ?1", &[&session_id])
            }
            None => self.query_issues("WHERE applied = 0", &[]),
        }
    }

    fn delete_by_session(&self, session_id: &str) -> StoreResult<usize> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM accessibility_issues WHERE session_id = ?1",
                params![session_id],
            )?;
            info!(session_id, deleted, "deleted session issues");
            Ok(deleted)
        })
    }

    fn stats(&self) -> StoreResult<StoreStats> {
        self.with_conn(|conn| {
            let mut stats = StoreStats {
                total: count(conn, "SELECT COUNT(*) FROM accessibility_issues")?,
                applied: count(conn, "SELECT COUNT(*) FROM accessibility_issues WHERE applied = 1")?,
                unapplied: count(conn, "SELECT COUNT(*) FROM accessibility_issues WHERE applied = 0")?,
                unique_urls: count(conn, "SELECT COUNT(DISTINCT url) FROM accessibility_issues")?,
                unique_sessions: count(
                    conn,
                    "SELECT COUNT(DISTINCT session_id) FROM accessibility_issues",
                )?,
                ..StoreStats::default()
            };

            let mut stmt = conn.prepare(
                "SELECT priority, COUNT(*) FROM accessibility_issues GROUP BY priority",
            )?;
            let rows = stmt.query_map([], |row| {
                let priority: String = row.get(0)?;
                let n: i64 = row.get(1)?;
                let priority = priority
                    .parse::<Priority>()
                    .map_err(|e| conversion_err(0, e))?;
                Ok((priority, n.max(0) as u64))
            })?;
            for row in rows {
                let (priority, n) = row?;
                stats.by_priority.insert(priority, n);
            }

            Ok(stats)
        })
    }
}
