//! Table layout and connection setup.

use rusqlite::Connection;
use tracing::debug;

use crate::store::error::StoreResult;

pub const ISSUES_TABLE: &str = "accessibility_issues";

const CREATE_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS accessibility_issues (
        id          TEXT PRIMARY KEY,
        session_id  TEXT NOT NULL,
        url         TEXT NOT NULL,
        description TEXT NOT NULL,
        fix         TEXT NOT NULL,
        priority    TEXT NOT NULL CHECK (priority IN ('add', 'update', 'review')),
        applied     INTEGER NOT NULL DEFAULT 0,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_issues_session ON accessibility_issues (session_id);
    CREATE INDEX IF NOT EXISTS idx_issues_url ON accessibility_issues (url);
    CREATE INDEX IF NOT EXISTS idx_issues_applied ON accessibility_issues (applied);
";

/// Pragmas for file-backed databases: WAL journal, 5s busy timeout.
pub fn apply_file_pragmas(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )?;
    Ok(())
}

/// Create the issues table and indexes. Safe to run on every open.
pub fn bootstrap(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(CREATE_SCHEMA)?;
    debug!(table = ISSUES_TABLE, "schema ready");
    Ok(())
}
