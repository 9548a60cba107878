//! Record store for normalized issues.
//!
//! The store owns timestamps, bulk atomicity and the `applied` flag.
//! `SqliteStore` is the only implementation; the trait is the seam the
//! ingest pipeline and the HTTP layer are written against.

pub mod error;
pub mod schema;
pub mod sqlite;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize::NormalizedIssue;
use crate::rules::catalog::Priority;

pub use error::{StoreError, StoreResult};
pub use sqlite::SqliteStore;

/// A normalized issue as persisted, with store-assigned timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredIssue {
    pub id: String,
    pub session_id: String,
    pub url: String,
    pub description: String,
    pub fix: String,
    pub priority: Priority,
    pub applied: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate counts over every stored issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreStats {
    pub total: u64,
    pub applied: u64,
    pub unapplied: u64,
    /// Only priorities with at least one issue appear.
    pub by_priority: BTreeMap<Priority, u64>,
    pub unique_urls: u64,
    pub unique_sessions: u64,
}

pub trait IssueStore: Send + Sync {
    /// Insert one issue and return its id.
    fn insert_one(&self, issue: &NormalizedIssue) -> StoreResult<String>;

    /// Insert a batch as a single unit of work. Either every issue is
    /// visible afterwards or none is.
    fn insert_many(&self, issues: &[NormalizedIssue]) -> StoreResult<Vec<String>>;

    /// Set the `applied` flag. Returns `false` when no issue has this id.
    fn update_applied(&self, id: &str, applied: bool) -> StoreResult<bool>;

    /// Issues of one session, newest first.
    fn by_session(&self, session_id: &str) -> StoreResult<Vec<StoredIssue>>;

    /// Issues recorded against one URL across all sessions, newest first.
    fn by_url(&self, url: &str) -> StoreResult<Vec<StoredIssue>>;

    /// Issues not yet applied, optionally restricted to one session, newest first.
    fn unapplied(&self, session_id: Option<&str>) -> StoreResult<Vec<StoredIssue>>;

    /// Delete every issue of a session and return how many were removed.
    fn delete_by_session(&self, session_id: &str) -> StoreResult<usize>;

    fn stats(&self) -> StoreResult<StoreStats>;
}
