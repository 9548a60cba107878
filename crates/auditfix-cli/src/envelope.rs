//! `{ "status": "success", ...payload }` response bodies, shared by the
//! CLI's JSON output and the HTTP API.

use auditfix_core::report::model::{IngestReport, SessionSummary};
use auditfix_core::store::{StoreStats, StoredIssue};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(payload: T) -> Self {
        Self {
            status: "success",
            payload,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Statistics {
    pub statistics: StoreStats,
}

#[derive(Debug, Serialize)]
pub struct SessionIssues {
    pub session_id: String,
    pub total_issues: usize,
    pub issues: Vec<StoredIssue>,
}

impl SessionIssues {
    pub fn new(session_id: String, issues: Vec<StoredIssue>) -> Self {
        Self {
            session_id,
            total_issues: issues.len(),
            issues,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UrlIssues {
    pub url: String,
    pub total_issues: usize,
    pub issues: Vec<StoredIssue>,
}

impl UrlIssues {
    pub fn new(url: String, issues: Vec<StoredIssue>) -> Self {
        Self {
            url,
            total_issues: issues.len(),
            issues,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UnappliedIssues {
    pub total_unapplied: usize,
    pub issues: Vec<StoredIssue>,
}

impl UnappliedIssues {
    pub fn new(issues: Vec<StoredIssue>) -> Self {
        Self {
            total_unapplied: issues.len(),
            issues,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Updated {
    pub message: String,
    pub applied: bool,
}

impl Updated {
    pub fn new(issue_id: &str, applied: bool) -> Self {
        Self {
            message: format!("Issue {issue_id} updated successfully"),
            applied,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub message: String,
    pub deleted_count: usize,
}

impl Deleted {
    pub fn new(session_id: &str, deleted_count: usize) -> Self {
        Self {
            message: format!("Deleted {deleted_count} issues from session {session_id}"),
            deleted_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Ingested {
    pub summary: SessionSummary,
}

#[derive(Debug, Serialize)]
pub struct IngestedReport {
    pub report: IngestReport,
}
