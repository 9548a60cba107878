use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::SCHEMA_VERSION;
use crate::normalize::Normalized;

/// Outcome of ingesting one audit report for a session.
///
/// `issues_found` is what the normalizer emitted; `issues_stored` is what
/// the store confirmed. They differ only on a dry run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSummary {
    pub session_id: String,
    pub url: String,
    pub categories: IndexMap<String, usize>,
    pub issues_found: usize,
    pub issues_stored: usize,
}

impl SessionSummary {
    /// Summary of a normalizer run before anything has been stored.
    pub fn from_normalized(normalized: &Normalized, session_id: &str, url: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            url: url.to_string(),
            categories: normalized.category_counts.clone(),
            issues_found: normalized.issues_found(),
            issues_stored: 0,
        }
    }

    pub fn with_stored(mut self, stored: usize) -> Self {
        self.issues_stored = stored;
        self
    }
}

/// Top-level ingest report written by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub schema_version: String,
    pub tool: ToolInfo,
    pub source: SourceInfo,
    pub dry_run: bool,
    pub summary: SessionSummary,
}

impl IngestReport {
    pub fn new(tool: ToolInfo, source: SourceInfo, dry_run: bool, summary: SessionSummary) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            source,
            dry_run,
            summary,
        }
    }
}

/// Tool metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// The raw report this ingest was computed from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceInfo {
    pub path: Option<String>,
    pub size_bytes: u64,
    pub sha256: String,
}
