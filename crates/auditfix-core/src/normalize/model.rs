use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::rules::catalog::Priority;

/// One flat, storage-ready issue record.
///
/// `description` is composed as `[<category> - <check>] <issue text>`.
/// Timestamps are not part of this record; the store assigns them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedIssue {
    pub id: String,
    pub session_id: String,
    pub url: String,
    pub description: String,
    pub fix: String,
    pub priority: Priority,
    pub applied: bool,
}

/// Output of one normalizer run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Normalized {
    /// Records in (category, check, item) traversal order.
    pub issues: Vec<NormalizedIssue>,

    /// Emitted records per category, in document order. Categories that
    /// emitted nothing are absent.
    pub category_counts: IndexMap<String, usize>,
}

impl Normalized {
    pub fn issues_found(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}
