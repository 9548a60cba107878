pub mod normalize;
pub mod raw;
pub mod report;
pub mod rules;
pub mod store;

use serde_json::Value;
use tracing::info;

use crate::normalize::{IdSource, UuidV4, normalize_with};
use crate::report::model::SessionSummary;
use crate::store::{IssueStore, StoreResult};

pub const TOOL_NAME: &str = "auditfix";

/// JSON schema version of ingest reports.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Normalize a raw audit report and store every resulting issue in one batch.
pub fn ingest(
    store: &dyn IssueStore,
    raw: &Value,
    session_id: &str,
    url: &str,
) -> StoreResult<SessionSummary> {
    ingest_with(store, raw, session_id, url, &mut UuidV4)
}

/// `ingest` with an explicit id source.
pub fn ingest_with(
    store: &dyn IssueStore,
    raw: &Value,
    session_id: &str,
    url: &str,
    ids: &mut dyn IdSource,
) -> StoreResult<SessionSummary> {
    let normalized = normalize_with(raw, session_id, url, ids);
    let summary = SessionSummary::from_normalized(&normalized, session_id, url);

    let stored = store.insert_many(&normalized.issues)?;

    info!(
        session_id,
        url,
        found = summary.issues_found,
        stored = stored.len(),
        "ingested audit report"
    );

    Ok(summary.with_stored(stored.len()))
}
