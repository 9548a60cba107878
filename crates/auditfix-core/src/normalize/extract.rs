//! Flattens a nested audit report into normalized issue records.
//!
//! Expected shape:
//!
//! ```text
//! { "results": { <category>: { <check>: <check data> } } }
//! ```
//!
//! Check data carries its findings under `issues`, else `violations`,
//! else is itself a single finding when it has an `issue` key. Anything
//! that does not fit contributes nothing; normalization has no error path.

use std::slice;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::normalize::ids::{IdSource, UuidV4};
use crate::normalize::model::{Normalized, NormalizedIssue};
use crate::raw::node;
use crate::rules::catalog::Severity;
use crate::rules::classify::classify;

const ISSUE_TEXT_KEYS: [&str; 3] = ["issue", "description", "message"];
const FIX_TEXT_KEYS: [&str; 3] = ["fix", "recommendation", "how_to_fix"];

/// Normalize a report using random v4 ids.
pub fn normalize(raw: &Value, session_id: &str, url: &str) -> Normalized {
    normalize_with(raw, session_id, url, &mut UuidV4)
}

/// Normalize a report, drawing one id per emitted record from `ids`.
pub fn normalize_with(
    raw: &Value,
    session_id: &str,
    url: &str,
    ids: &mut dyn IdSource,
) -> Normalized {
    let mut out = Normalized::default();

    let Some(results) = node::mapping(raw)
        .and_then(|doc| doc.get("results"))
        .and_then(node::mapping)
    else {
        warn!(session_id, url, "report has no `results` mapping; nothing to normalize");
        return out;
    };

    for (category, checks) in results {
        let Some(checks) = node::mapping(checks) else {
            debug!(category = %category, "skipping category: checks are not a mapping");
            continue;
        };

        let mut emitted = 0usize;

        for (check_name, check_value) in checks {
            let Some(check_data) = node::mapping(check_value) else {
                debug!(category = %category, check = %check_name, "skipping check: data is not a mapping");
                continue;
            };

            for item in findings(check_value, check_data) {
                let Some(item) = node::mapping(item) else {
                    continue;
                };
                if let Some(issue) = to_issue(item, category, check_name, session_id, url, ids) {
                    out.issues.push(issue);
                    emitted += 1;
                }
            }
        }

        if emitted > 0 {
            out.category_counts.insert(category.clone(), emitted);
        }
    }

    if out.is_empty() {
        info!(session_id, url, "report matched no recognized issue shape");
    }

    out
}

/// Resolve the findings list of a check: `issues`, then `violations`,
/// then the check itself when it carries an `issue` key.
///
/// `check_data` must be the mapping view of `check_value`.
fn findings<'a>(check_value: &'a Value, check_data: &'a Map<String, Value>) -> &'a [Value] {
    if let Some(list) = node::sequence(check_data, "issues") {
        list
    } else if let Some(list) = node::sequence(check_data, "violations") {
        list
    } else if check_data.contains_key("issue") {
        slice::from_ref(check_value)
    } else {
        &[]
    }
}

fn to_issue(
    item: &Map<String, Value>,
    category: &str,
    check_name: &str,
    session_id: &str,
    url: &str,
    ids: &mut dyn IdSource,
) -> Option<NormalizedIssue> {
    let issue_text = node::first_text(item, &ISSUE_TEXT_KEYS)?;
    let fix_text = node::first_text(item, &FIX_TEXT_KEYS)?;

    let severity = Severity::from_value(item.get("severity"));
    if severity == Severity::Unrecognized {
        debug!(
            category,
            check = check_name,
            severity = ?item.get("severity"),
            "unrecognized severity; defaulting to review"
        );
    }

    Some(NormalizedIssue {
        id: ids.next_id(),
        session_id: session_id.to_string(),
        url: url.to_string(),
        description: format!("[{category} - {check_name}] {issue_text}"),
        fix: fix_text.to_string(),
        priority: classify(severity),
        applied: false,
    })
}
