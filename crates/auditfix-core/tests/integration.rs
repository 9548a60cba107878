use std::path::PathBuf;

use auditfix_core::normalize::{Normalized, SequentialIds, normalize, normalize_with};
use auditfix_core::raw::read::read_report;
use auditfix_core::rules::catalog::Priority;
use auditfix_core::store::{IssueStore, SqliteStore};

/// Path to the fixtures directory relative to the crate root.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Reads a fixture and normalizes it with deterministic ids.
fn normalize_fixture(name: &str) -> Normalized {
    let ctx = read_report(&fixtures_dir().join(name))
        .unwrap_or_else(|e| panic!("failed to read {name}: {e}"));
    normalize_with(
        &ctx.document,
        "session-1",
        "https://shop.example.com",
        &mut SequentialIds::new("issue"),
    )
}

fn find<'a>(n: &'a Normalized, description: &str) -> &'a auditfix_core::normalize::NormalizedIssue {
    n.issues
        .iter()
        .find(|i| i.description == description)
        .unwrap_or_else(|| panic!("no issue with description {description:?}"))
}

#[test]
fn mixed_producers_emit_expected_records_in_order() {
    let n = normalize_fixture("mixed_producers.json");

    let descriptions: Vec<&str> = n.issues.iter().map(|i| i.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec![
            "[images - alt_text] Image missing alt attribute",
            "[images - alt_text] Alt text duplicates caption",
            "[images - svg_titles] Inline SVG has no title",
            "[forms - labels] Input has no associated label",
            "[color_contrast - body_text] Contrast ratio 3.1:1 below 4.5:1",
            "[landmarks - nav] Multiple nav elements without labels",
        ]
    );
}

#[test]
fn mixed_producers_classify_priorities() {
    let n = normalize_fixture("mixed_producers.json");

    assert_eq!(
        find(&n, "[images - alt_text] Image missing alt attribute").priority,
        Priority::Add
    );
    assert_eq!(
        find(&n, "[images - alt_text] Alt text duplicates caption").priority,
        Priority::Update
    );
    assert_eq!(
        find(&n, "[images - svg_titles] Inline SVG has no title").priority,
        Priority::Review
    );
    assert_eq!(
        find(&n, "[forms - labels] Input has no associated label").priority,
        Priority::Add
    );
    assert_eq!(
        find(&n, "[color_contrast - body_text] Contrast ratio 3.1:1 below 4.5:1").priority,
        Priority::Update
    );
    // Numeric severity is treated as absent.
    assert_eq!(
        find(&n, "[landmarks - nav] Multiple nav elements without labels").priority,
        Priority::Review
    );
}

#[test]
fn mixed_producers_resolve_fix_aliases() {
    let n = normalize_fixture("mixed_producers.json");

    assert_eq!(
        find(&n, "[images - svg_titles] Inline SVG has no title").fix,
        "Add a <title> element"
    );
    assert_eq!(
        find(&n, "[forms - labels] Input has no associated label").fix,
        "Wrap the input in a <label> or use aria-labelledby"
    );
}

#[test]
fn mixed_producers_category_counts() {
    let n = normalize_fixture("mixed_producers.json");

    let counts: Vec<(&str, usize)> = n
        .category_counts
        .iter()
        .map(|(k, v)| (k.as_str(), *v))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("images", 3),
            ("forms", 1),
            ("color_contrast", 1),
            ("landmarks", 1),
        ]
    );
    assert!(!n.category_counts.contains_key("summary"));
    assert_eq!(n.category_counts.values().sum::<usize>(), n.issues_found());
}

#[test]
fn every_record_carries_session_and_url() {
    let n = normalize_fixture("mixed_producers.json");

    assert!(n.issues.iter().all(|i| i.session_id == "session-1"));
    assert!(n.issues.iter().all(|i| i.url == "https://shop.example.com"));
    assert!(n.issues.iter().all(|i| !i.applied));
}

#[test]
fn report_without_results_normalizes_to_nothing() {
    let n = normalize_fixture("no_results.json");

    assert!(n.issues.is_empty());
    assert!(n.category_counts.is_empty());
}

#[test]
fn repeated_ingest_appends_new_identities() {
    let ctx = read_report(&fixtures_dir().join("mixed_producers.json")).unwrap();
    let store = SqliteStore::open_in_memory().unwrap();

    let first = auditfix_core::ingest(&store, &ctx.document, "s1", "https://shop.example.com")
        .expect("first ingest");
    let second = auditfix_core::ingest(&store, &ctx.document, "s1", "https://shop.example.com")
        .expect("second ingest");

    assert_eq!(first, second);
    assert_eq!(first.issues_stored, 6);

    let stored = store.by_session("s1").unwrap();
    assert_eq!(stored.len(), 12);

    let mut ids: Vec<&str> = stored.iter().map(|i| i.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 12);
}

#[test]
fn ingested_session_lifecycle() {
    let ctx = read_report(&fixtures_dir().join("mixed_producers.json")).unwrap();
    let store = SqliteStore::open_in_memory().unwrap();

    auditfix_core::ingest(&store, &ctx.document, "s1", "https://shop.example.com").unwrap();
    auditfix_core::ingest(&store, &ctx.document, "s2", "https://shop.example.com").unwrap();

    let target = store.by_session("s1").unwrap()[0].id.clone();
    assert!(store.update_applied(&target, true).unwrap());

    let stats = store.stats().unwrap();
    assert_eq!(stats.total, 12);
    assert_eq!(stats.applied, 1);
    assert_eq!(stats.unapplied, 11);
    assert_eq!(stats.unique_sessions, 2);
    assert_eq!(stats.unique_urls, 1);
    assert_eq!(stats.by_priority.get(&Priority::Add), Some(&4));
    assert_eq!(stats.by_priority.get(&Priority::Update), Some(&4));
    assert_eq!(stats.by_priority.get(&Priority::Review), Some(&4));

    assert_eq!(store.unapplied(Some("s1")).unwrap().len(), 5);
    assert_eq!(store.by_url("https://shop.example.com").unwrap().len(), 12);

    assert_eq!(store.delete_by_session("s1").unwrap(), 6);
    assert!(store.by_session("s1").unwrap().is_empty());
    assert_eq!(store.stats().unwrap().total, 6);
}

#[test]
fn default_normalize_uses_uuid_ids() {
    let ctx = read_report(&fixtures_dir().join("mixed_producers.json")).unwrap();
    let n = normalize(&ctx.document, "s", "u");

    assert!(n.issues.iter().all(|i| i.id.len() == 36));
}
