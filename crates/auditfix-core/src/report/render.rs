use crate::TOOL_NAME;
use crate::report::model::{IngestReport, SessionSummary};
use crate::store::{StoreStats, StoredIssue};

pub fn render_ingest_text(report: &IngestReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", TOOL_NAME, report.tool.version));
    if let Some(path) = &report.source.path {
        out.push_str(&format!("Report: {path} ({} bytes)\n", report.source.size_bytes));
    }
    if report.dry_run {
        out.push_str("Dry run: nothing stored\n");
    }
    out.push_str(&render_summary_text(&report.summary));
    out
}

pub fn render_summary_text(summary: &SessionSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Session: {}\n", summary.session_id));
    out.push_str(&format!("URL: {}\n", summary.url));
    out.push_str(&format!(
        "Issues found: {}, stored: {}\n",
        summary.issues_found, summary.issues_stored
    ));
    out.push_str("Categories:\n");
    for (category, count) in &summary.categories {
        out.push_str(&format!("  - {category}: {count}\n"));
    }
    out
}

pub fn render_issues_text(issues: &[StoredIssue]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} issue(s)\n", issues.len()));
    for issue in issues {
        let mark = if issue.applied { "x" } else { " " };
        out.push_str(&format!(
            "  [{mark}] {} {:<6} {}\n",
            issue.id, issue.priority, issue.description
        ));
        out.push_str(&format!("        fix: {}\n", issue.fix));
    }
    out
}

pub fn render_stats_text(stats: &StoreStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total issues: {}\n", stats.total));
    out.push_str(&format!("Applied: {}\n", stats.applied));
    out.push_str(&format!("Unapplied: {}\n", stats.unapplied));
    out.push_str("By priority:\n");
    for (priority, count) in &stats.by_priority {
        out.push_str(&format!("  - {priority}: {count}\n"));
    }
    out.push_str(&format!("Unique URLs: {}\n", stats.unique_urls));
    out.push_str(&format!("Unique sessions: {}\n", stats.unique_sessions));
    out
}
