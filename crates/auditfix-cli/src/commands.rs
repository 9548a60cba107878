use std::sync::Arc;

use anyhow::{Context, Result, bail};
use auditfix_core::normalize::normalize;
use auditfix_core::raw::read::read_report;
use auditfix_core::report::model::{IngestReport, SessionSummary, ToolInfo};
use auditfix_core::report::render;
use auditfix_core::store::{IssueStore, SqliteStore, StoredIssue};
use serde::Serialize;

use crate::args::{Args, Command, OutputFormat};
use crate::config::Config;
use crate::envelope::{
    Deleted, Envelope, IngestedReport, SessionIssues, Statistics, UnappliedIssues, Updated,
    UrlIssues,
};
use crate::http::{self, AppState};

pub fn run(args: Args, config: Config) -> Result<()> {
    let format = args.format;

    match args.command {
        Command::Ingest {
            report,
            session,
            url,
            dry_run,
        } => {
            let ctx = read_report(&report)?;

            let summary = if dry_run {
                let normalized = normalize(&ctx.document, &session, &url);
                SessionSummary::from_normalized(&normalized, &session, &url)
            } else {
                let store = open_store(&config)?;
                auditfix_core::ingest(&store, &ctx.document, &session, &url)
                    .context("failed to store normalized issues")?
            };

            let report = IngestReport::new(tool_info(), ctx.into_source(), dry_run, summary);
            let text = render::render_ingest_text(&report);
            emit(format, &Envelope::success(IngestedReport { report }), text)
        }

        Command::Session { session_id } => {
            let issues = open_store(&config)?.by_session(&session_id)?;
            let text = render::render_issues_text(&issues);
            emit(format, &Envelope::success(SessionIssues::new(session_id, issues)), text)
        }

        Command::Url { url } => {
            let issues = open_store(&config)?.by_url(&url)?;
            let text = render::render_issues_text(&issues);
            emit(format, &Envelope::success(UrlIssues::new(url, issues)), text)
        }

        Command::Unapplied { session } => {
            let issues: Vec<StoredIssue> = open_store(&config)?.unapplied(session.as_deref())?;
            let text = render::render_issues_text(&issues);
            emit(format, &Envelope::success(UnappliedIssues::new(issues)), text)
        }

        Command::Apply { issue_id, revert } => {
            let applied = !revert;
            if !open_store(&config)?.update_applied(&issue_id, applied)? {
                bail!("issue not found: {issue_id}");
            }
            let updated = Updated::new(&issue_id, applied);
            let text = format!("{}\n", updated.message);
            emit(format, &Envelope::success(updated), text)
        }

        Command::DeleteSession { session_id } => {
            let deleted = open_store(&config)?.delete_by_session(&session_id)?;
            let deleted = Deleted::new(&session_id, deleted);
            let text = format!("{}\n", deleted.message);
            emit(format, &Envelope::success(deleted), text)
        }

        Command::Stats => {
            let statistics = open_store(&config)?.stats()?;
            let text = render::render_stats_text(&statistics);
            emit(format, &Envelope::success(Statistics { statistics }), text)
        }

        Command::Serve { .. } => {
            let store = open_store(&config)?;
            let state = AppState {
                store: Arc::new(store),
            };
            let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
            runtime.block_on(http::serve(&config.server, state))
        }
    }
}

fn open_store(config: &Config) -> Result<SqliteStore> {
    let path = &config.database.path;
    SqliteStore::open(path).with_context(|| format!("failed to open database: {}", path.display()))
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn emit<T: Serialize>(format: OutputFormat, json: &T, text: String) -> Result<()> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(json)? + "\n",
        OutputFormat::Text => text,
    };
    print!("{output}");
    Ok(())
}
