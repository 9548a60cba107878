use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "auditfix",
    version,
    about = "Normalize accessibility audit reports into a remediation ledger"
)]
pub struct Args {
    /// SQLite database file (overrides the config file)
    #[arg(long, global = true, env = "AUDITFIX_DB")]
    pub db: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "json")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize an audit report and store its issues
    Ingest {
        /// Path to the audit report JSON
        report: PathBuf,

        /// Session (test run) identifier
        #[arg(long)]
        session: String,

        /// URL the audit ran against
        #[arg(long)]
        url: String,

        /// Normalize and summarize without storing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// List the issues of one session
    Session { session_id: String },

    /// List the issues recorded against a URL
    Url { url: String },

    /// List issues whose fix has not been applied
    Unapplied {
        #[arg(long)]
        session: Option<String>,
    },

    /// Mark an issue's fix as applied
    Apply {
        issue_id: String,

        /// Clear the applied flag instead
        #[arg(long)]
        revert: bool,
    },

    /// Delete every issue of a session
    DeleteSession { session_id: String },

    /// Aggregate counts over the whole store
    Stats,

    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
