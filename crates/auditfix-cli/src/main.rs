use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;
mod config;
mod envelope;
mod http;

fn main() -> Result<()> {
    let args = args::Args::parse();

    let mut config = config::Config::load(args.config.as_deref())?;
    config.apply_overrides(&args);

    init_tracing(&config.log.filter);

    commands::run(args, config)
}

/// Logs go to stderr so JSON on stdout stays machine-readable.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
