//! HTTP transport over the issue store.
//!
//! Routes live under `/api/accessibility`. Handlers only translate between
//! HTTP and store calls; all normalization happens in `auditfix_core`.

mod error;
mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, patch, post},
};
use auditfix_core::store::IssueStore;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn IssueStore>,
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/db/stats", get(handlers::stats))
        .route("/db/ingest", post(handlers::ingest))
        .route(
            "/db/issues/session/:session_id",
            get(handlers::issues_by_session).delete(handlers::delete_session),
        )
        .route("/db/issues/url", get(handlers::issues_by_url))
        .route("/db/issues/unapplied", get(handlers::unapplied_issues))
        .route("/db/issues/:issue_id", patch(handlers::update_issue));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/accessibility", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "serving HTTP API");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
