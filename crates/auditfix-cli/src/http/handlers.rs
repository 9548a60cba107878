use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use auditfix_core::store::{IssueStore, StoreResult};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::envelope::{
    Deleted, Envelope, Ingested, SessionIssues, Statistics, UnappliedIssues, Updated, UrlIssues,
};
use crate::http::AppState;
use crate::http::error::ApiError;

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

/// Run a store call off the async runtime.
async fn with_store<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&dyn IssueStore) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || f(store.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn stats(State(state): State<AppState>) -> ApiResult<Statistics> {
    let statistics = with_store(&state, |store| store.stats()).await?;
    Ok(Json(Envelope::success(Statistics { statistics })))
}

pub async fn issues_by_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<SessionIssues> {
    let key = session_id.clone();
    let issues = with_store(&state, move |store| store.by_session(&key)).await?;
    Ok(Json(Envelope::success(SessionIssues::new(session_id, issues))))
}

#[derive(Debug, Deserialize)]
pub struct UrlQuery {
    pub url: String,
}

pub async fn issues_by_url(
    State(state): State<AppState>,
    query: Result<Query<UrlQuery>, QueryRejection>,
) -> ApiResult<UrlIssues> {
    let Query(query) = query?;
    let key = query.url.clone();
    let issues = with_store(&state, move |store| store.by_url(&key)).await?;
    Ok(Json(Envelope::success(UrlIssues::new(query.url, issues))))
}

#[derive(Debug, Deserialize)]
pub struct UnappliedQuery {
    pub session_id: Option<String>,
}

pub async fn unapplied_issues(
    State(state): State<AppState>,
    query: Result<Query<UnappliedQuery>, QueryRejection>,
) -> ApiResult<UnappliedIssues> {
    let Query(query) = query?;
    let issues = with_store(&state, move |store| {
        store.unapplied(query.session_id.as_deref())
    })
    .await?;
    Ok(Json(Envelope::success(UnappliedIssues::new(issues))))
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub applied: bool,
}

pub async fn update_issue(
    State(state): State<AppState>,
    Path(issue_id): Path<String>,
    update: Result<Json<UpdateRequest>, JsonRejection>,
) -> ApiResult<Updated> {
    let Json(update) = update?;
    let key = issue_id.clone();
    let applied = update.applied;
    let found = with_store(&state, move |store| store.update_applied(&key, applied)).await?;
    if !found {
        return Err(ApiError::NotFound("Issue not found".to_string()));
    }
    Ok(Json(Envelope::success(Updated::new(&issue_id, applied))))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Deleted> {
    let key = session_id.clone();
    let deleted = with_store(&state, move |store| store.delete_by_session(&key)).await?;
    Ok(Json(Envelope::success(Deleted::new(&session_id, deleted))))
}

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub session_id: String,
    pub url: String,
    pub report: Value,
}

pub async fn ingest(
    State(state): State<AppState>,
    request: Result<Json<IngestRequest>, JsonRejection>,
) -> ApiResult<Ingested> {
    let Json(request) = request?;
    if request.session_id.trim().is_empty() {
        return Err(ApiError::BadRequest("session_id must not be empty".to_string()));
    }
    if request.url.trim().is_empty() {
        return Err(ApiError::BadRequest("url must not be empty".to_string()));
    }

    let summary = with_store(&state, move |store| {
        auditfix_core::ingest(store, &request.report, &request.session_id, &request.url)
    })
    .await?;
    Ok(Json(Envelope::success(Ingested { summary })))
}
