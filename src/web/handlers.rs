//! HTTP request handlers for the search UI and JSON API.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse},
    Json,
};
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::state::AppState;
use crate::config::SearchMode;
use crate::index::SearchEntry;
use crate::metrics;
use crate::scanner::{Scanner, SymbolCategory};
use crate::search::QuerySpec;
use crate::search::Search;

/// Embedded static files for the search UI.
#[derive(Embed)]
#[folder = "src/web/static/"]
struct StaticAssets;

/// Search request payload.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// The typed symbol name or fragment
    pub query: String,
    /// Maximum number of results to return
    pub limit: Option<usize>,
    /// Matching strategy: "exact", "prefix", "substring", or "fuzzy"
    pub mode: Option<SearchMode>,
    /// Glob pattern over owner descriptions
    pub owner: Option<String>,
}

/// Search response payload.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResultDto>,
    pub query: String,
    pub mode: String,
    pub took_ms: u64,
}

/// A single search result for the API.
#[derive(Debug, Serialize)]
pub struct SearchResultDto {
    pub key: String,
    pub label: String,
    pub href: String,
    pub owner: String,
    pub category: Option<String>,
    pub score: f32,
}

/// Query parameters for the entry listing.
#[derive(Debug, Deserialize)]
pub struct EntriesQuery {
    /// Glob pattern over owner descriptions
    pub owner: Option<String>,
    /// Shard category filter (functions, classes, ...)
    pub category: Option<String>,
    /// Maximum number of entries to return (default: 100)
    pub limit: Option<usize>,
}

/// Statistics response payload.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub entries: usize,
    pub targets: usize,
    pub owners: usize,
    pub by_category: std::collections::BTreeMap<String, usize>,
    pub search_mode: String,
    pub docs_root: String,
}

/// Reload response payload.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub success: bool,
    pub shards_loaded: usize,
    pub entries_loaded: usize,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Serve the search page.
pub async fn index_page() -> impl IntoResponse {
    match StaticAssets::get("index.html") {
        Some(content) => Html(content.data.to_vec()).into_response(),
        None => (StatusCode::NOT_FOUND, "Search page not found").into_response(),
    }
}

/// Handle search requests.
///
/// POST /api/search
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> impl IntoResponse {
    let start = Instant::now();

    info!(query = %request.query, "Processing search request");

    let spec = QuerySpec {
        text: request.query.clone(),
        mode: request.mode,
        limit: request.limit,
        owner_pattern: request.owner.clone(),
        category: None,
    };

    match state.searcher.query(&spec).await {
        Ok(results) => {
            let took_ms = start.elapsed().as_millis() as u64;
            let mode = request
                .mode
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| state.searcher.search_type().to_string());

            let response = SearchResponse {
                results: results
                    .into_iter()
                    .map(|r| SearchResultDto {
                        key: r.key,
                        label: r.label,
                        href: r.href,
                        owner: r.owner,
                        category: r.category.map(|c| c.as_str().to_string()),
                        score: r.score,
                    })
                    .collect(),
                query: request.query,
                mode,
                took_ms,
            };

            info!(
                results = response.results.len(),
                took_ms = took_ms,
                "Search completed"
            );

            Json(response).into_response()
        }
        Err(e) => {
            error!(error = %e, "Search failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": format!("Search failed: {}", e)
                })),
            )
                .into_response()
        }
    }
}

/// List table entries, optionally filtered.
///
/// GET /api/entries
pub async fn list_entries(
    State(state): State<AppState>,
    Query(params): Query<EntriesQuery>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(100);

    let owner_glob = match params.owner.as_deref().map(glob::Pattern::new) {
        Some(Ok(pattern)) => Some(pattern),
        Some(Err(e)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": format!("Invalid owner pattern: {}", e)
                })),
            )
                .into_response();
        }
        None => None,
    };

    let category = match params.category.as_deref().map(str::parse::<SymbolCategory>) {
        Some(Ok(category)) => Some(category),
        Some(Err(e)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": format!("{}", e) })),
            )
                .into_response();
        }
        None => None,
    };

    let snapshot = state.index.read().await.clone();
    let entries: Vec<SearchEntry> = snapshot
        .entries()
        .iter()
        .filter(|e| category.is_none() || e.category == category)
        .filter(|e| match &owner_glob {
            Some(pattern) => e
                .targets
                .iter()
                .any(|t| pattern.matches(&t.decoded_owner())),
            None => true,
        })
        .take(limit)
        .cloned()
        .collect();

    Json(entries).into_response()
}

/// Fetch one entry by its exact key.
///
/// GET /api/entries/{key}
pub async fn get_entry(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> impl IntoResponse {
    let snapshot = state.index.read().await.clone();

    match snapshot.get(&key) {
        Some(entry) => Json(entry.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": format!("No entry with key '{}'", key)
            })),
        )
            .into_response(),
    }
}

/// Get table statistics.
///
/// GET /api/stats
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.index.read().await.clone();

    let response = StatsResponse {
        entries: snapshot.len(),
        targets: snapshot.target_count(),
        owners: snapshot.owners().len(),
        by_category: snapshot.category_counts(),
        search_mode: state.searcher.search_type().to_string(),
        docs_root: state.docs_root.to_string_lossy().to_string(),
    };

    Json(response)
}

/// Rescan the tree and swap in a fresh snapshot.
///
/// POST /api/reload
pub async fn reload(State(state): State<AppState>) -> impl IntoResponse {
    let scanner = Scanner::new(state.docs_root.clone(), state.config.scanner.clone());

    let outcome = match tokio::task::spawn_blocking(move || scanner.scan()).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => {
            error!(error = %e, "Reload scan failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": format!("Reload failed: {}", e)
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Reload task panicked");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Reload task panicked" })),
            )
                .into_response();
        }
    };

    let response = ReloadResponse {
        success: true,
        shards_loaded: outcome.report.shards_loaded,
        entries_loaded: outcome.index.len(),
    };

    *state.index.write().await = Arc::new(outcome.index);
    info!(entries = response.entries_loaded, "Table reloaded via API");

    Json(response).into_response()
}

/// Health check endpoint.
///
/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Prometheus metrics endpoint.
///
/// GET /metrics
pub async fn metrics_handler() -> impl IntoResponse {
    let output = metrics::gather_metrics();
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], output)
}

/// Serve embedded static files.
pub async fn static_file(uri: Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');

    match StaticAssets::get(path) {
        Some(content) => {
            let content_type = mime_guess::from_path(path)
                .first_or_octet_stream()
                .to_string();
            ([(header::CONTENT_TYPE, content_type)], content.data.to_vec()).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
