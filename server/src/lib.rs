use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, post}, Json, Router};
use engine::{DocId, Engine, EngineError, HistoryEntry, SearchHit};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn not_found(message: String) -> ApiError {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": message })))
}

pub fn build_app(engine: Arc<Engine>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/select/:doc_id", post(select_handler))
        .route("/history", get(history_handler))
        .with_state(AppState { engine })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let mut results = state.engine.search(&params.q);
    let total_hits = results.len();
    results.truncate(params.k.clamp(1, 100));
    let elapsed = start.elapsed();
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits, results })
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Result<Json<serde_json::Value>, ApiError> {
    let doc = state.engine.document(doc_id).ok_or_else(|| not_found(format!("unknown document: {doc_id}")))?;
    Ok(Json(serde_json::json!({
        "doc_id": doc.id,
        "content": doc.content,
        "score": state.engine.score(doc_id),
    })))
}

pub async fn select_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Result<Json<HistoryEntry>, ApiError> {
    match state.engine.record_selection(doc_id) {
        Ok(entry) => Ok(Json(entry)),
        Err(e @ EngineError::UnknownDocument(_)) => Err(not_found(e.to_string())),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({ "error": e.to_string() })))),
    }
}

pub async fn history_handler(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    Json(state.engine.export_report())
}
