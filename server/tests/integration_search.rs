use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use engine::{corpus, Engine};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    server::build_app(Arc::new(Engine::new(corpus::sample())))
}

async fn call(app: Router, method: &str, uri: &str) -> (StatusCode, Bytes) {
    let req = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let (status, body) = call(app(), "GET", "/search?q=risk&k=2").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    let arr = json["results"].as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert!(json["total_hits"].as_u64().unwrap() >= 5);
    assert!(json["took_s"].is_f64());
    assert!(json.get("took_ms").is_none());
    assert_eq!(arr[0]["doc_id"].as_u64().unwrap(), 13);
    assert_eq!(arr[0]["score"].as_u64().unwrap(), 2);
}

#[tokio::test]
async fn empty_query_has_no_hits() {
    let (status, body) = call(app(), "GET", "/search?q=").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["total_hits"], 0);
}

#[tokio::test]
async fn selections_show_up_in_history_and_scores() {
    let app = app();
    let (status, body) = call(app.clone(), "POST", "/select/1").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["doc_id"], 1);
    assert_eq!(json["score"], 1);

    let (_, body) = call(app.clone(), "POST", "/select/1").await;
    let second: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(second["score"], 2);
    let (status, body) = call(app.clone(), "GET", "/history").await;
    assert_eq!(status, StatusCode::OK);
    let history: Value = serde_json::from_slice(&body).unwrap();
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e["score"] == 2 && e["content"] == "This is a test document about risk management."));

    let (_, body) = call(app, "GET", "/doc/1").await;
    let doc: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(doc["score"], 2);
}

#[tokio::test]
async fn unknown_document_is_not_found() {
    let app = app();
    let (status, body) = call(app.clone(), "POST", "/select/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "unknown document: 9999");

    let (_, body) = call(app, "GET", "/history").await;
    let history: Value = serde_json::from_slice(&body).unwrap();
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_selections_each_report_a_distinct_score() {
    let app = app();
    let tasks: Vec<_> = (0..20).map(|_| tokio::spawn(call(app.clone(), "POST", "/select/7"))).collect();
    let mut scores: Vec<u64> = Vec::new();
    for task in tasks {
        let (status, body) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        scores.push(json["score"].as_u64().unwrap());
    }
    scores.sort_unstable();
    assert_eq!(scores, (1..=20).collect::<Vec<u64>>());
}
