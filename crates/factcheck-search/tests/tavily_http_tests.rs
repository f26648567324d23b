//! Tavily provider against a local fake of the search endpoint

use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use factcheck_domain::traits::SearchProvider;
use factcheck_search::{SearchError, TavilyConfig, TavilyProvider};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpListener;

/// Serve `app` on an ephemeral port and return the search endpoint URL
async fn spawn_fake(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/search", addr)
}

fn config(endpoint: String, max_results: usize, timeout_secs: u64) -> TavilyConfig {
    TavilyConfig {
        endpoint,
        max_results,
        timeout_secs,
        ..TavilyConfig::default()
    }
}

fn result(n: usize, score: f64) -> Value {
    json!({
        "title": format!("Result {}", n),
        "url": format!("https://example.com/{}", n),
        "content": format!("content {}", n),
        "score": score
    })
}

#[tokio::test]
async fn test_search_sends_query_and_keeps_order() {
    async fn handler(Json(body): Json<Value>) -> impl IntoResponse {
        assert_eq!(body["api_key"], "tvly-test");
        assert_eq!(body["query"], "The Eiffel Tower is in Berlin.");
        assert_eq!(body["search_depth"], "basic");
        assert_eq!(body["max_results"], 3);
        Json(json!({
            "query": "The Eiffel Tower is in Berlin.",
            "results": [result(1, 0.9), result(2, 0.8), result(3, 0.5)]
        }))
    }

    let endpoint = spawn_fake(Router::new().route("/search", post(handler))).await;
    let provider = TavilyProvider::new(&config(endpoint, 3, 5), "tvly-test").unwrap();

    let evidence = SearchProvider::search(&provider, "The Eiffel Tower is in Berlin.")
        .await
        .unwrap();
    assert_eq!(evidence.len(), 3);
    assert_eq!(evidence[0].title, "Result 1");
    assert_eq!(evidence[2].url, "https://example.com/3");
    assert_eq!(evidence[1].score, 0.8);
}

#[tokio::test]
async fn test_search_truncates_to_max_results() {
    async fn handler() -> impl IntoResponse {
        Json(json!({
            "results": [result(1, 0.9), result(2, 0.8), result(3, 0.7), result(4, 0.6), result(5, 0.5)]
        }))
    }

    let endpoint = spawn_fake(Router::new().route("/search", post(handler))).await;
    let provider = TavilyProvider::new(&config(endpoint, 2, 5), "k").unwrap();

    let evidence = provider.search("q").await.unwrap();
    assert_eq!(evidence.len(), 2);
    assert_eq!(evidence[0].title, "Result 1");
    assert_eq!(evidence[1].title, "Result 2");
}

#[tokio::test]
async fn test_error_status_carries_raw_body() {
    async fn handler() -> impl IntoResponse {
        (StatusCode::UNAUTHORIZED, r#"{"detail":{"error":"Unauthorized: missing or invalid API key."}}"#)
    }

    let endpoint = spawn_fake(Router::new().route("/search", post(handler))).await;
    let provider = TavilyProvider::new(&config(endpoint, 3, 5), "k").unwrap();

    match provider.search("q").await {
        Err(SearchError::Status { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid API key"));
        }
        other => panic!("Expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_corrupt_item_fails_whole_search() {
    async fn handler() -> impl IntoResponse {
        Json(json!({
            "results": [result(1, 0.9), {"title": "no url", "content": "c", "score": 0.1}]
        }))
    }

    let endpoint = spawn_fake(Router::new().route("/search", post(handler))).await;
    let provider = TavilyProvider::new(&config(endpoint, 3, 5), "k").unwrap();

    assert!(matches!(provider.search("q").await, Err(SearchError::Decode(_))));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    async fn handler() -> impl IntoResponse {
        tokio::time::sleep(Duration::from_secs(3)).await;
        Json(json!({"results": []}))
    }

    let endpoint = spawn_fake(Router::new().route("/search", post(handler))).await;
    let provider = TavilyProvider::new(&config(endpoint, 3, 1), "k").unwrap();

    assert!(matches!(
        provider.search("q").await,
        Err(SearchError::Timeout(d)) if d == Duration::from_secs(1)
    ));
}
