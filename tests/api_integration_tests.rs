//! Integration Tests for Admin API Endpoints
//!
//! Tests full request/response cycle for each endpoint against a cache that
//! was populated through wrapped reads.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use blog_cache::cache::{presets, CacheBackend, MemoryBackend};
use blog_cache::{api::create_router, AppState, Cache};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> (Router, Cache, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    let cache = Cache::new(backend.clone(), true, 300);
    let app = create_router(AppState::new(cache.clone()));
    (app, cache, backend)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn seed(backend: &MemoryBackend) {
    for key in ["tags:list:a", "tags:list:b", "posts:detail:1"] {
        backend.set(key, "[]", 300).await.unwrap();
    }
}

fn invalidate_request(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/cache/invalidate")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _, _) = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["backend"], "memory");
    assert_eq!(json["cache_enabled"], true);
    assert!(json["timestamp"].is_string());
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_reports_wrapped_reads() {
    let (app, cache, _) = create_test_app();

    let tags = cache.wrap(presets::tags(), |_: ()| async {
        Ok::<_, Infallible>(Some(vec!["rust".to_string(), "async".to_string()]))
    });
    // miss, hit, hit, hit
    for _ in 0..4 {
        tags.call(()).await.unwrap();
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/cache/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["backend"], "memory");
    assert_eq!(json["total_keys"], 1);
    assert_eq!(json["hits"], 3);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["hit_rate"], 75.0);
    assert!(json["used_memory"].as_str().unwrap().ends_with('B'));
}

#[tokio::test]
async fn test_stats_endpoint_empty_cache() {
    let (app, _, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/cache/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hit_rate"], 0.0);
    assert_eq!(json["total_keys"], 0);
}

// == Invalidate Endpoint Tests ==

#[tokio::test]
async fn test_invalidate_pattern_endpoint() {
    let (app, _, backend) = create_test_app();
    seed(&backend).await;

    let response = app
        .oneshot(invalidate_request(r#"{"pattern":"tags:*"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["target"], "tags:*");

    assert!(backend.get("tags:list:a").await.unwrap().is_none());
    assert!(backend.get("tags:list:b").await.unwrap().is_none());
    assert!(backend.get("posts:detail:1").await.unwrap().is_some());
}

#[tokio::test]
async fn test_invalidate_key_endpoint() {
    let (app, _, backend) = create_test_app();
    seed(&backend).await;

    let response = app
        .oneshot(invalidate_request(r#"{"key":"tags:list:a"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.len().await, 2);
    assert!(backend.get("tags:list:b").await.unwrap().is_some());
}

#[tokio::test]
async fn test_invalidate_both_targets_rejected() {
    let (app, _, backend) = create_test_app();
    seed(&backend).await;

    let response = app
        .oneshot(invalidate_request(
            r#"{"pattern":"tags:*","key":"tags:list:a"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].is_string());
    assert_eq!(backend.len().await, 3);
}

#[tokio::test]
async fn test_invalid_json_request() {
    let (app, _, _) = create_test_app();

    let response = app
        .oneshot(invalidate_request("not json"))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == Clear Endpoint Tests ==

#[tokio::test]
async fn test_clear_endpoint() {
    let (app, _, backend) = create_test_app();
    seed(&backend).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(backend.is_empty().await);
}

#[tokio::test]
async fn test_unknown_route() {
    let (app, _, _) = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/get/key").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
