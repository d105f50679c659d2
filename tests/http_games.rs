//! HTTP Endpoint Tests
//!
//! Drives the full router (CORS, tracing, routes) without a socket:
//! - `/games` response shape and status codes
//! - Error bodies hide server detail
//! - `/health` liveness

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use game_catalog::catalog::{
    AgeRating, CatalogError, CatalogQuery, CatalogResult, CatalogService, GameRecord, GameStore,
    InMemoryGameStore,
};
use game_catalog::http_server::{HttpServer, HttpServerConfig};

// =============================================================================
// Helper Functions
// =============================================================================

fn game(id: &str, title: &str, price: f64, age_rating: AgeRating) -> GameRecord {
    GameRecord {
        id: id.to_string(),
        title: title.to_string(),
        image: format!("https://img.example/{}.png", id),
        price,
        rating: 4.2,
        age_rating,
        release_date: Utc.with_ymd_and_hms(2019, 10, 25, 0, 0, 0).unwrap(),
        developer: "Studio".to_string(),
        publisher: "Publisher".to_string(),
        genres: vec!["Action".to_string()],
        platforms: vec!["PC".to_string()],
    }
}

fn fixture_store() -> Arc<InMemoryGameStore> {
    Arc::new(InMemoryGameStore::new(vec![
        game("1", "Outer Wilds", 24.99, AgeRating::E10Plus),
        game("2", "Disco Elysium", 39.99, AgeRating::M),
        game("3", "Hades", 19.99, AgeRating::T),
    ]))
}

fn router_for<S: GameStore + 'static>(store: Arc<S>) -> Router {
    HttpServer::new(HttpServerConfig::default(), CatalogService::new(store)).router()
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Store that fails every query with internal detail
struct BrokenStore;

#[async_trait]
impl GameStore for BrokenStore {
    async fn fetch_page(&self, _query: &CatalogQuery) -> CatalogResult<Vec<GameRecord>> {
        Err(CatalogError::Store("connection refused: 10.0.0.7:5432".to_string()))
    }

    async fn count(&self, _query: &CatalogQuery) -> CatalogResult<i64> {
        Err(CatalogError::Store("connection refused: 10.0.0.7:5432".to_string()))
    }
}

// =============================================================================
// /games Tests
// =============================================================================

#[tokio::test]
async fn test_games_response_shape() {
    let (status, body) = get(router_for(fixture_store()), "/games?sort=LOW_PRICE").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["length"], 3);

    let games = body["games"].as_array().unwrap();
    assert_eq!(games.len(), 3);
    assert_eq!(games[0]["title"], "Hades");

    let first = games[0].as_object().unwrap();
    for field in [
        "id",
        "title",
        "image",
        "price",
        "rating",
        "age_rating",
        "release_date",
        "developer",
        "publisher",
        "genres",
        "platforms",
    ] {
        assert!(first.contains_key(field), "missing {}", field);
    }
    assert_eq!(first["age_rating"], "T");
}

#[tokio::test]
async fn test_games_empty_result_keeps_array() {
    let (status, body) = get(router_for(fixture_store()), "/games?searchTerm=nothing").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["games"], Value::Array(vec![]));
    assert_eq!(body["length"], 0);
}

#[tokio::test]
async fn test_games_adult_only() {
    let (status, body) = get(router_for(fixture_store()), "/games?isAdultOnly=true").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["length"], 1);
    assert_eq!(body["games"][0]["title"], "Disco Elysium");
}

#[tokio::test]
async fn test_invalid_sort_is_bad_request_without_store_access() {
    let store = fixture_store();
    let (status, body) = get(router_for(store.clone()), "/games?sort=INVALID_VALUE").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["message"].as_str().unwrap().contains("sort"));
    assert_eq!(store.access_count(), 0);
}

#[tokio::test]
async fn test_non_numeric_page_is_bad_request() {
    let (status, _body) = get(router_for(fixture_store()), "/games?page=two").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_failure_is_opaque_server_error() {
    let (status, body) = get(router_for(Arc::new(BrokenStore)), "/games").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    let message = body["message"].as_str().unwrap();
    assert!(!message.contains("10.0.0.7"));
    assert!(body.get("games").is_none());
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let response = router_for(fixture_store())
        .oneshot(
            Request::builder()
                .uri("/games")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

// =============================================================================
// /health Tests
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = get(router_for(fixture_store()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
