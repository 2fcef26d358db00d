//! Wiremock tests for the catalog TTL cache.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fable_client::catalog::CatalogCache;
use fable_client::{FableClient, Resource};

fn listing_body() -> serde_json::Value {
    serde_json::json!({
        "data": [{
            "id": 1,
            "title": "Iron Crown",
            "author_name": "River Tan",
            "genre": "fantasy",
            "status": "ongoing",
            "cover_image_id": null,
            "chapter_count": 12,
            "review_count": 3,
            "average_rating": 4.5,
            "updated_at": "2026-08-01T00:00:00Z"
        }]
    })
}

/// Within the TTL the cached listing is served without a network call;
/// after expiry the next `get` fetches again.
#[tokio::test]
async fn serves_cached_listing_until_ttl_expires() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/novels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = FableClient::new(server.uri()).expect("client");
    let cache = CatalogCache::new(client, Duration::from_secs(60));

    assert!(cache.state().is_loading());

    let first = cache.get().await.expect("fetch");
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].title, "Iron Crown");

    // Fresh: second call is served from the cache (still 1 server hit).
    cache.get().await.expect("cached");
    assert_eq!(server.received_requests().await.expect("requests").len(), 1);

    // An explicit refresh always hits the server.
    cache.refresh().await.expect("refresh");
    assert_eq!(server.received_requests().await.expect("requests").len(), 2);
}

/// A zero TTL means every `get` fetches.
#[tokio::test]
async fn zero_ttl_always_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/novels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = FableClient::new(server.uri()).expect("client");
    let cache = CatalogCache::new(client, Duration::ZERO);

    cache.get().await.expect("fetch");
    cache.get().await.expect("fetch");
}

/// A fetch failure keeps a previously cached success; the error only
/// replaces the state when nothing was loaded yet.
#[tokio::test]
async fn stale_success_survives_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/novels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = FableClient::new(server.uri()).expect("client");
    let cache = CatalogCache::new(client, Duration::ZERO);
    cache.get().await.expect("fetch");

    // Replace the mock with a failing one.
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/novels"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(cache.get().await.is_err());
    match cache.state() {
        Resource::Success(novels) => assert_eq!(novels[0].title, "Iron Crown"),
        other => panic!("expected cached success, got {other:?}"),
    }
}

/// On a cold cache a fetch failure is exposed as the error state.
#[tokio::test]
async fn cold_cache_failure_is_error_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/novels"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = FableClient::new(server.uri()).expect("client");
    let cache = CatalogCache::new(client, Duration::from_secs(60));

    assert!(cache.get().await.is_err());
    assert!(matches!(cache.state(), Resource::Error(_)));
}
