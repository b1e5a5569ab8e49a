//! Integration tests for the HawAPI HTTP client using wiremock.
//!
//! These tests verify:
//! - Resource operations hit the expected paths and query strings
//! - Error handling for unexpected status codes and bodies
//! - Token handling for anonymous and mutating requests
//! - Cache round trips, corruption fallback and invalidation
//! - PATCH read-modify-write merging

use hawapi_client::{
    Actor, BaseResponse, Cache, CacheEntry, ClientConfig, ClientError, ConfigOverrides,
    CreateActor, HawApiClient, HeaderResponse, LruMemoryCache, MemoryCache, PatchActor, Query,
    SharedClient,
};
use reqwest::Method;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACTOR_ID: &str = "5b0e1a7e-2b43-4d4c-8f4d-3f1b4a1c2d3e";

// ============================================================================
// Test Helpers
// ============================================================================

fn config_builder(server: &MockServer) -> hawapi_client::ClientConfigBuilder {
    ClientConfig::builder()
        .endpoint(server.uri())
        .timeout(Duration::from_secs(5))
}

/// Create an anonymous test client without cache
fn test_client(server: &MockServer) -> HawApiClient {
    HawApiClient::new(config_builder(server).no_cache().build().unwrap()).unwrap()
}

/// Create a test client with a token and no cache
fn test_client_with_token(server: &MockServer, token: &str) -> HawApiClient {
    HawApiClient::new(config_builder(server).token(token).no_cache().build().unwrap()).unwrap()
}

/// Create a test client with caching enabled
fn test_client_with_cache(server: &MockServer) -> HawApiClient {
    HawApiClient::new(config_builder(server).build().unwrap()).unwrap()
}

fn actor_id() -> Uuid {
    Uuid::parse_str(ACTOR_ID).unwrap()
}

fn actor_path() -> String {
    format!("/v1/actors/{}", ACTOR_ID)
}

fn actor_json() -> serde_json::Value {
    serde_json::json!({
        "uuid": ACTOR_ID,
        "href": format!("/api/v1/actors/{}", ACTOR_ID),
        "first_name": "Finn",
        "last_name": "Wolfhard",
        "nicknames": ["Mike"],
        "gender": 1,
        "character": "/api/v1/characters/1",
        "created_at": "2023-01-01T00:00:00Z",
        "updated_at": "2023-01-02T00:00:00Z"
    })
}

// ============================================================================
// Info & Overview Tests
// ============================================================================

#[tokio::test]
async fn test_info_uses_bare_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "HawAPI",
            "api_version": "v1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let info = client.info().await.unwrap();

    assert_eq!(info.title, "HawAPI");
    assert_eq!(info.api_version, "v1");
}

#[tokio::test]
async fn test_overview_with_language() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/overview"))
        .and(query_param("language", "pt-BR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "Stranger Things",
            "language": "pt-BR",
            "data_count": {"actors": 3}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let overview = client
        .overview(&Query::new().language("pt-BR"))
        .await
        .unwrap();

    assert_eq!(overview.data.language, "pt-BR");
    assert_eq!(overview.data.data_count.actors, 3);
    assert_eq!(overview.base.status, 200);
}

// ============================================================================
// List / Find / Random Tests
// ============================================================================

#[tokio::test]
async fn test_list_actors_with_pagination_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/actors"))
        .and(query_param("page", "2"))
        .and(query_param("size", "40"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([actor_json()]))
                .insert_header("X-Pagination-Page-Index", "2")
                .insert_header("X-Pagination-Page-Size", "40")
                .insert_header("X-Pagination-Page-Total", "3")
                .insert_header("X-Pagination-Item-Total", "100")
                .insert_header("X-Rate-Limit-Remaining", "42")
                .insert_header("Content-Language", "en-US")
                .insert_header("ETag", "\"v1\""),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let actors = client
        .actors()
        .list(&Query::new().page(2).size(40))
        .await
        .unwrap();

    assert_eq!(actors.data.len(), 1);
    assert_eq!(actors.data[0].first_name, "Finn");

    let headers = &actors.base.headers;
    assert_eq!(headers.page, 2);
    assert_eq!(headers.page_size, 40);
    assert_eq!(headers.page_total, 3);
    assert_eq!(headers.item_size, 100);
    assert_eq!(headers.next_page, 3);
    assert_eq!(headers.prev_page, 1);
    assert_eq!(headers.quota.remaining, 42);
    assert_eq!(headers.language, "en-US");
    assert_eq!(headers.etag, "\"v1\"");
    assert!(actors.has_next());
    assert!(!actors.base.cached);
}

#[tokio::test]
async fn test_missing_headers_are_sentinel() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/actors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let actors = client.actors().list(&Query::new()).await.unwrap();

    let headers = &actors.base.headers;
    assert_eq!(headers.page, -1);
    assert_eq!(headers.next_page, -1);
    assert_eq!(headers.prev_page, -1);
    assert_eq!(headers.quota.remaining, -1);
    assert_eq!(headers.language, "");
}

#[tokio::test]
async fn test_client_level_language_and_size() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/seasons"))
        .and(query_param("language", "pt-BR"))
        .and(query_param("size", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = HawApiClient::new(
        config_builder(&server)
            .language("pt-BR")
            .size(20)
            .no_cache()
            .build()
            .unwrap(),
    )
    .unwrap();

    let seasons = client.seasons().list(&Query::new()).await.unwrap();
    assert!(seasons.data.is_empty());
}

#[tokio::test]
async fn test_find_actor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(actor_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(actor_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let actor = client.actors().find(actor_id()).await.unwrap();

    assert_eq!(actor.data.uuid, actor_id());
    assert_eq!(actor.data.nicknames, vec!["Mike".to_string()]);
    assert_eq!(actor.base.status, 200);
}

#[tokio::test]
async fn test_random_episode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/episodes/random"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "Chapter One: The Vanishing of Will Byers",
            "episode_num": 1,
            "duration": 2900000
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let episode = client.episodes().random().await.unwrap();

    assert_eq!(episode.data.episode_num, 1);
    assert_eq!(episode.data.duration, 2_900_000);
}

#[tokio::test]
async fn test_random_bypasses_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/actors/random"))
        .respond_with(ResponseTemplate::new(200).set_body_json(actor_json()))
        .expect(5) // One request per call even with caching enabled
        .mount(&server)
        .await;

    let client = test_client_with_cache(&server);
    for _ in 0..5 {
        let actor = client.actors().random().await.unwrap();
        assert!(!actor.base.cached);
        assert!(!actor.base.served_from_cache);
    }

    assert_eq!(client.cache_size().await, 0);
}

#[tokio::test]
async fn test_other_resource_paths() {
    let server = MockServer::start().await;

    for resource in ["characters", "games", "locations", "soundtracks"] {
        Mock::given(method("GET"))
            .and(path(format!("/v1/{}", resource)))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = test_client(&server);
    let query = Query::new();
    assert!(client.characters().list(&query).await.unwrap().data.is_empty());
    assert!(client.games().list(&query).await.unwrap().data.is_empty());
    assert!(client.locations().list(&query).await.unwrap().data.is_empty());
    assert!(client.soundtracks().list(&query).await.unwrap().data.is_empty());
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[tokio::test]
async fn test_error_404_structured_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(actor_path()))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "code": 404,
            "status": "Not Found",
            "method": "GET",
            "cause": "NOT_FOUND",
            "url": "/api/v1/actors/5b0e1a7e",
            "message": "Actor not found"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.actors().find(actor_id()).await;

    match result.unwrap_err() {
        ClientError::Api(body) => {
            assert_eq!(body.code, 404);
            assert_eq!(
                body.to_string(),
                "request error [Not Found 404] using GET method on '/api/v1/actors/5b0e1a7e': Actor not found"
            );
        }
        other => panic!("Expected Api error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_error_code_defaults_to_http_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/actors"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "status": "Too Many Requests",
            "method": "GET"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.actors().list(&Query::new()).await.unwrap_err();

    assert_eq!(err.status(), Some(429));
    assert!(matches!(err, ClientError::Api(_)));
}

#[tokio::test]
async fn test_error_unparseable_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/actors"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .expect(1) // No retries
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.actors().list(&Query::new()).await;

    match result.unwrap_err() {
        ClientError::ErrorBodyParse { status, .. } => assert_eq!(status, 500),
        other => panic!("Expected ErrorBodyParse, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_error_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/actors"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.actors().list(&Query::new()).await;

    assert!(matches!(
        result,
        Err(ClientError::ErrorBodyParse { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_response_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/actors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "not": "a list"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.actors().list(&Query::new()).await;

    assert!(matches!(result, Err(ClientError::ResponseDecode(_))));
}

#[tokio::test]
async fn test_transport_error() {
    // Nothing listens on port 1
    let config = ClientConfig::builder()
        .endpoint("http://127.0.0.1:1")
        .timeout(Duration::from_secs(2))
        .no_cache()
        .build()
        .unwrap();
    let client = HawApiClient::new(config).unwrap();

    let result = client.actors().list(&Query::new()).await;
    assert!(matches!(result, Err(ClientError::Transport(_))));
}

// ============================================================================
// Token Tests
// ============================================================================

#[tokio::test]
async fn test_token_header_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/actors"))
        .and(header("Authorization", "Bearer jwt_12345"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_token(&server, "jwt_12345");
    let actors = client.actors().list(&Query::new()).await.unwrap();

    assert!(actors.data.is_empty());
}

#[tokio::test]
async fn test_anonymous_request_has_no_authorization() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/actors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client.actors().list(&Query::new()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_mutations_without_token_fail_fast() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let actors = client.actors();

    let created = actors.create(&CreateActor::default()).await;
    assert!(matches!(
        created,
        Err(ClientError::AuthRequired { method }) if method == Method::POST
    ));

    let patched = actors.patch(actor_id(), &PatchActor::default()).await;
    assert!(matches!(
        patched,
        Err(ClientError::AuthRequired { method }) if method == Method::PATCH
    ));

    let deleted = actors.delete(actor_id()).await;
    assert!(matches!(
        deleted,
        Err(ClientError::AuthRequired { method }) if method == Method::DELETE
    ));
}

// ============================================================================
// Create / Patch / Delete Tests
// ============================================================================

#[tokio::test]
async fn test_create_actor() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/actors"))
        .and(header("Authorization", "Bearer jwt"))
        .and(body_json(serde_json::json!({
            "first_name": "Finn",
            "last_name": "Wolfhard",
            "gender": 1,
            "character": "/api/v1/characters/1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(actor_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_token(&server, "jwt");
    let actor = client
        .actors()
        .create(&CreateActor {
            first_name: "Finn".to_string(),
            last_name: "Wolfhard".to_string(),
            gender: 1,
            character: "/api/v1/characters/1".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(actor.uuid, actor_id());
}

#[tokio::test]
async fn test_create_expects_201() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/actors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(actor_json()))
        .mount(&server)
        .await;

    let client = test_client_with_token(&server, "jwt");
    let result = client.actors().create(&CreateActor::default()).await;

    assert!(matches!(result, Err(ClientError::Api(_))));
}

/// Mount the GET sequence seen by a patch: the current entity first, then the
/// updated one.
async fn mount_patch_reads(
    server: &MockServer,
    before: serde_json::Value,
    after: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path(actor_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(before))
        .up_to_n_times(1)
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(actor_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(after))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_patch_merges_over_current_entity() {
    let server = MockServer::start().await;

    let mut merged = actor_json();
    merged["last_name"] = serde_json::json!("Mertens");
    merged["awards"] = serde_json::json!(["Best Ensemble"]);

    mount_patch_reads(&server, actor_json(), merged.clone()).await;

    Mock::given(method("PATCH"))
        .and(path(actor_path()))
        .and(body_json(merged.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(merged))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_token(&server, "jwt");
    let actor = client
        .actors()
        .patch(
            actor_id(),
            &PatchActor {
                last_name: Some("Mertens".to_string()),
                awards: Some(vec!["Best Ensemble".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(actor.first_name, "Finn");
    assert_eq!(actor.last_name, "Mertens");
    assert_eq!(actor.nicknames, vec!["Mike".to_string()]);
    assert_eq!(actor.awards, vec!["Best Ensemble".to_string()]);
}

#[tokio::test]
async fn test_patch_ignores_acknowledgement_body() {
    let server = MockServer::start().await;

    let mut updated = actor_json();
    updated["last_name"] = serde_json::json!("Mertens");

    mount_patch_reads(&server, actor_json(), updated).await;

    Mock::given(method("PATCH"))
        .and(path(actor_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "updated"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_token(&server, "jwt");
    let actor = client
        .actors()
        .patch(
            actor_id(),
            &PatchActor {
                last_name: Some("Mertens".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(actor.uuid, actor_id());
    assert_eq!(actor.first_name, "Finn");
    assert_eq!(actor.last_name, "Mertens");
}

#[tokio::test]
async fn test_patch_with_empty_response() {
    let server = MockServer::start().await;

    let mut updated = actor_json();
    updated["gender"] = serde_json::json!(0);

    mount_patch_reads(&server, actor_json(), updated).await;

    Mock::given(method("PATCH"))
        .and(path(actor_path()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_token(&server, "jwt");
    let actor = client
        .actors()
        .patch(
            actor_id(),
            &PatchActor {
                gender: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(actor.gender, 0);
    assert_eq!(actor.last_name, "Wolfhard");
}

#[tokio::test]
async fn test_patch_rejected_skips_reread() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(actor_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(actor_json()))
        .expect(1) // Only the read before the merge
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(actor_path()))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": 400,
            "status": "Bad Request",
            "method": "PATCH",
            "message": "invalid gender"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_token(&server, "jwt");
    let result = client
        .actors()
        .patch(
            actor_id(),
            &PatchActor {
                gender: Some(7),
                ..Default::default()
            },
        )
        .await;

    assert_eq!(result.unwrap_err().status(), Some(400));
}

#[tokio::test]
async fn test_delete_actor() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(actor_path()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_token(&server, "jwt");
    client.actors().delete(actor_id()).await.unwrap();
}

#[tokio::test]
async fn test_delete_ignores_client_level_query() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(actor_path()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = HawApiClient::new(
        config_builder(&server)
            .language("pt-BR")
            .token("jwt")
            .build()
            .unwrap(),
    )
    .unwrap();
    client.actors().delete(actor_id()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

// ============================================================================
// Cache Behavior Tests
// ============================================================================

#[tokio::test]
async fn test_cache_hit_avoids_second_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(actor_path()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(actor_json())
                .insert_header("X-Rate-Limit-Remaining", "9"),
        )
        .expect(1) // Should only be called once due to caching
        .mount(&server)
        .await;

    let client = test_client_with_cache(&server);

    let first = client.actors().find(actor_id()).await.unwrap();
    assert!(first.base.cached);
    assert!(!first.base.served_from_cache);

    let second = client.actors().find(actor_id()).await.unwrap();
    assert!(second.base.cached);
    assert!(second.base.served_from_cache);
    assert_eq!(second.data, first.data);
    assert_eq!(second.base.headers, first.base.headers);
    assert_eq!(second.base.headers.quota.remaining, 9);

    assert_eq!(client.cache_size().await, 1);
}

#[tokio::test]
async fn test_distinct_queries_are_distinct_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/actors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client_with_cache(&server);
    client.actors().list(&Query::new().page(2)).await.unwrap();
    client.actors().list(&Query::new().page(3)).await.unwrap();
    client.actors().list(&Query::new().page(2)).await.unwrap();

    assert_eq!(client.cache_size().await, 2);
}

#[tokio::test]
async fn test_cache_disabled_always_fetches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(actor_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(actor_json()))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let first = client.actors().find(actor_id()).await.unwrap();
    let second = client.actors().find(actor_id()).await.unwrap();

    assert!(!first.base.cached);
    assert!(!second.base.served_from_cache);
    assert_eq!(client.cache_size().await, 0);
}

#[tokio::test]
async fn test_corrupt_cache_entry_falls_back_to_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(actor_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(actor_json()))
        .expect(1)
        .mount(&server)
        .await;

    let cache = Arc::new(MemoryCache::new());
    let client =
        HawApiClient::with_cache(config_builder(&server).build().unwrap(), cache.clone()).unwrap();

    let url = client.build_url(&format!("actors/{}", ACTOR_ID), Some(&Query::new()));
    cache
        .set(
            url.clone(),
            CacheEntry {
                url: url.clone(),
                base_response: BaseResponse::new(HeaderResponse::default(), 200),
                raw_body: b"{\"uuid\": 42}".to_vec(),
            },
        )
        .await;

    let actor = client.actors().find(actor_id()).await.unwrap();
    assert_eq!(actor.data.first_name, "Finn");
    assert!(!actor.base.served_from_cache);

    // The corrupt entry was replaced by the fresh response
    let entry = cache.get(&url).await.unwrap();
    let cached: Actor = serde_json::from_slice(&entry.raw_body).unwrap();
    assert_eq!(cached, actor.data);
}

#[tokio::test]
async fn test_clear_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(actor_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(actor_json()))
        .expect(2) // Called twice: before and after clearing
        .mount(&server)
        .await;

    let client = test_client_with_cache(&server);
    client.actors().find(actor_id()).await.unwrap();

    assert_eq!(client.clear_cache().await, 1);
    assert_eq!(client.cache_size().await, 0);

    client.actors().find(actor_id()).await.unwrap();
}

#[tokio::test]
async fn test_delete_invalidates_cached_entity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(actor_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(actor_json()))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(actor_path()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = HawApiClient::new(config_builder(&server).token("jwt").build().unwrap()).unwrap();

    client.actors().find(actor_id()).await.unwrap();
    client.actors().delete(actor_id()).await.unwrap();
    assert_eq!(client.cache_size().await, 0);

    client.actors().find(actor_id()).await.unwrap();
}

#[tokio::test]
async fn test_shared_client_across_tasks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(actor_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(actor_json()))
        .mount(&server)
        .await;

    let client: SharedClient = Arc::new(test_client_with_cache(&server));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = Arc::clone(&client);
        handles.push(tokio::spawn(async move {
            client.actors().find(actor_id()).await
        }));
    }

    for handle in handles {
        let actor = handle.await.unwrap().unwrap();
        assert_eq!(actor.data.uuid, actor_id());
    }
    assert_eq!(client.cache_size().await, 1);
}

#[tokio::test]
async fn test_lru_backend_evicts_oldest() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/actors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(4) // page 1 is evicted by page 3 and fetched again
        .mount(&server)
        .await;

    let client = HawApiClient::with_cache(
        config_builder(&server).build().unwrap(),
        Arc::new(LruMemoryCache::new(2)),
    )
    .unwrap();

    for page in [1, 2, 3, 1] {
        client
            .actors()
            .list(&Query::new().page(page))
            .await
            .unwrap();
    }
    assert_eq!(client.cache_size().await, 2);
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[tokio::test]
async fn test_apply_overrides_changes_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/actors"))
        .and(header("Authorization", "Bearer late_token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(actor_json()))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = test_client(&server);
    client
        .apply_overrides(ConfigOverrides {
            version: Some("v2".to_string()),
            token: Some("late_token".to_string()),
            ..Default::default()
        })
        .unwrap();

    let actor = client.actors().create(&CreateActor::default()).await.unwrap();
    assert_eq!(actor.uuid, actor_id());
}
