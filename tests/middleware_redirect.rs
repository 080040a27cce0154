mod common;

use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

use common::{FailingStore, InMemoryStore};
use keyhop::AppState;
use keyhop::infrastructure::store::StaticSeed;

#[tokio::test]
async fn test_redirect_open_link_defaults_scheme() {
    let remote = Arc::new(InMemoryStore::with_entries(&[("k3x9a0", "example.com")]));
    let (server, _static_dir) = common::create_test_server(common::create_test_state(remote));

    let response = server.get("/k3x9a0").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "http://example.com");
}

#[tokio::test]
async fn test_redirect_keeps_existing_scheme() {
    let remote = Arc::new(InMemoryStore::with_entries(&[(
        "abc123",
        "https://example.com/page?x=1",
    )]));
    let (server, _static_dir) = common::create_test_server(common::create_test_state(remote));

    let response = server.get("/abc123").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/page?x=1");
}

#[tokio::test]
async fn test_redirect_bare_token_of_secure_key_goes_to_unlock() {
    let remote = Arc::new(InMemoryStore::with_entries(&[("p7q2w1$abc", "example.com")]));
    let (server, _static_dir) = common::create_test_server(common::create_test_state(remote));

    let response = server.get("/p7q2w1").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "/unlock?key=p7q2w1");
}

#[tokio::test]
async fn test_redirect_secure_key_with_password() {
    let remote = Arc::new(InMemoryStore::with_entries(&[("p7q2w1$abc", "example.com")]));
    let (server, _static_dir) = common::create_test_server(common::create_test_state(remote));

    let response = server.get("/p7q2w1$abc").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "http://example.com");
}

#[tokio::test]
async fn test_redirect_wrong_password_goes_to_unlock() {
    let remote = Arc::new(InMemoryStore::with_entries(&[("p7q2w1$abc", "example.com")]));
    let (server, _static_dir) = common::create_test_server(common::create_test_state(remote));

    let response = server.get("/p7q2w1$nope").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "/unlock?key=p7q2w1");
}

#[tokio::test]
async fn test_redirect_direct_probe_of_unknown_secure_key() {
    let (server, _static_dir) = common::create_test_server(common::create_offline_state());

    let response = server.get("/zzzzzz$guess").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "/unlock?key=zzzzzz");
}

#[tokio::test]
async fn test_unknown_key_passes_through() {
    let (server, _static_dir) = common::create_test_server(common::create_offline_state());

    let response = server.get("/nosuch").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_pass_through_serves_static_file() {
    let state = common::create_offline_state();
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("about.html"), "<h1>About</h1>").unwrap();

    let app = keyhop::routes::build_router(state, static_dir.path());
    let server = axum_test::TestServer::new(app).unwrap();

    let response = server.get("/about.html").await;

    response.assert_status_ok();
    response.assert_text("<h1>About</h1>");
}

#[tokio::test]
async fn test_api_paths_are_never_redirected() {
    let remote = Arc::new(InMemoryStore::with_entries(&[("api", "example.com")]));
    let (server, _static_dir) = common::create_test_server(common::create_test_state(remote));

    let response = server.get("/api").await;

    assert_ne!(response.status_code(), 307);
}

#[tokio::test]
async fn test_destination_unusable_as_header_passes_through() {
    let remote = Arc::new(InMemoryStore::with_entries(&[("abc123", "example.com/a\nb")]));
    let (server, _static_dir) = common::create_test_server(common::create_test_state(remote));

    let response = server.get("/abc123").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_seed_entry_redirects() {
    let seed = StaticSeed::from_entries([("demo".to_string(), "example.org".to_string())]);
    let cache = common::create_cache(seed, Arc::new(FailingStore));
    let state = AppState::new(
        cache,
        Arc::new(keyhop::infrastructure::notify::NullNotifier::new()),
        None,
        4,
    );
    let (server, _static_dir) = common::create_test_server(state);

    let response = server.get("/demo").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "http://example.org");
}

#[tokio::test]
async fn test_failing_remote_passes_through() {
    let (server, _static_dir) =
        common::create_test_server(common::create_test_state(Arc::new(FailingStore)));

    let response = server.get("/abc123").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_remote_hit_is_backfilled_to_memory() {
    let remote = Arc::new(InMemoryStore::with_entries(&[("abc123", "example.com")]));
    let state = common::create_test_state(remote.clone());
    let cache = state.cache.clone();
    let (server, _static_dir) = common::create_test_server(state);

    server.get("/abc123").await;
    let gets_after_first = remote.get_count();
    assert_eq!(cache.memory_len(), 1);

    let response = server.get("/abc123").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(remote.get_count(), gets_after_first);
}

#[tokio::test]
async fn test_shorten_then_visit() {
    let (server, _static_dir) = common::create_test_server(common::create_offline_state());

    let created: Value = server
        .post("/api/v5/shorten")
        .json(&json!({ "urls": "example.com/landing", "password": "s3cret" }))
        .await
        .json();
    let key = created[0]["key"].as_str().unwrap();

    let locked = server.get(&format!("/{}", key)).await;
    assert_eq!(locked.status_code(), 307);
    assert_eq!(
        locked.header("location"),
        format!("/unlock?key={}", key).as_str()
    );

    let unlocked = server.get(&format!("/{}$s3cret", key)).await;
    assert_eq!(unlocked.status_code(), 307);
    assert_eq!(unlocked.header("location"), "http://example.com/landing");
}

#[tokio::test]
async fn test_redirect_sends_notification() {
    let remote = Arc::new(InMemoryStore::with_entries(&[("abc123", "example.com")]));
    let cache = common::create_cache(StaticSeed::empty(), remote);
    let (notifier, mut rx) = common::channel_notifier();
    let state = AppState::new(cache, notifier, None, 4);
    let (server, _static_dir) = common::create_test_server(state);

    let response = server
        .get("/abc123")
        .add_header("x-forwarded-proto", "https")
        .add_header("x-forwarded-host", "s.example.com")
        .add_header("x-vercel-ip-city", "San%20Francisco")
        .add_header("x-vercel-ip-country-region", "CA")
        .add_header("x-vercel-ip-country", "US")
        .await;

    assert_eq!(response.status_code(), 307);

    let text = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(text.contains("https://s.example.com/abc123"));
    assert!(text.contains("San Francisco, CA, US"));
}
