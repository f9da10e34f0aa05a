use apibatch_engine::{ApiBatcher, ApiEntity, ConcurrentStrategy, EntityError, HttpPost};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── post ─────────────────────────────────────────────────────────

#[tokio::test]
async fn post_records_the_assigned_remote_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_json(json!({"title": "hello", "body": "world"})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": 101, "title": "hello", "body": "world"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut post = HttpPost::new(server.uri(), "hello", "world");
    assert_eq!(post.remote_id(), None);

    post.post().await.unwrap();
    assert_eq!(post.remote_id(), Some(101));
}

#[tokio::test]
async fn post_rejection_is_reported_with_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(422).set_body_string("title is required"))
        .mount(&server)
        .await;

    let mut post = HttpPost::new(server.uri(), "", "");
    let err = post.post().await.unwrap_err();

    match err {
        EntityError::Rejected { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "title is required");
        }
        other => panic!("expected Rejected, got {other}"),
    }
    assert_eq!(post.remote_id(), None);
}

#[tokio::test]
async fn post_network_error() {
    // Nothing listens here.
    let mut post = HttpPost::new("http://127.0.0.1:1", "hello", "world");
    let err = post.post().await.unwrap_err();
    assert!(matches!(err, EntityError::Network(_)));
}

// ── sync ─────────────────────────────────────────────────────────

#[tokio::test]
async fn sync_before_post_fails_with_missing_remote_id() {
    let mut post = HttpPost::new("http://unused.invalid", "hello", "world");
    let err = post.sync().await.unwrap_err();
    assert!(matches!(err, EntityError::MissingRemoteId));
}

#[tokio::test]
async fn sync_refreshes_local_fields_from_the_remote() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 7, "title": "edited", "body": "remote body"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut post = HttpPost::new(server.uri(), "draft", "local body");
    post.post().await.unwrap();
    post.sync().await.unwrap();

    assert_eq!(post.title(), "edited");
    assert_eq!(post.body(), "remote body");
}

// ── Full two-phase push ──────────────────────────────────────────

#[tokio::test]
async fn batcher_pushes_posts_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 42})))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/posts/\d+$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 42, "title": "synced", "body": "synced"})),
        )
        .expect(3)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let mut batcher = ApiBatcher::with_strategy(Arc::new(ConcurrentStrategy::new()));
    for i in 0..3 {
        batcher.enqueue(HttpPost::with_client(
            client.clone(),
            server.uri(),
            format!("post-{i}"),
            "body",
        ));
    }

    let report = batcher.push().await.unwrap();

    assert!(report.is_clean(), "failures: {:?}", report.failed_labels());
    assert_eq!(report.post.len(), 3);
    assert_eq!(report.sync.len(), 3);
}
