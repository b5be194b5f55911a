use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::feed_service::FeedService;
use crate::application::profile_service::ProfileService;
use crate::infrastructure::jwt::JwtService;
use crate::presentation::AppState;
use crate::server::build_router;
use crate::test_support::{FakeIdentity, FakePostRepo, identity_record, sample_post};

const SECRET: &str = "0123456789abcdef0123456789abcdef";

struct Harness {
    app: Router,
    jwt: Arc<JwtService>,
    repo: FakePostRepo,
}

fn harness(repo: FakePostRepo) -> Harness {
    let identity = Arc::new(FakeIdentity::with_users(vec![
        identity_record("user_1", "alice"),
        identity_record("user_2", "bob"),
    ]));
    let jwt = Arc::new(JwtService::new(SECRET));
    let state = AppState::new(
        Arc::new(FeedService::new(Arc::new(repo.clone()), identity.clone())),
        Arc::new(ProfileService::new(identity)),
        jwt.clone(),
    );

    Harness {
        app: build_router(state),
        jwt,
        repo,
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router must respond");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body must be readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body must be json")
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request must build")
}

fn create(content: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/posts")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(json!({ "content": content }).to_string()))
        .expect("request must build")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let h = harness(FakePostRepo::default());

    let (status, body) = send(&h.app, get("/healthz")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn profile_resolves_with_and_without_at_sign() {
    let h = harness(FakePostRepo::default());

    let (with_at_status, with_at) = send(&h.app, get("/api/profiles/@alice")).await;
    let (bare_status, bare) = send(&h.app, get("/api/profiles/alice")).await;

    assert_eq!(with_at_status, StatusCode::OK);
    assert_eq!(bare_status, StatusCode::OK);
    assert_eq!(with_at, bare);
    assert_eq!(with_at["id"], "user_1");
    assert_eq!(with_at["email"], "alice@example.com");
}

#[tokio::test]
async fn profile_of_unknown_handle_is_404() {
    let h = harness(FakePostRepo::default());

    let (status, body) = send(&h.app, get("/api/profiles/@nobody")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn projected_author_carries_only_public_fields() {
    let now = Utc::now();
    let h = harness(FakePostRepo::with_posts(vec![sample_post(
        "user_1", "first", now,
    )]));

    let (status, body) = send(&h.app, get("/api/posts")).await;

    assert_eq!(status, StatusCode::OK);
    let author = body[0]["author"]
        .as_object()
        .expect("author must be an object");
    let mut keys: Vec<&str> = author.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "email",
            "first_name",
            "id",
            "last_name",
            "profile_image_url",
            "username"
        ]
    );
}

#[tokio::test]
async fn create_post_without_token_is_401() {
    let h = harness(FakePostRepo::default());

    let (status, _) = send(&h.app, create("hello", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(
        h.repo
            .created_input
            .lock()
            .expect("created_input mutex poisoned")
            .is_none()
    );
}

#[tokio::test]
async fn create_post_with_foreign_token_is_401() {
    let h = harness(FakePostRepo::default());
    let foreign = JwtService::new("ffffffffffffffffffffffffffffffff").issue_for_tests("user_1", 600);

    let (status, _) = send(&h.app, create("hello", Some(&foreign))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_post_reports_content_field_errors() {
    let h = harness(FakePostRepo::default());
    let token = h.jwt.issue_for_tests("user_1", 600);
    let too_long = "a".repeat(281);

    for (content, expected) in [
        ("", "must not be empty"),
        ("   ", "must not be empty"),
        (too_long.as_str(), "must be at most 280 characters"),
    ] {
        let (status, body) = send(&h.app, create(content, Some(&token))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "content {content:?}");
        assert_eq!(body["field_errors"]["content"][0], expected);
    }
    assert!(
        h.repo
            .created_input
            .lock()
            .expect("created_input mutex poisoned")
            .is_none()
    );
}

#[tokio::test]
async fn created_post_appears_in_feed_exactly_once() {
    let h = harness(FakePostRepo::with_posts(vec![sample_post(
        "user_2",
        "older",
        Utc::now() - Duration::minutes(5),
    )]));
    let token = h.jwt.issue_for_tests("user_1", 600);

    let (status, created) = send(&h.app, create("  hello  ", Some(&token))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["post"]["content"], "hello");
    assert_eq!(created["post"]["author_id"], "user_1");
    assert_eq!(created["author"]["username"], "alice");

    let (status, feed) = send(&h.app, get("/api/posts")).await;
    assert_eq!(status, StatusCode::OK);
    let feed = feed.as_array().expect("feed must be an array");
    let matching = feed
        .iter()
        .filter(|item| item["post"]["id"] == created["post"]["id"])
        .count();
    assert_eq!(matching, 1);
    assert_eq!(feed[0]["post"]["content"], "hello");
}

#[tokio::test]
async fn single_post_is_found_by_id() {
    let post = sample_post("user_2", "hi from bob", Utc::now());
    let id = post.id;
    let h = harness(FakePostRepo::with_posts(vec![post]));

    let (status, body) = send(&h.app, get(&format!("/api/posts/{id}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"]["content"], "hi from bob");
    assert_eq!(body["author"]["username"], "bob");
}

#[tokio::test]
async fn unknown_or_malformed_post_id_is_404() {
    let h = harness(FakePostRepo::default());

    let (missing, _) = send(&h.app, get(&format!("/api/posts/{}", uuid::Uuid::new_v4()))).await;
    let (malformed, _) = send(&h.app, get("/api/posts/not-a-uuid")).await;

    assert_eq!(missing, StatusCode::NOT_FOUND);
    assert_eq!(malformed, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_feed_contains_only_that_author() {
    let now = Utc::now();
    let h = harness(FakePostRepo::with_posts(vec![
        sample_post("user_1", "alice 1", now),
        sample_post("user_2", "bob 1", now - Duration::minutes(1)),
        sample_post("user_1", "alice 2", now - Duration::minutes(2)),
    ]));

    let (status, body) = send(&h.app, get("/api/users/user_1/posts")).await;

    assert_eq!(status, StatusCode::OK);
    let contents: Vec<&str> = body
        .as_array()
        .expect("feed must be an array")
        .iter()
        .filter_map(|item| item["post"]["content"].as_str())
        .collect();
    assert_eq!(contents, vec!["alice 1", "alice 2"]);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let h = harness(FakePostRepo::default());

    let (status, body) = send(&h.app, get("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/posts"].is_object());
}
