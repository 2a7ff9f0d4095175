//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;
use votebox_core::catalog::CatalogHandle;
use votebox_core::repository::VoteStore;
use votebox_test_support::catalog_of;
use votebox_voting::application::service::VotingService;

use votebox_api::build_router;
use votebox_api::session::SessionSettings;
use votebox_api::state::AppState;

/// Build the full app router over `store` with a two-product catalog
/// (`p1`, `p2`). Uses the same route and middleware structure as `main.rs`.
pub fn build_test_app(store: Arc<dyn VoteStore>) -> Router {
    build_test_app_with_sessions(store, &SessionSettings::ephemeral())
}

/// Like [`build_test_app`], signing session cookies with `sessions`.
pub fn build_test_app_with_sessions(
    store: Arc<dyn VoteStore>,
    sessions: &SessionSettings,
) -> Router {
    let catalog = Arc::new(CatalogHandle::new(catalog_of(&[
        ("p1", "Apple"),
        ("p2", "Pear"),
    ])));
    let voting = VotingService::new(store, catalog);
    build_router(AppState::new(voting), sessions)
}

/// Response parts the tests inspect.
pub struct TestResponse {
    pub status: StatusCode,
    pub json: serde_json::Value,
    /// The `name=value` part of a `Set-Cookie` header, if any.
    pub cookie: Option<String>,
}

/// Send a POST request with a JSON body, optionally carrying a cookie.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
    cookie: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;
    (response.status, response.json)
}

async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_owned);
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null)
    };

    TestResponse {
        status,
        json,
        cookie,
    }
}
