//! Integration tests for voting over HTTP.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum_extra::extract::cookie::Key;
use votebox_api::session::SessionSettings;
use votebox_core::vote::Vote;
use votebox_test_support::{FailingVoteStore, InMemoryVoteStore};

#[tokio::test]
async fn test_session_cookie_round_trip_updates_same_vote() {
    let store = Arc::new(InMemoryVoteStore::new());
    let app = common::build_test_app(store.clone());

    // First vote without a cookie creates a session.
    let first = common::post_json(
        app.clone(),
        "/votes",
        &serde_json::json!({ "product_id": "p1", "rate": 5 }),
        None,
    )
    .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.json["outcome"], "created");
    let cookie = first.cookie.expect("new session sets a cookie");
    let session_id = first.json["vote"]["session_id"].as_str().unwrap().to_owned();
    uuid::Uuid::parse_str(&session_id).unwrap();

    // Second vote with the cookie updates the same record.
    let second = common::post_json(
        app.clone(),
        "/votes",
        &serde_json::json!({ "product_id": "p1", "rate": 9 }),
        Some(&cookie),
    )
    .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.json["outcome"], "updated");
    assert_eq!(second.json["vote"]["session_id"], session_id.as_str());
    assert_eq!(second.json["vote"]["rate"], 9);

    // The session's votes hold only the latest rate.
    let (status, json) = common::get_json(app, &format!("/votes/session/{session_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!([{ "session_id": session_id, "product_id": "p1", "rate": 9 }])
    );
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_requests_without_cookie_get_distinct_sessions() {
    let store = Arc::new(InMemoryVoteStore::new());
    let app = common::build_test_app(store.clone());
    let body = serde_json::json!({ "product_id": "p1", "rate": 3 });

    let first = common::post_json(app.clone(), "/votes", &body, None).await;
    let second = common::post_json(app, "/votes", &body, None).await;

    assert_eq!(first.json["outcome"], "created");
    assert_eq!(second.json["outcome"], "created");
    assert_ne!(first.json["vote"]["session_id"], second.json["vote"]["session_id"]);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_out_of_range_rates_return_400() {
    let app = common::build_test_app(Arc::new(InMemoryVoteStore::new()));

    for rate in [0, 11, -3] {
        let response = common::post_json(
            app.clone(),
            "/votes",
            &serde_json::json!({ "product_id": "p1", "rate": rate }),
            None,
        )
        .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json["error"], "invalid_rate");
    }
}

#[tokio::test]
async fn test_unknown_product_returns_404_even_with_bad_rate() {
    let app = common::build_test_app(Arc::new(InMemoryVoteStore::new()));

    let response = common::post_json(
        app,
        "/votes",
        &serde_json::json!({ "product_id": "unknown", "rate": 42 }),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json["error"], "product_not_found");
}

#[tokio::test]
async fn test_unreadable_bodies_return_400_error_body() {
    let app = common::build_test_app(Arc::new(InMemoryVoteStore::new()));

    for body in [
        serde_json::json!({ "product_id": "p1" }),
        serde_json::json!({ "product_id": "p1", "rate": "five" }),
        serde_json::json!([1, 2, 3]),
    ] {
        let response = common::post_json(app.clone(), "/votes", &body, None).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json["error"], "invalid_request");
        assert!(
            response.json["message"]
                .as_str()
                .unwrap()
                .starts_with("request is invalid")
        );
    }
}

#[tokio::test]
async fn test_list_votes_by_product_and_all_votes() {
    let store = InMemoryVoteStore::with_votes([
        Vote::new("s1", "p1", 4),
        Vote::new("s2", "p1", 8),
        Vote::new("s2", "p2", 1),
    ]);
    let app = common::build_test_app(Arc::new(store));

    let (status, json) = common::get_json(app.clone(), "/votes/product/p1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);

    let (status, json) = common::get_json(app.clone(), "/votes/product/p2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);

    let (status, json) = common::get_json(app, "/votes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_votes_for_unknown_product_returns_404() {
    let app = common::build_test_app(Arc::new(InMemoryVoteStore::new()));

    let (status, json) = common::get_json(app, "/votes/product/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "product_not_found");
}

#[tokio::test]
async fn test_empty_collections_are_not_errors() {
    let app = common::build_test_app(Arc::new(InMemoryVoteStore::new()));

    let (status, json) = common::get_json(app.clone(), "/votes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));

    let (status, json) = common::get_json(app, "/votes/session/nobody").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_averages_over_http_include_zero_vote_products() {
    let store = Arc::new(InMemoryVoteStore::new());
    let app = common::build_test_app(store);
    for rate in [4, 8] {
        let response = common::post_json(
            app.clone(),
            "/votes",
            &serde_json::json!({ "product_id": "p1", "rate": rate }),
            None,
        )
        .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let (status, json) = common::get_json(app, "/products/avgs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["p1"]["votes_count"], 2);
    assert_eq!(json["p1"]["avg"], 6.0);
    assert_eq!(json["p2"]["votes_count"], 0);
    assert_eq!(json["p2"]["avg"], 0.0);
}

#[tokio::test]
async fn test_storage_failure_returns_503() {
    let app = common::build_test_app(Arc::new(FailingVoteStore));

    let response = common::post_json(
        app,
        "/votes",
        &serde_json::json!({ "product_id": "p1", "rate": 5 }),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json["error"], "storage_unavailable");
}

#[tokio::test]
async fn test_cookie_is_honored_by_a_restarted_server_with_same_key() {
    let store = Arc::new(InMemoryVoteStore::new());
    let settings = SessionSettings::new(Key::from(&[7u8; 64]), false);
    let body = serde_json::json!({ "product_id": "p1", "rate": 5 });

    let first = common::post_json(
        common::build_test_app_with_sessions(store.clone(), &settings),
        "/votes",
        &body,
        None,
    )
    .await;
    let cookie = first.cookie.expect("new session sets a cookie");

    // A fresh router stands in for a restarted process.
    let second = common::post_json(
        common::build_test_app_with_sessions(store.clone(), &settings),
        "/votes",
        &serde_json::json!({ "product_id": "p1", "rate": 8 }),
        Some(&cookie),
    )
    .await;

    assert_eq!(first.json["outcome"], "created");
    assert_eq!(second.json["outcome"], "updated");
    assert!(second.cookie.is_none());
    assert_eq!(second.json["vote"]["session_id"], first.json["vote"]["session_id"]);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_cookie_signed_with_another_key_starts_a_new_session() {
    let store = Arc::new(InMemoryVoteStore::new());
    let body = serde_json::json!({ "product_id": "p1", "rate": 5 });

    let first = common::post_json(
        common::build_test_app_with_sessions(
            store.clone(),
            &SessionSettings::new(Key::from(&[1u8; 64]), false),
        ),
        "/votes",
        &body,
        None,
    )
    .await;
    let cookie = first.cookie.expect("new session sets a cookie");

    let second = common::post_json(
        common::build_test_app_with_sessions(
            store.clone(),
            &SessionSettings::new(Key::from(&[2u8; 64]), false),
        ),
        "/votes",
        &body,
        Some(&cookie),
    )
    .await;

    assert_eq!(second.json["outcome"], "created");
    assert!(second.cookie.is_some());
    assert_ne!(second.json["vote"]["session_id"], first.json["vote"]["session_id"]);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_repeated_updates_keep_the_last_rate() {
    let store = Arc::new(InMemoryVoteStore::new());
    let app = common::build_test_app(store.clone());

    let first = common::post_json(
        app.clone(),
        "/votes",
        &serde_json::json!({ "product_id": "p2", "rate": 1 }),
        None,
    )
    .await;
    let cookie = first.cookie.expect("new session sets a cookie");
    for rate in [4, 10, 7] {
        let response = common::post_json(
            app.clone(),
            "/votes",
            &serde_json::json!({ "product_id": "p2", "rate": rate }),
            Some(&cookie),
        )
        .await;
        assert_eq!(response.json["outcome"], "updated");
    }

    let (_, json) = common::get_json(app, "/votes/product/p2").await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["rate"], 7);
}
