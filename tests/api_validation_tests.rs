// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;

mod common;
use common::{create_test_app, request, send, token_for};

#[tokio::test]
async fn test_caption_too_long() {
    let (app, state) = create_test_app();
    let token = token_for(&state, "user-1");

    let long_caption = "a".repeat(501); // 501 characters

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/posts",
            Some(&token),
            Some(json!({
                "cafeId": "cafe-1",
                "mediaUrl": "https://example.com/a.jpg",
                "mediaType": "video",
                "caption": long_caption
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");
}

#[tokio::test]
async fn test_invalid_visit_time_format() {
    let (app, state) = create_test_app();
    let token = token_for(&state, "user-1");

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/visits",
            Some(&token),
            Some(json!({ "cafeId": "cafe-1", "visitTime": "invalid-date" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "visitTime must be an RFC3339 timestamp");
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let (app, _) = create_test_app();

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");
}

#[tokio::test]
async fn test_unknown_media_type_rejected() {
    let (app, state) = create_test_app();
    let token = token_for(&state, "user-1");

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/posts",
            Some(&token),
            Some(json!({
                "cafeId": "cafe-1",
                "mediaUrl": "https://example.com/a.gif",
                "mediaType": "gif",
                "caption": "Animated"
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");
    assert_eq!(state.db.read(|t| t.posts.len()), 1);
}

#[tokio::test]
async fn test_fractional_rating_is_validation_error() {
    let (app, state) = create_test_app();
    let token = token_for(&state, "user-1");

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/reviews",
            Some(&token),
            Some(json!({
                "cafeId": "cafe-1",
                "ratings": { "coffee": 4.5, "seating": 4, "noise": 4, "environment": 4 },
                "text": "Half stars are not a thing here."
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");
    assert!(body["details"].as_str().unwrap().contains("coffee"));
    assert_eq!(state.db.read(|t| t.reviews.len()), 2);
}

#[tokio::test]
async fn test_missing_body_content_type() {
    let (app, _) = create_test_app();

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .body(Body::from("{}"))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");
}

#[tokio::test]
async fn test_bad_query_strings_use_error_body() {
    let (app, _) = create_test_app();

    for uri in [
        "/api/cafes/nearby?longitude=-122.4",
        "/api/cafes/nearby?latitude=abc&longitude=-122.4",
        "/api/cafes/search",
        "/api/cafes/cafe-1/visitors?timeRange=decade",
        "/api/posts?limit=-1",
        "/api/cafes/cafe-1/reviews?offset=x",
    ] {
        let (status, body) = send(&app, request("GET", uri, None, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert_eq!(body["error"], "validation_failed", "uri: {}", uri);
    }
}

#[tokio::test]
async fn test_invalid_signup_email() {
    let (app, _) = create_test_app();

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "name": "Robin", "email": "robin-at-example", "password": "123456" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
