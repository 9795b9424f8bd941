//! Authentication API integration tests
//!
//! Tests for signup, login, the status endpoints and how the auth gate
//! treats missing, forged and expired tokens.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    create_test_user, login_user, signup_user, test_tokens, token_issued_at, TestApp, TEST_PASSWORD,
};
use crate::{assert_contains, assert_status};

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::PUT,
            "/auth/signup",
            None,
            Some(json!({ "email": "a@x.com", "password": "secret1", "name": "Ann" })),
        )
        .await;

    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.body["message"], "User created!");
    assert!(response.body["userId"].as_str().is_some());
}

#[tokio::test]
async fn test_signup_invalid_input() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::PUT,
            "/auth/signup",
            None,
            Some(json!({ "email": "invalid-email", "password": "123", "name": "" })),
        )
        .await;

    assert_status!(response, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["message"], "Validation failed.");
    let fields: Vec<&str> = response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "password", "name"]);
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::new();
    signup_user(&app, "a@x.com", "secret1", "Ann").await;

    let response = app
        .request(
            Method::PUT,
            "/auth/signup",
            None,
            Some(json!({ "email": "A@X.com", "password": "secret1", "name": "Ann" })),
        )
        .await;

    assert_status!(response, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["data"][0]["field"], "email");
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    let user_id = signup_user(&app, "a@x.com", "secret1", "Ann").await;

    let response = app
        .request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "a@x.com", "password": "secret1" })),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["userId"], user_id.as_str());

    let token = response.body["token"].as_str().unwrap();
    let claim = test_tokens().verify(token).unwrap();
    assert_eq!(claim.user_id.to_string(), user_id);
    assert_eq!(claim.email, "a@x.com");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    signup_user(&app, "a@x.com", "secret1", "Ann").await;

    let response = app
        .request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "a@x.com", "password": "secret2" })),
        )
        .await;

    assert_status!(response, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "message": "Invalid email or password." }));
}

#[tokio::test]
async fn test_login_malformed_body_is_json_error() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let response = app.send(request).await;

    assert_status!(response, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["message"], "Validation failed.");
    assert_eq!(response.body["data"][0]["field"], "body");
}

#[tokio::test]
async fn test_login_unknown_email_looks_like_wrong_password() {
    let app = TestApp::new();
    signup_user(&app, "a@x.com", "secret1", "Ann").await;

    let unknown = app
        .request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "nobody@x.com", "password": "secret1" })),
        )
        .await;
    let wrong = app
        .request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "a@x.com", "password": "secret2" })),
        )
        .await;

    assert_status!(unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body, wrong.body);
}

#[tokio::test]
async fn test_public_routes_ignore_bad_tokens() {
    let app = TestApp::new();

    // The gate never rejects, so a forged token does not block signup
    let response = app
        .request(
            Method::PUT,
            "/auth/signup",
            Some("not.a.token"),
            Some(json!({ "email": "a@x.com", "password": "secret1", "name": "Ann" })),
        )
        .await;
    assert_status!(response, StatusCode::CREATED);

    let token = login_user(&app, "a@x.com", TEST_PASSWORD).await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_status_requires_token() {
    let app = TestApp::new();

    let response = app.get("/auth/status", None).await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Not authenticated.");

    let response = app.get("/auth/status", Some("garbage")).await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_status_round_trip() {
    let app = TestApp::new();
    let user = create_test_user(&app, "a@x.com").await;

    let response = app.get("/auth/status", Some(&user.token)).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "I am new!");

    let response = app
        .request(
            Method::PATCH,
            "/auth/status",
            Some(&user.token),
            Some(json!({ "status": "Writing a post" })),
        )
        .await;
    assert_status!(response, StatusCode::OK);

    let response = app.get("/auth/status", Some(&user.token)).await;
    assert_eq!(response.body["status"], "Writing a post");
}

#[tokio::test]
async fn test_expired_token_is_unauthenticated() {
    let app = TestApp::new();
    let user = create_test_user(&app, "a@x.com").await;

    // Issued 61 minutes ago with a one hour lifetime
    let issued_at = Utc::now() - Duration::minutes(61);
    let expired = token_issued_at(&user.id, &user.email, Duration::hours(1), issued_at);

    let response = app.get("/auth/status", Some(&expired)).await;
    assert_status!(response, StatusCode::UNAUTHORIZED);

    // Same token shape, still inside its lifetime
    let issued_at = Utc::now() - Duration::minutes(59);
    let fresh = token_issued_at(&user.id, &user.email, Duration::hours(1), issued_at);
    let response = app.get("/auth/status", Some(&fresh)).await;
    assert_status!(response, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new();
    let response = app.get("/nowhere", None).await;
    assert_status!(response, StatusCode::NOT_FOUND);
    assert_contains!(response.body["message"].as_str().unwrap(), "Not found");
}
