//! Registration, login and token enforcement.

mod common;

use common::{request, seed_user, send, spawn_app};
use http::StatusCode;
use pawcart::db::models::Role;
use serde_json::json;

fn register_body(email: &str) -> serde_json::Value {
    json!({
        "name": "Jo",
        "email": email,
        "password": "hunter22!hunter22!"
    })
}

#[tokio::test]
async fn register_returns_a_working_token_and_no_hash() {
    let t = spawn_app().await;

    let (status, body) = send(
        &t.app,
        request("POST", "/api/auth/register", None, Some(register_body("jo@example.com"))),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], "jo@example.com");
    assert_eq!(body["user"]["role"], "customer");
    assert!(body["user"].get("passwordHash").is_none());

    // the issued token authenticates follow-up calls
    let token = body["token"].as_str().unwrap();
    let (status, _) = send(&t.app, request("GET", "/api/orders", Some(token), None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let t = spawn_app().await;

    let (status, _) = send(
        &t.app,
        request("POST", "/api/auth/register", None, Some(register_body("jo@example.com"))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // emails are case-insensitive
    let (status, body) = send(
        &t.app,
        request("POST", "/api/auth/register", None, Some(register_body("JO@example.com"))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");
}

#[tokio::test]
async fn malformed_registration_is_rejected() {
    let t = spawn_app().await;

    let (status, body) = send(
        &t.app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "name": "Jo", "email": "not-an-email", "password": "hunter22!pw" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");

    let (status, _) = send(
        &t.app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "name": "Jo", "email": "jo@example.com", "password": "short" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_uses_one_error_for_bad_email_and_bad_password() {
    let t = spawn_app().await;
    seed_user(&t.state, "Jo", "jo@example.com", Role::Customer).await;

    let (status, wrong_password) = send(
        &t.app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "jo@example.com", "password": "nope" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, unknown_email) = send(
        &t.app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ghost@example.com", "password": "nope" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // indistinguishable responses
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn login_returns_token_for_valid_credentials() {
    let t = spawn_app().await;
    // seed_user hashes this exact password
    seed_user(&t.state, "Jo", "jo@example.com", Role::Customer).await;

    let (status, body) = send(
        &t.app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "jo@example.com", "password": "correct horse battery" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();
    let (status, _) = send(&t.app, request("GET", "/api/subscriptions", Some(token), None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let t = spawn_app().await;

    let (status, body) = send(&t.app, request("GET", "/api/orders", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");

    let (status, body) =
        send(&t.app, request("GET", "/api/orders", Some("garbage.token.here"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3002");
}

#[tokio::test]
async fn health_is_public() {
    let t = spawn_app().await;
    let (status, body) = send(&t.app, request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
