//! Subscription lifecycle over the assembled router.

mod common;

use chrono::{DateTime, Months, Utc};
use common::{request, seed_user, send, spawn_app};
use http::StatusCode;
use pawcart::db::models::Role;
use serde_json::json;

fn sub_body(frequency: &str) -> serde_json::Value {
    json!({
        "planName": "Monthly Box",
        "price": "29.99",
        "frequency": frequency
    })
}

#[tokio::test]
async fn creating_a_subscription_derives_the_next_delivery_date() {
    let t = spawn_app().await;
    let (_, token) = seed_user(&t.state, "Jo", "jo@example.com", Role::Customer).await;

    let before = Utc::now();
    let (status, body) = send(
        &t.app,
        request("POST", "/api/subscriptions", Some(&token), Some(sub_body("monthly"))),
    )
    .await;
    let after = Utc::now();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "active");
    assert_eq!(body["frequency"], "monthly");
    assert_eq!(body["price"], "29.99");

    let next: DateTime<Utc> = body["nextDeliveryDate"].as_str().unwrap().parse().unwrap();
    assert!(next >= before.checked_add_months(Months::new(1)).unwrap());
    assert!(next <= after.checked_add_months(Months::new(1)).unwrap());
}

#[tokio::test]
async fn unknown_frequency_is_rejected_at_the_boundary() {
    let t = spawn_app().await;
    let (_, token) = seed_user(&t.state, "Jo", "jo@example.com", Role::Customer).await;

    let (status, body) = send(
        &t.app,
        request("POST", "/api/subscriptions", Some(&token), Some(sub_body("weekly"))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");

    // nothing was created
    let (_, subs) = send(&t.app, request("GET", "/api/subscriptions", Some(&token), None)).await;
    assert_eq!(subs.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn pause_resume_cancel_and_terminal_cancelled() {
    let t = spawn_app().await;
    let (_, token) = seed_user(&t.state, "Jo", "jo@example.com", Role::Customer).await;

    let (_, sub) = send(
        &t.app,
        request("POST", "/api/subscriptions", Some(&token), Some(sub_body("quarterly"))),
    )
    .await;
    let uri = format!("/api/subscriptions/{}", sub["id"].as_str().unwrap());

    let (status, body) = send(
        &t.app,
        request("PATCH", &uri, Some(&token), Some(json!({ "status": "paused" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "paused");

    let (status, body) = send(
        &t.app,
        request("PATCH", &uri, Some(&token), Some(json!({ "status": "active" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");

    let (status, body) = send(
        &t.app,
        request("PATCH", &uri, Some(&token), Some(json!({ "status": "cancelled" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");

    // cancelled accepts nothing, not even itself
    for target in ["active", "paused", "cancelled"] {
        let (status, body) = send(
            &t.app,
            request("PATCH", &uri, Some(&token), Some(json!({ "status": target }))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "E0002");
    }
}

#[tokio::test]
async fn foreign_subscriptions_read_as_not_found() {
    let t = spawn_app().await;
    let (_, owner) = seed_user(&t.state, "Jo", "jo@example.com", Role::Customer).await;
    let (_, other) = seed_user(&t.state, "Sam", "sam@example.com", Role::Customer).await;

    let (_, sub) = send(
        &t.app,
        request("POST", "/api/subscriptions", Some(&owner), Some(sub_body("monthly"))),
    )
    .await;
    let uri = format!("/api/subscriptions/{}", sub["id"].as_str().unwrap());

    let (status, body) = send(&t.app, request("GET", &uri, Some(&other), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");

    let (status, _) = send(
        &t.app,
        request("PATCH", &uri, Some(&other), Some(json!({ "status": "paused" }))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&t.app, request("DELETE", &uri, Some(&other), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // the owner still sees it, untouched
    let (status, body) = send(&t.app, request("GET", &uri, Some(&owner), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn listing_shows_only_own_subscriptions() {
    let t = spawn_app().await;
    let (_, jo) = seed_user(&t.state, "Jo", "jo@example.com", Role::Customer).await;
    let (_, sam) = seed_user(&t.state, "Sam", "sam@example.com", Role::Customer).await;

    send(&t.app, request("POST", "/api/subscriptions", Some(&jo), Some(sub_body("monthly")))).await;
    send(&t.app, request("POST", "/api/subscriptions", Some(&jo), Some(sub_body("quarterly")))).await;
    send(&t.app, request("POST", "/api/subscriptions", Some(&sam), Some(sub_body("bi-monthly")))).await;

    let (_, jo_subs) = send(&t.app, request("GET", "/api/subscriptions", Some(&jo), None)).await;
    assert_eq!(jo_subs.as_array().unwrap().len(), 2);

    let (_, sam_subs) = send(&t.app, request("GET", "/api/subscriptions", Some(&sam), None)).await;
    assert_eq!(sam_subs.as_array().unwrap().len(), 1);
    assert_eq!(sam_subs[0]["frequency"], "bi-monthly");
}

#[tokio::test]
async fn delete_removes_the_subscription() {
    let t = spawn_app().await;
    let (_, token) = seed_user(&t.state, "Jo", "jo@example.com", Role::Customer).await;

    let (_, sub) = send(
        &t.app,
        request("POST", "/api/subscriptions", Some(&token), Some(sub_body("monthly"))),
    )
    .await;
    let uri = format!("/api/subscriptions/{}", sub["id"].as_str().unwrap());

    let (status, body) = send(&t.app, request("DELETE", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Subscription deleted");

    let (status, _) = send(&t.app, request("GET", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
