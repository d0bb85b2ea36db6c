//! Back-office authorization and aggregation.

mod common;

use common::{request, seed_product, seed_user, send, spawn_app};
use http::StatusCode;
use pawcart::db::models::Role;
use rust_decimal_macros::dec;
use serde_json::json;

fn order_body(product: &str, quantity: u32) -> serde_json::Value {
    json!({
        "items": [{ "product": product, "quantity": quantity }],
        "shippingAddress": { "city": "Dogtown" }
    })
}

#[tokio::test]
async fn admin_routes_reject_customers_and_anonymous() {
    let t = spawn_app().await;
    let (_, customer) = seed_user(&t.state, "Jo", "jo@example.com", Role::Customer).await;

    for uri in ["/api/admin/orders", "/api/admin/users", "/api/admin/stats"] {
        let (status, body) = send(&t.app, request("GET", uri, Some(&customer), None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body["code"], "E2001");

        let (status, body) = send(&t.app, request("GET", uri, None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["code"], "E3001");
    }
}

#[tokio::test]
async fn user_listing_never_exposes_credential_hashes() {
    let t = spawn_app().await;
    seed_user(&t.state, "Jo", "jo@example.com", Role::Customer).await;
    let (_, admin) = seed_user(&t.state, "Root", "admin@example.com", Role::Admin).await;

    let (status, users) = send(&t.app, request("GET", "/api/admin/users", Some(&admin), None)).await;
    assert_eq!(status, StatusCode::OK);

    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("passwordHash").is_none());
        assert!(user.get("password").is_none());
        assert!(user["email"].is_string());
    }
}

#[tokio::test]
async fn revenue_excludes_cancelled_orders() {
    let t = spawn_app().await;
    let (_, customer) = seed_user(&t.state, "Jo", "jo@example.com", Role::Customer).await;
    let (_, admin) = seed_user(&t.state, "Root", "admin@example.com", Role::Admin).await;
    let product = seed_product(&t.state, "Kibble", dec!(10.00), 10).await;

    let (_, kept) = send(
        &t.app,
        request("POST", "/api/orders", Some(&customer), Some(order_body(&product, 3))),
    )
    .await;
    let (_, cancelled) = send(
        &t.app,
        request("POST", "/api/orders", Some(&customer), Some(order_body(&product, 2))),
    )
    .await;
    assert_eq!(kept["totalAmount"], "30.00");

    send(
        &t.app,
        request(
            "PATCH",
            &format!("/api/admin/orders/{}", cancelled["id"].as_str().unwrap()),
            Some(&admin),
            Some(json!({ "status": "cancelled" })),
        ),
    )
    .await;

    let (status, body) = send(&t.app, request("GET", "/api/admin/orders", Some(&admin), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orders"].as_array().unwrap().len(), 2);
    assert_eq!(body["totalRevenue"], "30.00");

    // customer identity resolved for display
    let customer_info = &body["orders"][0]["customer"];
    assert_eq!(customer_info["name"], "Jo");
    assert_eq!(customer_info["email"], "jo@example.com");
}

#[tokio::test]
async fn stats_report_counts_and_revenue() {
    let t = spawn_app().await;
    let (_, customer) = seed_user(&t.state, "Jo", "jo@example.com", Role::Customer).await;
    let (_, admin) = seed_user(&t.state, "Root", "admin@example.com", Role::Admin).await;
    let product = seed_product(&t.state, "Kibble", dec!(5.00), 10).await;
    seed_product(&t.state, "Brush", dec!(8.00), 4).await;

    send(
        &t.app,
        request("POST", "/api/orders", Some(&customer), Some(order_body(&product, 2))),
    )
    .await;

    let (status, stats) = send(&t.app, request("GET", "/api/admin/stats", Some(&admin), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["users"], 2);
    assert_eq!(stats["products"], 2);
    assert_eq!(stats["orders"], 1);
    assert_eq!(stats["totalRevenue"], "10.00");
}

#[tokio::test]
async fn product_mutations_are_admin_only() {
    let t = spawn_app().await;
    let (_, customer) = seed_user(&t.state, "Jo", "jo@example.com", Role::Customer).await;
    let (_, admin) = seed_user(&t.state, "Root", "admin@example.com", Role::Admin).await;

    let payload = json!({
        "name": "Squeaky Bone",
        "description": "Classic",
        "price": "6.50",
        "category": "toys",
        "stock": 12
    });

    let (status, _) = send(
        &t.app,
        request("POST", "/api/products", Some(&customer), Some(payload.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, product) =
        send(&t.app, request("POST", "/api/products", Some(&admin), Some(payload))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["price"], "6.50");
    let uri = format!("/api/products/{}", product["id"].as_str().unwrap());

    let (status, updated) = send(
        &t.app,
        request("PATCH", &uri, Some(&admin), Some(json!({ "price": "7.00", "stock": 8 }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], "7.00");
    assert_eq!(updated["stock"], 8);
    assert_eq!(updated["name"], "Squeaky Bone");

    let (status, _) = send(&t.app, request("DELETE", &uri, Some(&admin), None)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&t.app, request("GET", &uri, None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_product_payloads_are_rejected() {
    let t = spawn_app().await;
    let (_, admin) = seed_user(&t.state, "Root", "admin@example.com", Role::Admin).await;

    // non-positive price
    let (status, body) = send(
        &t.app,
        request(
            "POST",
            "/api/products",
            Some(&admin),
            Some(json!({
                "name": "Freebie",
                "description": "x",
                "price": "0",
                "category": "toys"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");

    // unknown category enum value
    let (status, _) = send(
        &t.app,
        request(
            "POST",
            "/api/products",
            Some(&admin),
            Some(json!({
                "name": "Thing",
                "description": "x",
                "price": "5.00",
                "category": "vehicles"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
