//! Shared helpers for integration tests: in-memory state, seeded accounts
//! and a oneshot request driver.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use pawcart::api;
use pawcart::auth::JwtConfig;
use pawcart::core::ServerState;
use pawcart::db::models::{Category, ProductCreate, Role, User};
use pawcart::db::repository::{ProductRepository, UserRepository};

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
}

fn test_jwt() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-0123456789abcdef".to_string(),
        expiration_minutes: 60,
        issuer: "pawcart".to_string(),
        audience: "pawcart-clients".to_string(),
    }
}

/// Fresh in-memory application
pub async fn spawn_app() -> TestApp {
    let state = ServerState::for_tests(test_jwt()).await;
    let app = api::build_app().with_state(state.clone());
    TestApp { app, state }
}

/// Seed an account directly in the store; returns `(record id, bearer token)`
pub async fn seed_user(state: &ServerState, name: &str, email: &str, role: Role) -> (String, String) {
    let hash = User::hash_password("correct horse battery").unwrap();
    let user = UserRepository::new(state.get_db())
        .create(name.to_string(), email.to_string(), hash, None, None, role)
        .await
        .unwrap();

    let id = user.id.unwrap().to_string();
    let token = state
        .jwt_service
        .generate_token(&id, email, role.as_str())
        .unwrap();
    (id, token)
}

/// Seed a catalog product; returns its record id
pub async fn seed_product(state: &ServerState, name: &str, price: Decimal, stock: i64) -> String {
    let product = ProductRepository::new(state.get_db())
        .create(ProductCreate {
            name: name.to_string(),
            description: format!("{name} description"),
            price,
            category: Category::Food,
            subcategory: None,
            pet_type: None,
            images: Some(vec![format!("/img/{name}.jpg")]),
            stock: Some(stock),
            sku: None,
            brand: None,
            rating: None,
            featured: None,
            subscription_eligible: None,
        })
        .await
        .unwrap();
    product.id.unwrap().to_string()
}

/// Build a request; bodies are JSON
pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Drive one request through the router; returns status and parsed body
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}
