//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{TimeDelta, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tower::ServiceExt;

use tablehub_api::{AppState, build_app};
use tablehub_auth::Claims;
use tablehub_core::config::AppConfig;
use tablehub_core::types::UserId;
use tablehub_database::repositories::MemoryReservationRepository;
use tablehub_entity::user::UserRole;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
}

/// A caller with a signed bearer token.
pub struct TestUser {
    /// User id carried in the token subject.
    pub id: UserId,
    /// Signed HS256 access token.
    pub token: String,
}

impl TestApp {
    /// Create a new test application backed by the in-memory store.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.provider = "memory".to_string();
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let store = Arc::new(MemoryReservationRepository::new());
        let state = AppState::new(config.clone(), store);
        let router = build_app(state, &config.server.cors);

        Self { router, config }
    }

    /// Mint a token for a fresh user with `role`.
    pub fn user(&self, role: UserRole) -> TestUser {
        let id = UserId::new();
        let now = Utc::now();
        let claims = Claims {
            sub: id,
            role,
            name: Some("Test User".to_string()),
            iat: now.timestamp(),
            exp: (now + TimeDelta::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.auth.jwt_secret.as_bytes()),
        )
        .expect("Failed to sign test token");
        TestUser { id, token }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send("GET", path, token, None).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("POST", path, token, Some(body)).await
    }

    /// Make a PUT request with JSON body
    pub async fn put(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("PUT", path, token, Some(body)).await
    }

    /// Make a DELETE request with an optional JSON body
    pub async fn delete(
        &self,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.send("DELETE", path, token, body).await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        match body {
            Some(json) => {
                self.send_raw(method, path, token, "application/json", json.to_string())
                    .await
            }
            None => self.send_request(method, path, token, None).await,
        }
    }

    /// Send `body` verbatim with the given content type.
    pub async fn send_raw(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        content_type: &str,
        body: impl Into<String>,
    ) -> (StatusCode, Value) {
        self.send_request(method, path, token, Some((content_type, body.into())))
            .await
    }

    async fn send_request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<(&str, String)>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some((content_type, raw)) => builder
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(raw))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

/// RFC 3339 seating time `days_ahead` days from today at `hour:minute` UTC.
pub fn seating(days_ahead: i64, hour: u32, minute: u32) -> String {
    (Utc::now().date_naive() + TimeDelta::days(days_ahead))
        .and_hms_opt(hour, minute, 0)
        .unwrap()
        .and_utc()
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}

/// A valid create body for `table` at `date`.
pub fn booking_body(restaurant_id: &str, table: i32, date: &str) -> Value {
    serde_json::json!({
        "restaurantId": restaurant_id,
        "restaurantName": "Sakura",
        "date": date,
        "guestCount": 2,
        "tableNumber": table,
        "contactName": "Anna",
        "contactPhone": "+7 900 000 00 00"
    })
}
