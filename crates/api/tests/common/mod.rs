#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use glucolog_core::store::{MemoryReadingStore, ReadingStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

use glucolog_api::auth::google::{GoogleClient, GoogleOAuthConfig};
use glucolog_api::auth::jwt::{generate_access_token, JwtConfig};
use glucolog_api::config::{ServerConfig, StoreBackend};
use glucolog_api::router::build_app_router;
use glucolog_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(google: Option<GoogleOAuthConfig>) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 60,
            state_token_expiry_mins: 10,
        },
        google,
    }
}

/// Build the full application router over the given store.
pub fn build_app(store: Arc<dyn ReadingStore>, google: Option<GoogleOAuthConfig>) -> Router {
    let config = test_config(google);
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        google: config
            .google
            .clone()
            .map(|g| Arc::new(GoogleClient::new(g))),
    };
    build_app_router(state, &config)
}

/// Router over a fresh in-memory store, without Google sign-in.
pub fn build_test_app() -> Router {
    build_app(Arc::new(MemoryReadingStore::new()), None)
}

/// A valid session token for `email`, signed with the test secret.
pub fn token_for(email: &str) -> String {
    generate_access_token(email, &test_config(None).jwt).expect("token generation")
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    json: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match json {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    json: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(json)).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token, None).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
