#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use dinner_poll_api::config::{PollConfig, ServerConfig};
use dinner_poll_api::router::build_app_router;
use dinner_poll_api::state::AppState;
use dinner_poll_db::VoteStore;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
    }
}

/// Build the full application router over `pool` with the default poll.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, PollConfig::default())
}

/// Build the full application router with a custom poll configuration.
pub fn build_test_app_with(pool: PgPool, poll: PollConfig) -> Router {
    let config = test_config();
    let state = AppState {
        store: VoteStore::new(pool, poll.reset.clone()),
        config: Arc::new(config.clone()),
        poll: Arc::new(poll),
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Submit a vote through the API and assert it was accepted.
pub async fn cast(app: &Router, round: &str, restaurant: &str, user: &str, score: i64) {
    let response = post_json(
        app.clone(),
        "/api/vote",
        serde_json::json!({
            "roundId": round,
            "restaurantId": restaurant,
            "userId": user,
            "score": score,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "vote {round}/{restaurant}/{user} rejected");
}
