#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use surveyor_api::config::ServerConfig;
use surveyor_api::router::build_app_router;
use surveyor_api::state::AppState;
use surveyor_events::EventBus;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_bus(pool, Arc::new(EventBus::default()))
}

/// Like [`build_test_app`] but with a caller-owned event bus so tests can
/// subscribe to published events.
pub fn build_test_app_with_bus(pool: PgPool, event_bus: Arc<EventBus>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus,
    };
    build_app_router(state, &config).unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user and a provisioned team through the API.
///
/// Returns the team JSON (`data` of the create response).
pub async fn create_team(pool: &PgPool, name: &str) -> serde_json::Value {
    let user = body_json(
        post_json(
            build_test_app(pool.clone()),
            "/api/v1/users",
            serde_json::json!({"name": "Owner", "email": format!("{name}@example.com")}),
        )
        .await,
    )
    .await;
    let user_id = user["data"]["id"].as_i64().unwrap();

    let team = body_json(
        post_json(
            build_test_app(pool.clone()),
            "/api/v1/teams",
            serde_json::json!({"name": name, "owner_user_id": user_id}),
        )
        .await,
    )
    .await;
    team["data"].clone()
}

/// Return `(production_id, development_id)` for a team.
pub async fn environment_ids(pool: &PgPool, team_id: i64) -> (i64, i64) {
    let json = body_json(
        get(
            build_test_app(pool.clone()),
            &format!("/api/v1/teams/{team_id}/environments"),
        )
        .await,
    )
    .await;
    let envs = json["data"].as_array().unwrap();
    let find = |kind: &str| {
        envs.iter()
            .find(|e| e["environment_type"] == kind)
            .and_then(|e| e["id"].as_i64())
            .unwrap()
    };
    (find("production"), find("development"))
}

/// Look up an event class id by name within an environment.
pub async fn event_class_id(pool: &PgPool, environment_id: i64, name: &str) -> i64 {
    class_id(pool, environment_id, "event-classes", name).await
}

/// Look up an attribute class id by name within an environment.
pub async fn attribute_class_id(pool: &PgPool, environment_id: i64, name: &str) -> i64 {
    class_id(pool, environment_id, "attribute-classes", name).await
}

async fn class_id(pool: &PgPool, environment_id: i64, kind: &str, name: &str) -> i64 {
    let json = body_json(
        get(
            build_test_app(pool.clone()),
            &format!("/api/v1/environments/{environment_id}/{kind}"),
        )
        .await,
    )
    .await;
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == name)
        .and_then(|c| c["id"].as_i64())
        .unwrap()
}
