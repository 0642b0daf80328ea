//! Error response shape for malformed requests and missing resources.

mod common;

use assert_matches::assert_matches;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn not_found_body_has_error_and_code(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/teams/424242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Team with id 424242 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_json_is_rejected_as_client_error(pool: PgPool) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/users")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = common::build_test_app(pool).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_survey_status_is_rejected(pool: PgPool) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/environments/1/surveys")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"name": "NPS", "status": "archived"}"#))
        .unwrap();
    let response = common::build_test_app(pool).oneshot(request).await.unwrap();

    assert_matches!(
        response.status(),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_id_is_rejected(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/teams/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_survey_field_is_rejected(pool: PgPool) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/environments/1/surveys")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"name": "NPS", "thankYouCard": {"enabled": true, "headline": "Thanks"}}"#,
        ))
        .unwrap();
    let response = common::build_test_app(pool.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let (surveys,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM surveys")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(surveys, 0);
}
