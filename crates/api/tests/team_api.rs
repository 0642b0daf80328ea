//! HTTP-level integration tests for users, team provisioning and the
//! environment reference data seeded with a team.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users",
        serde_json::json!({"name": "Ada", "email": "ada@example.com"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "ada@example.com");
    assert!(json["data"]["id"].is_number());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_user_email_returns_409(pool: PgPool) {
    let body = serde_json::json!({"name": "Ada", "email": "ada@example.com"});
    post_json(common::build_test_app(pool.clone()), "/api/v1/users", body.clone()).await;

    let response = post_json(common::build_test_app(pool), "/api/v1/users", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_team_returns_owner_membership(pool: PgPool) {
    let team = common::create_team(&pool, "acme").await;

    assert_eq!(team["name"], "acme");
    let memberships = team["memberships"].as_array().unwrap();
    assert_eq!(memberships.len(), 1);
    assert_eq!(memberships[0]["role"], "owner");
    assert_eq!(memberships[0]["accepted"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_team_with_unknown_owner_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/teams",
        serde_json::json!({"name": "ghost", "owner_user_id": 999999}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_REFERENCE");

    let teams: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teams")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(teams, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_team_by_id(pool: PgPool) {
    let team = common::create_team(&pool, "acme").await;
    let id = team["id"].as_i64().unwrap();

    let response = get(common::build_test_app(pool), &format!("/api/v1/teams/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["memberships"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_team_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/teams/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_team_has_production_then_development(pool: PgPool) {
    let team = common::create_team(&pool, "acme").await;
    let id = team["id"].as_i64().unwrap();

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/teams/{id}/environments"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let types: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["environment_type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["production", "development"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_environments_of_unknown_team_returns_404(pool: PgPool) {
    let response = get(
        common::build_test_app(pool),
        "/api/v1/teams/999999/environments",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seeded_reference_classes(pool: PgPool) {
    let team = common::create_team(&pool, "acme").await;
    let (production, development) =
        common::environment_ids(&pool, team["id"].as_i64().unwrap()).await;

    let names = |json: serde_json::Value| -> Vec<String> {
        json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap().to_string())
            .collect()
    };

    let prod_events = body_json(
        get(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/environments/{production}/event-classes"),
        )
        .await,
    )
    .await;
    assert_eq!(
        names(prod_events),
        vec!["New Session", "Exit Intent (Desktop)", "50% Scroll"]
    );

    let dev_events = body_json(
        get(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/environments/{development}/event-classes"),
        )
        .await,
    )
    .await;
    assert_eq!(names(dev_events), vec!["New Session"]);

    for environment in [production, development] {
        let attributes = body_json(
            get(
                common::build_test_app(pool.clone()),
                &format!("/api/v1/environments/{environment}/attribute-classes"),
            )
            .await,
        )
        .await;
        assert_eq!(names(attributes), vec!["userId", "email"]);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_classes_of_unknown_environment_returns_404(pool: PgPool) {
    let response = get(
        common::build_test_app(pool),
        "/api/v1/environments/999999/event-classes",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
