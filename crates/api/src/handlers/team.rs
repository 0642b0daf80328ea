//! Handlers for the `/teams` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use surveyor_core::error::CoreError;
use surveyor_core::types::DbId;
use surveyor_db::models::environment::Environment;
use surveyor_db::models::team::{CreateTeam, TeamWithMemberships};
use surveyor_db::repositories::{EnvironmentRepo, TeamRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/teams
///
/// Provisions the team with its owner membership, default product and
/// seeded environments.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTeam>,
) -> AppResult<(StatusCode, Json<DataResponse<TeamWithMemberships>>)> {
    let team = TeamRepo::provision(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: team })))
}

/// GET /api/v1/teams/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TeamWithMemberships>>> {
    let team = TeamRepo::find_with_memberships(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Team", id }))?;
    Ok(Json(DataResponse { data: team }))
}

/// GET /api/v1/teams/{id}/environments
pub async fn list_environments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Environment>>>> {
    ensure_team_exists(&state.pool, id).await?;
    let environments = EnvironmentRepo::list_by_team(&state.pool, id).await?;
    Ok(Json(DataResponse { data: environments }))
}

async fn ensure_team_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<()> {
    TeamRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Team", id }))?;
    Ok(())
}
