//! Handlers for environment-scoped reference data.

use axum::extract::{Path, State};
use axum::Json;
use surveyor_core::error::CoreError;
use surveyor_core::types::DbId;
use surveyor_db::models::attribute_class::AttributeClass;
use surveyor_db::models::event_class::EventClass;
use surveyor_db::repositories::{AttributeClassRepo, EnvironmentRepo, EventClassRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/environments/{id}/event-classes
pub async fn list_event_classes(
    State(state): State<AppState>,
    Path(environment_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<EventClass>>>> {
    ensure_environment_exists(&state.pool, environment_id).await?;
    let classes = EventClassRepo::list_by_environment(&state.pool, environment_id).await?;
    Ok(Json(DataResponse { data: classes }))
}

/// GET /api/v1/environments/{id}/attribute-classes
pub async fn list_attribute_classes(
    State(state): State<AppState>,
    Path(environment_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<AttributeClass>>>> {
    ensure_environment_exists(&state.pool, environment_id).await?;
    let classes = AttributeClassRepo::list_by_environment(&state.pool, environment_id).await?;
    Ok(Json(DataResponse { data: classes }))
}

/// Verify that an environment exists, returning 404 if not.
pub async fn ensure_environment_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<()> {
    EnvironmentRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Environment",
            id,
        }))?;
    Ok(())
}
