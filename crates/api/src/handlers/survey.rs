//! Handlers for surveys.
//!
//! Survey reads and the create/duplicate/copy actions are scoped under
//! `/environments/{environment_id}/surveys`; deletion addresses the survey
//! directly by id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use surveyor_core::error::CoreError;
use surveyor_core::types::DbId;
use surveyor_db::models::survey::{CreateSurvey, Survey, SurveyWithTargeting};
use surveyor_db::repositories::SurveyRepo;
use surveyor_events::{names, PlatformEvent};

use super::environment::ensure_environment_exists;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST .../surveys/{survey_id}/copy`.
#[derive(Debug, Deserialize)]
pub struct CopySurveyRequest {
    pub target_environment_id: DbId,
}

fn survey_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Survey",
        id,
    })
}

/// GET /api/v1/environments/{environment_id}/surveys
pub async fn list_by_environment(
    State(state): State<AppState>,
    Path(environment_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Survey>>>> {
    ensure_environment_exists(&state.pool, environment_id).await?;
    let surveys = SurveyRepo::list_by_environment(&state.pool, environment_id).await?;
    Ok(Json(DataResponse { data: surveys }))
}

/// POST /api/v1/environments/{environment_id}/surveys
///
/// Publishes a `survey created` usage event once the row is committed.
pub async fn create(
    State(state): State<AppState>,
    Path(environment_id): Path<DbId>,
    Json(input): Json<CreateSurvey>,
) -> AppResult<(StatusCode, Json<DataResponse<Survey>>)> {
    ensure_environment_exists(&state.pool, environment_id).await?;
    let survey = SurveyRepo::create(&state.pool, environment_id, &input).await?;

    tracing::info!(
        survey_id = survey.id,
        environment_id,
        triggers = input.triggers.len(),
        attribute_filters = input.attribute_filters.len(),
        "Created survey"
    );
    state.event_bus.publish(
        PlatformEvent::new(names::SURVEY_CREATED)
            .with_source("survey", survey.id)
            .with_payload(serde_json::json!({
                "environment_id": environment_id,
                "survey_type": survey.survey_type,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: survey })))
}

/// GET /api/v1/environments/{environment_id}/surveys/{survey_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((environment_id, survey_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<SurveyWithTargeting>>> {
    let survey = SurveyRepo::find_with_targeting(&state.pool, environment_id, survey_id)
        .await?
        .ok_or_else(|| survey_not_found(survey_id))?;
    Ok(Json(DataResponse { data: survey }))
}

/// POST /api/v1/environments/{environment_id}/surveys/{survey_id}/duplicate
pub async fn duplicate(
    State(state): State<AppState>,
    Path((environment_id, survey_id)): Path<(DbId, DbId)>,
) -> AppResult<(StatusCode, Json<DataResponse<Survey>>)> {
    let copy = SurveyRepo::duplicate(&state.pool, environment_id, survey_id)
        .await?
        .ok_or_else(|| survey_not_found(survey_id))?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: copy })))
}

/// POST /api/v1/environments/{environment_id}/surveys/{survey_id}/copy
pub async fn copy_to_environment(
    State(state): State<AppState>,
    Path((environment_id, survey_id)): Path<(DbId, DbId)>,
    Json(input): Json<CopySurveyRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Survey>>)> {
    let copy = SurveyRepo::copy_to_environment(
        &state.pool,
        environment_id,
        survey_id,
        input.target_environment_id,
    )
    .await?
    .ok_or_else(|| survey_not_found(survey_id))?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: copy })))
}

/// DELETE /api/v1/surveys/{id}
///
/// Responds with the deleted survey.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Survey>>> {
    let survey = SurveyRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| survey_not_found(id))?;
    tracing::info!(survey_id = id, environment_id = survey.environment_id, "Deleted survey");
    Ok(Json(DataResponse { data: survey }))
}
