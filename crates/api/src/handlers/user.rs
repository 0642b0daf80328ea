//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use surveyor_db::models::user::{CreateUser, User};
use surveyor_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<DataResponse<User>>)> {
    let user = UserRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = user.id, "Created user");
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}
