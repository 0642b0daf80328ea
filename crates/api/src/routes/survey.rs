use axum::routing::delete;
use axum::Router;

use crate::handlers::survey;
use crate::state::AppState;

/// Routes mounted at `/surveys`.
///
/// ```text
/// DELETE /{id}                              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(survey::delete))
}
