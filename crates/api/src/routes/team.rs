use axum::routing::{get, post};
use axum::Router;

use crate::handlers::team;
use crate::state::AppState;

/// Routes mounted at `/teams`.
///
/// ```text
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// GET    /{id}/environments                 -> list_environments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(team::create))
        .route("/{id}", get(team::get_by_id))
        .route("/{id}/environments", get(team::list_environments))
}
