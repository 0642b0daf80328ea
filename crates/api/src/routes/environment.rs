//! Route definitions for the `/environments` resource.
//!
//! Nests the environment-scoped survey routes under
//! `/environments/{environment_id}/surveys`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{environment, survey};
use crate::state::AppState;

/// Routes mounted at `/environments`.
///
/// ```text
/// GET    /{environment_id}/event-classes                      -> list_event_classes
/// GET    /{environment_id}/attribute-classes                  -> list_attribute_classes
///
/// GET    /{environment_id}/surveys                            -> list_by_environment
/// POST   /{environment_id}/surveys                            -> create
/// GET    /{environment_id}/surveys/{survey_id}                -> get_by_id
/// POST   /{environment_id}/surveys/{survey_id}/duplicate      -> duplicate
/// POST   /{environment_id}/surveys/{survey_id}/copy           -> copy_to_environment
/// ```
pub fn router() -> Router<AppState> {
    let survey_routes = Router::new()
        .route("/", get(survey::list_by_environment).post(survey::create))
        .route("/{survey_id}", get(survey::get_by_id))
        .route("/{survey_id}/duplicate", post(survey::duplicate))
        .route("/{survey_id}/copy", post(survey::copy_to_environment));

    Router::new()
        .route(
            "/{environment_id}/event-classes",
            get(environment::list_event_classes),
        )
        .route(
            "/{environment_id}/attribute-classes",
            get(environment::list_attribute_classes),
        )
        .nest("/{environment_id}/surveys", survey_routes)
}
