pub mod environment;
pub mod health;
pub mod survey;
pub mod team;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                                               create
///
/// /teams                                               create (provision)
/// /teams/{id}                                          get
/// /teams/{id}/environments                             list
///
/// /environments/{id}/event-classes                     list
/// /environments/{id}/attribute-classes                 list
/// /environments/{id}/surveys                           list, create
/// /environments/{id}/surveys/{survey_id}               get
/// /environments/{id}/surveys/{survey_id}/duplicate     duplicate
/// /environments/{id}/surveys/{survey_id}/copy          copy to environment
///
/// /surveys/{id}                                        delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", user::router())
        .nest("/teams", team::router())
        .nest("/environments", environment::router())
        .nest("/surveys", survey::router())
}
