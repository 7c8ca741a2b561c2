//! Route tree.

pub mod annotations;
pub mod environments;
pub mod executions;
pub mod health;
pub mod hooks;
pub mod projects;
pub mod teams;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /teams                                    create
/// /teams/list                               paginated list
/// /teams/search?q=                          search
/// /teams/{id}                               get, update, delete
///
/// /projects                                 create
/// /projects/list                            paginated list
/// /projects/search?q=                       search
/// /projects/{id}                            get, update, delete
///
/// /environments                             create
/// /environments/list                        paginated list
/// /environments/list/by/projectid/{id}      variables of one project
/// /environments/{id}                        get, update, delete
///
/// /annotations                              create
/// /annotations/list                         paginated list
/// /annotations/list/by/projectid/{id}       annotations of one project
/// /annotations/{id}                         get, update, delete
///
/// /hooks/launch/plain                       dispatch a batch (POST)
///
/// /executions/list                          paginated list
/// /executions/list/by/uniqid/{uniq_id}      lookup by run identifier
/// /executions/search?q=                     search
/// /executions/update                        worker result callback (POST)
/// /executions/{execution_id}                lookup by execution id
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/teams", teams::router())
        .nest("/projects", projects::router())
        .nest("/environments", environments::router())
        .nest("/annotations", annotations::router())
        .nest("/hooks", hooks::router())
        .nest("/executions", executions::router())
}
