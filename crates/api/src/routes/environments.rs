//! Route definitions for the `/environments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::environments;
use crate::state::AppState;

/// Routes mounted at `/environments`.
///
/// ```text
/// POST   /                              -> create
/// GET    /list                          -> list
/// GET    /list/by/projectid/{id}        -> list_by_project
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(environments::create))
        .route("/list", get(environments::list))
        .route(
            "/list/by/projectid/{project_id}",
            get(environments::list_by_project),
        )
        .route(
            "/{id}",
            get(environments::get_by_id)
                .put(environments::update)
                .delete(environments::delete),
        )
}
