//! Route definitions for the `/annotations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::annotations;
use crate::state::AppState;

/// Routes mounted at `/annotations`.
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
        .route("/", post(annotations::create))
        .route("/list", get(annotations::list))
        .route(
            "/list/by/projectid/{project_id}",
            get(annotations::list_by_project),
        )
        .route(
            "/{id}",
            get(annotations::get_by_id)
                .put(annotations::update)
                .delete(annotations::delete),
        )
}
