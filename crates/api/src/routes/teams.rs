//! Route definitions for the `/teams` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::teams;
use crate::state::AppState;

/// Routes mounted at `/teams`.
///
/// ```text
/// POST   /              -> create
/// GET    /list          -> list
/// GET    /search        -> search
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(teams::create))
        .route("/list", get(teams::list))
        .route("/search", get(teams::search))
        .route(
            "/{id}",
            get(teams::get_by_id)
                .put(teams::update)
                .delete(teams::delete),
        )
}
