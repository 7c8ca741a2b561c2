//! Route definitions for the `/executions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::executions;
use crate::state::AppState;

/// Routes mounted at `/executions`.
///
/// ```text
/// GET    /list                          -> list
/// GET    /list/by/uniqid/{uniq_id}      -> get_by_run_id
/// GET    /search                        -> search
/// POST   /update                        -> update_result
/// GET    /{execution_id}                -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(executions::list))
        .route("/list/by/uniqid/{uniq_id}", get(executions::get_by_run_id))
        .route("/search", get(executions::search))
        .route("/update", post(executions::update_result))
        .route("/{execution_id}", get(executions::get_by_id))
}
