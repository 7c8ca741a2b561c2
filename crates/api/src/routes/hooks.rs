//! Route definitions for launch hooks.

use axum::routing::post;
use axum::Router;

use crate::handlers::hooks;
use crate::state::AppState;

/// Routes mounted at `/hooks`.
///
/// ```text
/// POST   /launch/plain  -> launch_plain
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/launch/plain", post(hooks::launch_plain))
}
