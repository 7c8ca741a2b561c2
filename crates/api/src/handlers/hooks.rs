//! Handlers for launch hooks.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::engine::{self, LaunchRequest};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/hooks/launch/plain
///
/// Kicks off one dispatch batch. The response is an acknowledgement only;
/// callers query `/executions` for per-spec status.
pub async fn launch_plain(
    State(state): State<AppState>,
    Json(request): Json<LaunchRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<&'static str>>)> {
    let outcome = engine::launch(&state, request).await?;
    tracing::info!(dispatched = outcome.dispatched, "launch batch complete");
    Ok((StatusCode::CREATED, Json(DataResponse { data: "OK" })))
}
