//! Handlers for the `/executions` resource.
//!
//! Everything here is read-only except [`update_result`], the endpoint
//! worker pods call back with their outcome. That update is guarded by the
//! exact (branch, spec, run identifier) triple; a miss is the caller's
//! error, never a silent no-op.

use axum::extract::{Path, Query, State};
use axum::Json;
use cypar_core::error::CoreError;
use cypar_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use cypar_core::types::DbId;
use cypar_db::models::execution::{Execution, ExecutionStatus};
use cypar_db::repositories::ExecutionRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::query::{PaginationParams, SearchParams};
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// Body of `POST /executions/update`. Field names are the worker-facing
/// wire contract; all identity fields are required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExecutionRequest {
    pub branch: Option<String>,
    pub spec: Option<String>,
    pub uniq_id: Option<String>,
    pub execution_status: Option<String>,
    /// Opaque result payload; defaults to `{}` when omitted.
    pub result: Option<serde_json::Value>,
}

/// GET /api/v1/executions/list
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<Execution>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);
    let (executions, total) = ExecutionRepo::list(&state.pool, offset, limit).await?;
    Ok(Json(PagedResponse {
        data: executions,
        total,
    }))
}

/// GET /api/v1/executions/search?q=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Execution>>>> {
    let term = params.q.as_deref().unwrap_or("").trim().to_string();
    if term.is_empty() {
        return Err(AppError::BadRequest("q must not be empty".into()));
    }
    let executions = ExecutionRepo::search(&state.pool, &term).await?;
    Ok(Json(DataResponse { data: executions }))
}

/// GET /api/v1/executions/{execution_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(execution_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Execution>>> {
    let execution = ExecutionRepo::find_by_id(&state.pool, execution_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Execution", execution_id))?;
    Ok(Json(DataResponse { data: execution }))
}

/// GET /api/v1/executions/list/by/uniqid/{uniq_id}
pub async fn get_by_run_id(
    State(state): State<AppState>,
    Path(uniq_id): Path<String>,
) -> AppResult<Json<DataResponse<Execution>>> {
    let execution = ExecutionRepo::find_by_run_id(&state.pool, &uniq_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Execution", &uniq_id))?;
    Ok(Json(DataResponse { data: execution }))
}

/// POST /api/v1/executions/update
pub async fn update_result(
    State(state): State<AppState>,
    Json(input): Json<UpdateExecutionRequest>,
) -> AppResult<Json<DataResponse<Execution>>> {
    let branch = require_field(input.branch.as_deref(), "branch")?;
    let spec = require_field(input.spec.as_deref(), "spec")?;
    let uniq_id = require_field(input.uniq_id.as_deref(), "uniqId")?;
    let status: ExecutionStatus = require_field(input.execution_status.as_deref(), "executionStatus")?
        .parse()
        .map_err(AppError::BadRequest)?;
    let result = input.result.unwrap_or_else(|| serde_json::json!({}));

    let updated = ExecutionRepo::update_result(&state.pool, branch, spec, uniq_id, status, &result)
        .await?
        .ok_or_else(|| {
            // Zero rows matched the triple. Reported, not swallowed.
            AppError::BadRequest(format!(
                "no execution matches branch={branch} spec={spec} uniqId={uniq_id}"
            ))
        })?;

    tracing::info!(
        run_id = %updated.run_id,
        spec = %updated.spec,
        status = %updated.status,
        "execution result updated",
    );
    Ok(Json(DataResponse { data: updated }))
}

fn require_field<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!("{name} is required"))),
    }
}
