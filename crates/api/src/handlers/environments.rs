//! Handlers for the `/environments` resource: per-project variables
//! injected into worker containers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cypar_core::error::CoreError;
use cypar_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use cypar_core::types::DbId;
use cypar_db::models::environment::{CreateEnvironment, Environment, UpdateEnvironment};
use cypar_db::repositories::EnvironmentRepo;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// POST /api/v1/environments
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEnvironment>,
) -> AppResult<(StatusCode, Json<DataResponse<Environment>>)> {
    if input.key.trim().is_empty() {
        return Err(AppError::BadRequest("key must not be empty".into()));
    }
    let variable = EnvironmentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: variable })))
}

/// GET /api/v1/environments/list
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<Environment>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);
    let (variables, total) = EnvironmentRepo::list(&state.pool, offset, limit).await?;
    Ok(Json(PagedResponse {
        data: variables,
        total,
    }))
}

/// GET /api/v1/environments/list/by/projectid/{project_id}
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Environment>>>> {
    let variables = EnvironmentRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: variables }))
}

/// GET /api/v1/environments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Environment>>> {
    let variable = EnvironmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Environment", id))?;
    Ok(Json(DataResponse { data: variable }))
}

/// PUT /api/v1/environments/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEnvironment>,
) -> AppResult<Json<DataResponse<Environment>>> {
    let variable = EnvironmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Environment", id))?;
    Ok(Json(DataResponse { data: variable }))
}

/// DELETE /api/v1/environments/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = EnvironmentRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::not_found("Environment", id).into())
    }
}
