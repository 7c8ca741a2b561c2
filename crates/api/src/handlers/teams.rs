//! Handlers for the `/teams` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cypar_core::error::CoreError;
use cypar_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use cypar_core::types::DbId;
use cypar_db::models::team::{CreateTeam, Team, UpdateTeam};
use cypar_db::repositories::TeamRepo;

use crate::error::{AppError, AppResult};
use crate::query::{PaginationParams, SearchParams};
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// POST /api/v1/teams
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTeam>,
) -> AppResult<(StatusCode, Json<DataResponse<Team>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    let team = TeamRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: team })))
}

/// GET /api/v1/teams/list
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<Team>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);
    let (teams, total) = TeamRepo::list(&state.pool, offset, limit).await?;
    Ok(Json(PagedResponse { data: teams, total }))
}

/// GET /api/v1/teams/search?q=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Team>>>> {
    let term = params.q.as_deref().unwrap_or("").trim().to_string();
    if term.is_empty() {
        return Err(AppError::BadRequest("q must not be empty".into()));
    }
    let teams = TeamRepo::search(&state.pool, &term).await?;
    Ok(Json(DataResponse { data: teams }))
}

/// GET /api/v1/teams/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Team>>> {
    let team = TeamRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Team", id))?;
    Ok(Json(DataResponse { data: team }))
}

/// PUT /api/v1/teams/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTeam>,
) -> AppResult<Json<DataResponse<Team>>> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    let team = TeamRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Team", id))?;
    Ok(Json(DataResponse { data: team }))
}

/// DELETE /api/v1/teams/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = TeamRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::not_found("Team", id).into())
    }
}
