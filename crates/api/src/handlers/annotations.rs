//! Handlers for the `/annotations` resource: per-project pod metadata.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cypar_core::error::CoreError;
use cypar_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use cypar_core::types::DbId;
use cypar_db::models::annotation::{Annotation, CreateAnnotation, UpdateAnnotation};
use cypar_db::repositories::AnnotationRepo;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// POST /api/v1/annotations
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAnnotation>,
) -> AppResult<(StatusCode, Json<DataResponse<Annotation>>)> {
    if input.key.trim().is_empty() {
        return Err(AppError::BadRequest("key must not be empty".into()));
    }
    let annotation = AnnotationRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: annotation })))
}

/// GET /api/v1/annotations/list
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<Annotation>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);
    let (annotations, total) = AnnotationRepo::list(&state.pool, offset, limit).await?;
    Ok(Json(PagedResponse {
        data: annotations,
        total,
    }))
}

/// GET /api/v1/annotations/list/by/projectid/{project_id}
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Annotation>>>> {
    let annotations = AnnotationRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: annotations }))
}

/// GET /api/v1/annotations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Annotation>>> {
    let annotation = AnnotationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Annotation", id))?;
    Ok(Json(DataResponse { data: annotation }))
}

/// PUT /api/v1/annotations/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAnnotation>,
) -> AppResult<Json<DataResponse<Annotation>>> {
    let annotation = AnnotationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Annotation", id))?;
    Ok(Json(DataResponse { data: annotation }))
}

/// DELETE /api/v1/annotations/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = AnnotationRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::not_found("Annotation", id).into())
    }
}
