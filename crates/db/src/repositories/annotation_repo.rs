//! Repository for the `annotations` table.

use cypar_core::types::DbId;
use sqlx::PgPool;

use crate::models::annotation::{Annotation, CreateAnnotation, UpdateAnnotation};

const COLUMNS: &str = "id, project_id, key, value, created_at";

/// CRUD operations for per-project pod annotations.
pub struct AnnotationRepo;

impl AnnotationRepo {
    pub async fn create(pool: &PgPool, input: &CreateAnnotation) -> Result<Annotation, sqlx::Error> {
        let query = format!(
            "INSERT INTO annotations (project_id, key, value)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(input.project_id)
            .bind(&input.key)
            .bind(&input.value)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM annotations WHERE id = $1");
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Annotation>, i64), sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM annotations ORDER BY created_at DESC OFFSET $1 LIMIT $2");
        let rows = sqlx::query_as::<_, Annotation>(&query)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM annotations")
            .fetch_one(pool)
            .await?;
        Ok((rows, total.0))
    }

    /// All annotations for one project, in key order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM annotations WHERE project_id = $1 ORDER BY key");
        sqlx::query_as::<_, Annotation>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnnotation,
    ) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!(
            "UPDATE annotations SET
                key = COALESCE($2, key),
                value = COALESCE($3, value)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .bind(&input.key)
            .bind(&input.value)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM annotations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
