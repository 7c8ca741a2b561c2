//! Repository for the `environments` table.

use cypar_core::types::DbId;
use sqlx::PgPool;

use crate::models::environment::{CreateEnvironment, Environment, UpdateEnvironment};

const COLUMNS: &str = "id, project_id, key, value, created_at";

/// CRUD operations for per-project environment variables.
pub struct EnvironmentRepo;

impl EnvironmentRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateEnvironment,
    ) -> Result<Environment, sqlx::Error> {
        let query = format!(
            "INSERT INTO environments (project_id, key, value)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Environment>(&query)
            .bind(input.project_id)
            .bind(&input.key)
            .bind(&input.value)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Environment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM environments WHERE id = $1");
        sqlx::query_as::<_, Environment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Environment>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM environments ORDER BY created_at DESC OFFSET $1 LIMIT $2"
        );
        let rows = sqlx::query_as::<_, Environment>(&query)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM environments")
            .fetch_one(pool)
            .await?;
        Ok((rows, total.0))
    }

    /// All variables for one project, in key order. Fetched fresh by the
    /// dispatch engine for every pod it builds.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Environment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM environments WHERE project_id = $1 ORDER BY key");
        sqlx::query_as::<_, Environment>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEnvironment,
    ) -> Result<Option<Environment>, sqlx::Error> {
        let query = format!(
            "UPDATE environments SET
                key = COALESCE($2, key),
                value = COALESCE($3, value)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Environment>(&query)
            .bind(id)
            .bind(&input.key)
            .bind(&input.value)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM environments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
