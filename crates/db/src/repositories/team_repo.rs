//! Repository for the `teams` table.

use cypar_core::search::escape_like;
use cypar_core::types::DbId;
use sqlx::PgPool;

use crate::models::team::{CreateTeam, Team, UpdateTeam};

const COLUMNS: &str = "id, name, created_at";

/// CRUD operations for teams.
pub struct TeamRepo;

impl TeamRepo {
    pub async fn create(pool: &PgPool, input: &CreateTeam) -> Result<Team, sqlx::Error> {
        let query = format!("INSERT INTO teams (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Team>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Page of teams ordered by most recently created first, plus total count.
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Team>, i64), sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM teams ORDER BY created_at DESC OFFSET $1 LIMIT $2");
        let rows = sqlx::query_as::<_, Team>(&query)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM teams")
            .fetch_one(pool)
            .await?;
        Ok((rows, total.0))
    }

    /// Case-insensitive substring search on team name.
    pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<Team>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teams WHERE name ILIKE $1 ORDER BY created_at DESC LIMIT 100"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(format!("%{}%", escape_like(term)))
            .fetch_all(pool)
            .await
    }

    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeam,
    ) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("UPDATE teams SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
