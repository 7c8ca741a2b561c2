//! Repository for the `projects` table.

use cypar_core::search::escape_like;
use cypar_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, team_id, name, repository, branch, spec_filter, scheduling, \
     scheduling_enabled, max_pods, runner_image_tag, created_at, updated_at";

/// CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// `branch`, `spec_filter`, and `runner_image_tag` fall back to the
    /// schema defaults when omitted.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (team_id, name, repository, branch, spec_filter, runner_image_tag)
             VALUES ($1, $2, $3, COALESCE($4, 'main'), COALESCE($5, 'cypress/e2e/**'), COALESCE($6, '13.6.0'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.team_id)
            .bind(&input.name)
            .bind(&input.repository)
            .bind(&input.branch)
            .bind(&input.spec_filter)
            .bind(&input.runner_image_tag)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Point lookup by unique project name. The dispatch engine resolves
    /// launch requests through this.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE name = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Page of projects ordered by most recently created first, plus total.
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Project>, i64), sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC OFFSET $1 LIMIT $2");
        let rows = sqlx::query_as::<_, Project>(&query)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await?;
        Ok((rows, total.0))
    }

    /// Case-insensitive substring search on name, repository, and branch.
    pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE name ILIKE $1 OR repository ILIKE $1 OR branch ILIKE $1
             ORDER BY created_at DESC LIMIT 100"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(format!("%{}%", escape_like(term)))
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                team_id = COALESCE($2, team_id),
                name = COALESCE($3, name),
                repository = COALESCE($4, repository),
                branch = COALESCE($5, branch),
                spec_filter = COALESCE($6, spec_filter),
                scheduling = COALESCE($7, scheduling),
                scheduling_enabled = COALESCE($8, scheduling_enabled),
                max_pods = COALESCE($9, max_pods),
                runner_image_tag = COALESCE($10, runner_image_tag),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(input.team_id)
            .bind(&input.name)
            .bind(&input.repository)
            .bind(&input.branch)
            .bind(&input.spec_filter)
            .bind(&input.scheduling)
            .bind(input.scheduling_enabled)
            .bind(input.max_pods)
            .bind(&input.runner_image_tag)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed. Executions, environment
    /// variables, and annotations cascade at the schema level.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
