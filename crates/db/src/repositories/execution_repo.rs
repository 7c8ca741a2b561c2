//! Repository for the `executions` table.
//!
//! Updates are guarded by the full (branch, spec, run_id) identity triple:
//! a worker that cannot present all three exactly cannot touch a row, and a
//! triple that matches nothing is reported to the caller instead of being
//! treated as a silent no-op.

use cypar_core::search::escape_like;
use cypar_core::types::DbId;
use sqlx::PgPool;

use crate::models::execution::{CreateExecution, Execution, ExecutionStatus};

const COLUMNS: &str = "id, project_id, run_id, branch, spec, status, result, created_at";

/// Persistence operations for spec executions.
pub struct ExecutionRepo;

impl ExecutionRepo {
    /// Insert a new execution in `NOT_STARTED` state with an empty result,
    /// returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateExecution) -> Result<Execution, sqlx::Error> {
        let query = format!(
            "INSERT INTO executions (project_id, run_id, branch, spec)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Execution>(&query)
            .bind(input.project_id)
            .bind(&input.run_id)
            .bind(&input.branch)
            .bind(&input.spec)
            .fetch_one(pool)
            .await
    }

    /// Update status and result for the row matching the identity triple
    /// exactly.
    ///
    /// Returns `None` when zero rows match, with no write performed. The
    /// caller must surface that as a client error rather than swallow it.
    pub async fn update_result(
        pool: &PgPool,
        branch: &str,
        spec: &str,
        run_id: &str,
        status: ExecutionStatus,
        result: &serde_json::Value,
    ) -> Result<Option<Execution>, sqlx::Error> {
        let query = format!(
            "UPDATE executions SET status = $4, result = $5
             WHERE branch = $1 AND spec = $2 AND run_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Execution>(&query)
            .bind(branch)
            .bind(spec)
            .bind(run_id)
            .bind(status)
            .bind(result)
            .fetch_optional(pool)
            .await
    }

    /// Point lookup by execution id. `None` is a reportable outcome, not an
    /// internal error.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Execution>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM executions WHERE id = $1");
        sqlx::query_as::<_, Execution>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lookup by the short dispatch identifier.
    pub async fn find_by_run_id(
        pool: &PgPool,
        run_id: &str,
    ) -> Result<Option<Execution>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM executions WHERE run_id = $1");
        sqlx::query_as::<_, Execution>(&query)
            .bind(run_id)
            .fetch_optional(pool)
            .await
    }

    /// Page of executions ordered by most recently created first, plus the
    /// total row count for pagination.
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Execution>, i64), sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM executions ORDER BY created_at DESC OFFSET $1 LIMIT $2");
        let rows = sqlx::query_as::<_, Execution>(&query)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM executions")
            .fetch_one(pool)
            .await?;
        Ok((rows, total.0))
    }

    /// Case-insensitive substring search across branch, spec, and run_id.
    ///
    /// Empty queries are rejected at the handler layer before reaching here.
    pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<Execution>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM executions
             WHERE branch ILIKE $1 OR spec ILIKE $1 OR run_id ILIKE $1
             ORDER BY created_at DESC LIMIT 100"
        );
        sqlx::query_as::<_, Execution>(&query)
            .bind(format!("%{}%", escape_like(term)))
            .fetch_all(pool)
            .await
    }
}
