//! Environment variable entity: per-project key/value pairs injected into
//! worker pod containers.

use cypar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An environment variable row from the `environments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Environment {
    pub id: DbId,
    pub project_id: DbId,
    pub key: String,
    pub value: String,
    pub created_at: Timestamp,
}

/// DTO for creating an environment variable.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEnvironment {
    pub project_id: DbId,
    pub key: String,
    pub value: String,
}

/// DTO for updating an environment variable's value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEnvironment {
    pub key: Option<String>,
    pub value: Option<String>,
}
