//! Annotation entity: per-project key/value pairs attached to worker pod
//! metadata (e.g. for sidecar injection or cost attribution).

use cypar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An annotation row from the `annotations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Annotation {
    pub id: DbId,
    pub project_id: DbId,
    pub key: String,
    pub value: String,
    pub created_at: Timestamp,
}

/// DTO for creating an annotation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnotation {
    pub project_id: DbId,
    pub key: String,
    pub value: String,
}

/// DTO for updating an annotation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAnnotation {
    pub key: Option<String>,
    pub value: Option<String>,
}
