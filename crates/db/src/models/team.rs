//! Team entity model and DTOs.

use cypar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A team row from the `teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new team.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeam {
    pub name: String,
}

/// DTO for renaming an existing team.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTeam {
    pub name: String,
}
