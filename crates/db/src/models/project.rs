//! Project entity model and DTOs.
//!
//! A project describes one test suite: where its source lives, which spec
//! files to run, and how the worker pods for it are built. The dispatch
//! engine only reads projects; all writes go through the CRUD handlers.

use cypar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub team_id: DbId,
    pub name: String,
    /// Git URL of the repository holding the spec files.
    pub repository: String,
    /// Default branch to list specs from when a launch names none.
    pub branch: String,
    /// Glob filter selecting spec files within the repository.
    pub spec_filter: String,
    /// Cron-style scheduling expression (empty when unscheduled).
    pub scheduling: String,
    pub scheduling_enabled: bool,
    /// Upper bound on concurrently running worker pods.
    pub max_pods: i32,
    /// Image tag of the test runner container.
    pub runner_image_tag: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub team_id: DbId,
    pub name: String,
    pub repository: String,
    pub branch: Option<String>,
    pub spec_filter: Option<String>,
    pub runner_image_tag: Option<String>,
}

/// DTO for updating an existing project. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub team_id: Option<DbId>,
    pub name: Option<String>,
    pub repository: Option<String>,
    pub branch: Option<String>,
    pub spec_filter: Option<String>,
    pub scheduling: Option<String>,
    pub scheduling_enabled: Option<bool>,
    pub max_pods: Option<i32>,
    pub runner_image_tag: Option<String>,
}
