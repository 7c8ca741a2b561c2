//! Execution entity: one row per dispatched spec run.

use cypar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle state of a dispatched spec run.
///
/// Rows are created `NotStarted`; every later state is only reachable via
/// the worker-facing update endpoint with a matching identity triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "execution_status")]
pub enum ExecutionStatus {
    #[sqlx(rename = "NOT_STARTED")]
    #[serde(rename = "NOT_STARTED")]
    NotStarted,
    #[sqlx(rename = "SCHEDULED")]
    #[serde(rename = "SCHEDULED")]
    Scheduled,
    #[sqlx(rename = "RUNNING")]
    #[serde(rename = "RUNNING")]
    Running,
    #[sqlx(rename = "CANCELLED")]
    #[serde(rename = "CANCELLED")]
    Cancelled,
    #[sqlx(rename = "FAILED")]
    #[serde(rename = "FAILED")]
    Failed,
    #[sqlx(rename = "DONE")]
    #[serde(rename = "DONE")]
    Done,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::NotStarted => "NOT_STARTED",
            ExecutionStatus::Scheduled => "SCHEDULED",
            ExecutionStatus::Running => "RUNNING",
            ExecutionStatus::Cancelled => "CANCELLED",
            ExecutionStatus::Failed => "FAILED",
            ExecutionStatus::Done => "DONE",
        }
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExecutionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_STARTED" => Ok(ExecutionStatus::NotStarted),
            "SCHEDULED" => Ok(ExecutionStatus::Scheduled),
            "RUNNING" => Ok(ExecutionStatus::Running),
            "CANCELLED" => Ok(ExecutionStatus::Cancelled),
            "FAILED" => Ok(ExecutionStatus::Failed),
            "DONE" => Ok(ExecutionStatus::Done),
            other => Err(format!("unknown execution status: {other}")),
        }
    }
}

/// An execution row from the `executions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Execution {
    pub id: DbId,
    pub project_id: DbId,
    /// Short digest-derived identifier; see `cypar_core::runid`.
    pub run_id: String,
    pub branch: String,
    pub spec: String,
    pub status: ExecutionStatus,
    /// Opaque worker-reported payload. Structure is owned by the caller.
    pub result: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for inserting a new execution at dispatch time.
#[derive(Debug, Clone)]
pub struct CreateExecution {
    pub project_id: DbId,
    pub run_id: String,
    pub branch: String,
    pub spec: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_to_wire_names() {
        let json = serde_json::to_string(&ExecutionStatus::NotStarted).unwrap();
        assert_eq!(json, "\"NOT_STARTED\"");
        let back: ExecutionStatus = serde_json::from_str("\"DONE\"").unwrap();
        assert_eq!(back, ExecutionStatus::Done);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let parsed: Result<ExecutionStatus, _> = serde_json::from_str("\"PAUSED\"");
        assert!(parsed.is_err());
        assert!("PAUSED".parse::<ExecutionStatus>().is_err());
    }

    #[test]
    fn from_str_roundtrips_display() {
        for status in [
            ExecutionStatus::NotStarted,
            ExecutionStatus::Scheduled,
            ExecutionStatus::Running,
            ExecutionStatus::Cancelled,
            ExecutionStatus::Failed,
            ExecutionStatus::Done,
        ] {
            assert_eq!(status.as_str().parse::<ExecutionStatus>().unwrap(), status);
        }
    }
}
