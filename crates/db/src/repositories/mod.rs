//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Every call checks a connection
//! out of the pool on its own, so independent dispatches never share a
//! transaction scope.

pub mod annotation_repo;
pub mod environment_repo;
pub mod execution_repo;
pub mod project_repo;
pub mod team_repo;

pub use annotation_repo::AnnotationRepo;
pub use environment_repo::EnvironmentRepo;
pub use execution_repo::ExecutionRepo;
pub use project_repo::ProjectRepo;
pub use team_repo::TeamRepo;
