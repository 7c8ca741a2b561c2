//! Spec source: listing the test spec files to run for a project branch.
//!
//! The dispatch engine only sees the [`SpecSource`] trait; the shipped
//! implementation ([`git::GitSpecSource`]) shallow-clones the branch and
//! walks the tree. Failures split into two classes because the engine maps
//! them to different caller-visible responses: a branch that does not exist
//! is the caller's mistake, a clone that times out is not.

pub mod filter;
pub mod git;

use async_trait::async_trait;

pub use git::GitSpecSource;

/// Failure classes of a spec listing.
#[derive(Debug, thiserror::Error)]
pub enum SpecSourceError {
    /// The request itself is wrong: unknown repository or branch, invalid
    /// filter expression. Mapped to a 400-class response.
    #[error("bad spec request: {0}")]
    BadRequest(String),

    /// The listing could not be performed right now: clone failure, network
    /// trouble, timeout. Mapped to a 500-class response.
    #[error("spec listing failed: {0}")]
    Transient(String),
}

/// Lists spec files for a repository branch.
#[async_trait]
pub trait SpecSource: Send + Sync {
    /// Return the ordered, deduplicated list of spec file paths in
    /// `repository` at `branch` matching `filter` (a glob expression;
    /// comma separates alternatives).
    async fn list_specs(
        &self,
        repository: &str,
        branch: &str,
        filter: &str,
    ) -> Result<Vec<String>, SpecSourceError>;
}
