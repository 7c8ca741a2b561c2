//! Cluster integration: idempotent namespace/service-account provisioning
//! and worker pod submission.
//!
//! The [`ClusterApi`] trait is the seam the dispatch engine talks through;
//! [`api::HttpCluster`] implements it against the Kubernetes REST API, and
//! tests substitute in-process fakes.

pub mod api;
pub mod pod;

use async_trait::async_trait;

use crate::pod::PodSpec;

pub use crate::api::{ClusterConfig, ClusterError, HttpCluster};

/// Operations the dispatch engine needs from the cluster.
///
/// `ensure_*` calls are create-if-absent and treat already-exists races from
/// concurrent dispatches as success. All calls are bounded by the underlying
/// client's request timeout.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// Look up a namespace; create it if absent.
    async fn ensure_namespace(&self, name: &str) -> Result<(), ClusterError>;

    /// Look up a service account in a namespace; create it if absent.
    async fn ensure_service_account(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClusterError>;

    /// Submit a pod and return the cluster-assigned name.
    async fn create_pod(&self, spec: &PodSpec) -> Result<String, ClusterError>;
}
