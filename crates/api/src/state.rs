use std::sync::Arc;

use cypar_cluster::ClusterApi;
use cypar_specsource::SpecSource;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
/// Cluster and spec source sit behind trait objects so integration tests
/// can substitute in-process fakes.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cypar_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cluster client (namespace/service-account provisioning, pods).
    pub cluster: Arc<dyn ClusterApi>,
    /// Spec file lister.
    pub spec_source: Arc<dyn SpecSource>,
}
