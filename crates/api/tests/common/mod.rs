//! Shared test harness: in-process fakes for the cluster and spec source,
//! plus router construction mirroring `main.rs` so integration tests
//! exercise the production middleware stack.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use cypar_api::config::ServerConfig;
use cypar_api::router::build_app_router;
use cypar_api::state::AppState;
use cypar_cluster::pod::PodSpec;
use cypar_cluster::{ClusterApi, ClusterError};
use cypar_specsource::{SpecSource, SpecSourceError};

// ---------------------------------------------------------------------------
// Fake cluster
// ---------------------------------------------------------------------------

/// Records every provisioning and pod call; optionally fails pod creation.
#[derive(Default)]
pub struct FakeCluster {
    pub namespaces: Mutex<Vec<String>>,
    pub service_accounts: Mutex<Vec<(String, String)>>,
    pub pods: Mutex<Vec<PodSpec>>,
    pub fail_pod_create: AtomicBool,
    pub fail_provisioning: AtomicBool,
}

impl FakeCluster {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn pod_count(&self) -> usize {
        self.pods.lock().unwrap().len()
    }
}

#[async_trait]
impl ClusterApi for FakeCluster {
    async fn ensure_namespace(&self, name: &str) -> Result<(), ClusterError> {
        if self.fail_provisioning.load(Ordering::SeqCst) {
            return Err(ClusterError::Api {
                status: 503,
                body: "api server unavailable".into(),
            });
        }
        self.namespaces.lock().unwrap().push(name.to_string());
        Ok(())
    }

    async fn ensure_service_account(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClusterError> {
        if self.fail_provisioning.load(Ordering::SeqCst) {
            return Err(ClusterError::Api {
                status: 503,
                body: "api server unavailable".into(),
            });
        }
        self.service_accounts
            .lock()
            .unwrap()
            .push((namespace.to_string(), name.to_string()));
        Ok(())
    }

    async fn create_pod(&self, spec: &PodSpec) -> Result<String, ClusterError> {
        if self.fail_pod_create.load(Ordering::SeqCst) {
            return Err(ClusterError::Api {
                status: 500,
                body: "admission webhook denied".into(),
            });
        }
        let mut pods = self.pods.lock().unwrap();
        pods.push(spec.clone());
        Ok(format!("{}{:05}", spec.generate_name, pods.len()))
    }
}

// ---------------------------------------------------------------------------
// Fake spec source
// ---------------------------------------------------------------------------

/// Returns a canned listing (or failure) regardless of repository/branch.
pub struct FakeSpecSource {
    pub response: Mutex<Result<Vec<String>, SpecSourceError>>,
}

impl FakeSpecSource {
    pub fn with_specs(specs: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Ok(specs.iter().map(|s| s.to_string()).collect())),
        })
    }

    pub fn bad_request(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Err(SpecSourceError::BadRequest(message.to_string()))),
        })
    }

    pub fn transient(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Err(SpecSourceError::Transient(message.to_string()))),
        })
    }
}

#[async_trait]
impl SpecSource for FakeSpecSource {
    async fn list_specs(
        &self,
        _repository: &str,
        _branch: &str,
        _filter: &str,
    ) -> Result<Vec<String>, SpecSourceError> {
        match &*self.response.lock().unwrap() {
            Ok(specs) => Ok(specs.clone()),
            Err(SpecSourceError::BadRequest(m)) => Err(SpecSourceError::BadRequest(m.clone())),
            Err(SpecSourceError::Transient(m)) => Err(SpecSourceError::Transient(m.clone())),
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jobs_namespace: "cypar-jobs".to_string(),
        runner_image: "cypress/included".to_string(),
        callback_url: "http://cypar-api.test:3000".to_string(),
        dispatch_parallelism: 1,
    }
}

/// Build the full application router over the given pool and fakes.
pub fn build_test_app(
    pool: PgPool,
    cluster: Arc<FakeCluster>,
    spec_source: Arc<FakeSpecSource>,
) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        cluster,
        spec_source,
    };
    build_app_router(state, &config)
}

/// Router with inert fakes, for tests that never dispatch.
pub fn build_plain_app(pool: PgPool) -> Router {
    build_test_app(pool, FakeCluster::new(), FakeSpecSource::with_specs(&[]))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, path: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert status and return the parsed body in one step.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Insert a team + project pair and return the project id.
pub async fn seed_project(pool: &PgPool, name: &str) -> i64 {
    use cypar_db::models::project::CreateProject;
    use cypar_db::models::team::CreateTeam;
    use cypar_db::repositories::{ProjectRepo, TeamRepo};

    let team = TeamRepo::create(
        pool,
        &CreateTeam {
            name: format!("{name}-team"),
        },
    )
    .await
    .unwrap();
    ProjectRepo::create(
        pool,
        &CreateProject {
            team_id: team.id,
            name: name.to_string(),
            repository: "git@host:org/suite.git".to_string(),
            branch: Some("main".to_string()),
            spec_filter: None,
            runner_image_tag: None,
        },
    )
    .await
    .unwrap()
    .id
}
