//! HTTP implementation of [`ClusterApi`] over the Kubernetes REST API.
//!
//! Only the three resources the dispatcher touches are covered: namespaces,
//! service accounts, and pods. Requests carry the configured bearer token
//! and are bounded by the configured timeout.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::pod::PodSpec;
use crate::ClusterApi;

/// Errors from the cluster API layer.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("cluster request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API server returned a non-2xx status.
    #[error("cluster API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for the log, never for callers.
        body: String,
    },
}

/// Connection settings for the Kubernetes API server.
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Base URL, e.g. `https://kubernetes.default.svc`.
    pub api_url: String,
    /// Bearer token; absent for anonymous/local API servers.
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Skip TLS verification (self-signed local clusters only).
    pub insecure_tls: bool,
}

impl ClusterConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                            |
    /// |------------------------|------------------------------------|
    /// | `CLUSTER_API_URL`      | `https://kubernetes.default.svc`   |
    /// | `CLUSTER_TOKEN`        | unset                              |
    /// | `CLUSTER_TIMEOUT_SECS` | `15`                               |
    /// | `CLUSTER_INSECURE_TLS` | unset (any value enables)          |
    pub fn from_env() -> Self {
        let api_url = std::env::var("CLUSTER_API_URL")
            .unwrap_or_else(|_| "https://kubernetes.default.svc".into());
        let token = std::env::var("CLUSTER_TOKEN").ok().filter(|t| !t.is_empty());
        let timeout_secs: u64 = std::env::var("CLUSTER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".into())
            .parse()
            .expect("CLUSTER_TIMEOUT_SECS must be a valid u64");
        let insecure_tls = std::env::var("CLUSTER_INSECURE_TLS").is_ok();

        Self {
            api_url,
            token,
            timeout_secs,
            insecure_tls,
        }
    }
}

/// Subset of Kubernetes object metadata the client reads back.
#[derive(Debug, Deserialize)]
struct ObjectMeta {
    name: String,
}

#[derive(Debug, Deserialize)]
struct KubeObject {
    metadata: ObjectMeta,
}

/// [`ClusterApi`] implementation backed by `reqwest`.
pub struct HttpCluster {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl HttpCluster {
    /// Build a client from configuration. Panics on invalid TLS setup,
    /// which is a startup-time misconfiguration.
    pub fn new(config: &ClusterConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.insecure_tls)
            .build()
            .expect("failed to build cluster HTTP client");

        Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, format!("{}{path}", self.api_url));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// GET a resource; `Ok(true)` if it exists, `Ok(false)` on 404.
    async fn exists(&self, path: &str) -> Result<bool, ClusterError> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        match response.status().as_u16() {
            404 => Ok(false),
            _ => {
                Self::check_status(response).await?;
                Ok(true)
            }
        }
    }

    /// POST a resource; a 409 from a concurrent creator counts as created.
    async fn create(&self, path: &str, body: &serde_json::Value) -> Result<(), ClusterError> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        if response.status().as_u16() == 409 {
            tracing::debug!(path, "resource already exists, treating as created");
            return Ok(());
        }
        Self::check_status(response).await
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClusterError> {
        if response.status().is_success() {
            return Ok(());
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ClusterError::Api { status, body })
    }
}

#[async_trait]
impl ClusterApi for HttpCluster {
    async fn ensure_namespace(&self, name: &str) -> Result<(), ClusterError> {
        if self.exists(&format!("/api/v1/namespaces/{name}")).await? {
            return Ok(());
        }
        tracing::info!(namespace = name, "creating namespace");
        let body = serde_json::json!({
            "apiVersion": "v1",
            "kind": "Namespace",
            "metadata": {"name": name},
        });
        self.create("/api/v1/namespaces", &body).await
    }

    async fn ensure_service_account(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClusterError> {
        let path = format!("/api/v1/namespaces/{namespace}/serviceaccounts/{name}");
        if self.exists(&path).await? {
            return Ok(());
        }
        tracing::info!(namespace, service_account = name, "creating service account");
        let body = serde_json::json!({
            "apiVersion": "v1",
            "kind": "ServiceAccount",
            "metadata": {"name": name, "namespace": namespace},
        });
        self.create(&format!("/api/v1/namespaces/{namespace}/serviceaccounts"), &body)
            .await
    }

    async fn create_pod(&self, spec: &PodSpec) -> Result<String, ClusterError> {
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/api/v1/namespaces/{}/pods", spec.namespace),
            )
            .json(&spec.manifest())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClusterError::Api { status, body });
        }

        let created: KubeObject = response.json().await?;
        Ok(created.metadata.name)
    }
}
