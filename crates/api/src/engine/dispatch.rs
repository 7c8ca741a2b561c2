//! The dispatch orchestrator.
//!
//! A launch request moves through: validation, project resolution, spec
//! listing, one-time cluster provisioning, then the per-spec loop that
//! creates an execution record and submits a worker pod. Failures abort
//! the batch where they happen; records already created are kept
//! (at-least-recorded, no rollback).

use std::collections::BTreeMap;

use chrono::Utc;
use cypar_cluster::pod::{ContainerSpec, EnvVar, PodSpec};
use cypar_core::error::CoreError;
use cypar_core::runid;
use cypar_db::models::execution::CreateExecution;
use cypar_db::models::project::Project;
use cypar_db::repositories::{AnnotationRepo, EnvironmentRepo, ExecutionRepo, ProjectRepo};
use serde::Deserialize;
use validator::Validate;

use crate::engine::DispatchStrategy;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Body of `POST /hooks/launch/plain`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LaunchRequest {
    /// Project to dispatch; must exist. Defaults empty so an absent field
    /// is reported through validation as a client error.
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "project_name is required (max 100 chars)"))]
    pub project_name: String,
    /// Branch override; defaults to the project's configured branch.
    pub branch: Option<String>,
    /// Spec filter override; defaults to the project's spec filter.
    pub specs: Option<String>,
    /// Runner config file passed to the worker command.
    pub config_file: Option<String>,
    /// Run group label passed to the worker command.
    pub group: Option<String>,
    /// Browser passed to the worker command.
    pub browser: Option<String>,
    /// Accepted for compatibility with scheduled launches; pod budgeting
    /// is delegated to the cluster's own scheduling.
    pub max_pods: Option<i32>,
    /// Per-launch override of the project's runner image tag.
    #[validate(length(max = 20, message = "runner_image_version is too long (max 20 chars)"))]
    pub runner_image_version: Option<String>,
}

/// Acknowledgement returned once every spec has been attempted.
#[derive(Debug)]
pub struct DispatchOutcome {
    /// Number of specs dispatched (records created and pods submitted).
    pub dispatched: usize,
}

/// Run one dispatch batch end to end.
pub async fn launch(state: &AppState, request: LaunchRequest) -> AppResult<DispatchOutcome> {
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    // Resolve the project. A missing project is the caller's mistake and
    // reported as such, unlike a failing lookup.
    let project = ProjectRepo::find_by_name(&state.pool, &request.project_name)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", &request.project_name))?;

    let branch = request
        .branch
        .as_deref()
        .filter(|b| !b.trim().is_empty())
        .unwrap_or(&project.branch)
        .to_string();
    let filter = request
        .specs
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(&project.spec_filter)
        .to_string();

    let specs = state
        .spec_source
        .list_specs(&project.repository, &branch, &filter)
        .await?;

    // Provision once per batch, never per spec. Nothing is dispatched when
    // this fails.
    let namespace = &state.config.jobs_namespace;
    state.cluster.ensure_namespace(namespace).await?;
    state
        .cluster
        .ensure_service_account(namespace, namespace)
        .await?;

    tracing::info!(
        project = %project.name,
        branch = %branch,
        specs = specs.len(),
        "dispatching batch",
    );

    let total = specs.len();
    let strategy = DispatchStrategy::for_parallelism(state.config.dispatch_parallelism);
    strategy
        .run_all(specs, |spec| {
            let project = &project;
            let branch = &branch;
            let request = &request;
            async move { dispatch_one(state, project, branch, &spec, request).await }
        })
        .await?;

    Ok(DispatchOutcome { dispatched: total })
}

/// Dispatch a single spec: record first, pod second.
///
/// A pod submission failure after the record was created leaves the record
/// `NOT_STARTED` for external reconciliation; it is logged with the run
/// identifier and surfaced, not rolled back.
async fn dispatch_one(
    state: &AppState,
    project: &Project,
    branch: &str,
    spec: &str,
    request: &LaunchRequest,
) -> AppResult<()> {
    let run_id = runid::generate(&project.repository, spec, Utc::now());

    let execution = ExecutionRepo::create(
        &state.pool,
        &CreateExecution {
            project_id: project.id,
            run_id: run_id.clone(),
            branch: branch.to_string(),
            spec: spec.to_string(),
        },
    )
    .await?;

    // Project settings are read fresh for every pod so edits made while a
    // batch is running apply to the specs still waiting.
    let annotations = AnnotationRepo::list_by_project(&state.pool, project.id).await?;
    let env_vars = EnvironmentRepo::list_by_project(&state.pool, project.id).await?;

    let pod = build_pod_spec(
        state,
        project,
        branch,
        spec,
        &run_id,
        request,
        annotations.iter().map(|a| (a.key.clone(), a.value.clone())),
        env_vars.iter().map(|v| (v.key.clone(), v.value.clone())),
    );

    match state.cluster.create_pod(&pod).await {
        Ok(pod_name) => {
            tracing::info!(
                run_id = %run_id,
                spec = %spec,
                pod = %pod_name,
                execution_id = execution.id,
                "worker pod launched",
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                run_id = %run_id,
                spec = %spec,
                execution_id = execution.id,
                error = %e,
                "pod launch failed; execution record stays NOT_STARTED",
            );
            Err(e.into())
        }
    }
}

/// Assemble the worker pod for one spec.
#[allow(clippy::too_many_arguments)]
fn build_pod_spec(
    state: &AppState,
    project: &Project,
    branch: &str,
    spec: &str,
    run_id: &str,
    request: &LaunchRequest,
    annotations: impl Iterator<Item = (String, String)>,
    project_env: impl Iterator<Item = (String, String)>,
) -> PodSpec {
    let config = &state.config;

    let tag = request
        .runner_image_version
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(&project.runner_image_tag);

    let mut command = vec![
        "npx".to_string(),
        "cypress".to_string(),
        "run".to_string(),
        "--spec".to_string(),
        spec.to_string(),
    ];
    if let Some(browser) = request.browser.as_deref().filter(|b| !b.is_empty()) {
        command.push("--browser".to_string());
        command.push(browser.to_string());
    }
    if let Some(config_file) = request.config_file.as_deref().filter(|c| !c.is_empty()) {
        command.push("--config-file".to_string());
        command.push(config_file.to_string());
    }
    if let Some(group) = request.group.as_deref().filter(|g| !g.is_empty()) {
        command.push("--group".to_string());
        command.push(group.to_string());
    }

    // Project variables first, then the identity the worker echoes back to
    // `POST /executions/update`; identity keys win on collision.
    let mut env: Vec<EnvVar> = project_env
        .map(|(key, value)| EnvVar { key, value })
        .collect();
    env.retain(|v| !v.key.starts_with("CYPAR_"));
    env.extend([
        EnvVar {
            key: "CYPAR_API_URL".to_string(),
            value: config.callback_url.clone(),
        },
        EnvVar {
            key: "CYPAR_BRANCH".to_string(),
            value: branch.to_string(),
        },
        EnvVar {
            key: "CYPAR_RUN_ID".to_string(),
            value: run_id.to_string(),
        },
        EnvVar {
            key: "CYPAR_SPEC".to_string(),
            value: spec.to_string(),
        },
    ]);

    PodSpec {
        namespace: config.jobs_namespace.clone(),
        generate_name: "cypar-runner-".to_string(),
        labels: BTreeMap::from([
            ("app".to_string(), "cypar-runner".to_string()),
            ("worker".to_string(), "kubernetes".to_string()),
            ("run-id".to_string(), run_id.to_string()),
        ]),
        annotations: annotations.collect(),
        service_account: config.jobs_namespace.clone(),
        container: ContainerSpec {
            name: "runner".to_string(),
            image: format!("{}:{}", config.runner_image, tag),
            command,
            env,
        },
    }
}
