//! Worker pod specification and Kubernetes manifest rendering.
//!
//! A [`PodSpec`] is built per dispatched spec and lives only for the
//! duration of the submission call; the cluster owns the pod from there.

use std::collections::BTreeMap;

use serde::Serialize;

/// A key/value pair exported into the worker container.
#[derive(Debug, Clone, Serialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

/// Container section of a pod specification.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    pub env: Vec<EnvVar>,
}

/// Ephemeral description of one worker pod.
///
/// Maps use `BTreeMap` so rendered manifests are deterministic.
#[derive(Debug, Clone)]
pub struct PodSpec {
    pub namespace: String,
    /// Prefix the cluster completes into a unique pod name.
    pub generate_name: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    pub service_account: String,
    pub container: ContainerSpec,
}

impl PodSpec {
    /// Render the Kubernetes `v1.Pod` manifest for this specification.
    ///
    /// Workers run exactly one spec and must not be restarted by the
    /// cluster: a failed run is reported through the update endpoint, not
    /// retried in place.
    pub fn manifest(&self) -> serde_json::Value {
        let env: Vec<serde_json::Value> = self
            .container
            .env
            .iter()
            .map(|v| serde_json::json!({"name": v.key, "value": v.value}))
            .collect();

        let mut metadata = serde_json::json!({
            "generateName": self.generate_name,
            "namespace": self.namespace,
            "labels": self.labels,
        });
        if !self.annotations.is_empty() {
            metadata["annotations"] = serde_json::json!(self.annotations);
        }

        serde_json::json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": metadata,
            "spec": {
                "serviceAccountName": self.service_account,
                "restartPolicy": "Never",
                "containers": [{
                    "name": self.container.name,
                    "image": self.container.image,
                    "command": self.container.command,
                    "env": env,
                }],
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_spec() -> PodSpec {
        PodSpec {
            namespace: "cypar-jobs".into(),
            generate_name: "cypar-runner-".into(),
            labels: BTreeMap::from([
                ("app".to_string(), "cypar-runner".to_string()),
                ("run-id".to_string(), "ab12cd34ef".to_string()),
            ]),
            annotations: BTreeMap::new(),
            service_account: "cypar-jobs".into(),
            container: ContainerSpec {
                name: "runner".into(),
                image: "cypress/included:13.6.0".into(),
                command: vec!["npx".into(), "cypress".into(), "run".into()],
                env: vec![EnvVar {
                    key: "CYPAR_RUN_ID".into(),
                    value: "ab12cd34ef".into(),
                }],
            },
        }
    }

    #[test]
    fn manifest_has_pod_shape() {
        let manifest = sample_spec().manifest();
        assert_eq!(manifest["kind"], "Pod");
        assert_eq!(manifest["metadata"]["generateName"], "cypar-runner-");
        assert_eq!(manifest["metadata"]["namespace"], "cypar-jobs");
        assert_eq!(manifest["metadata"]["labels"]["app"], "cypar-runner");
        assert_eq!(manifest["spec"]["restartPolicy"], "Never");
        assert_eq!(manifest["spec"]["serviceAccountName"], "cypar-jobs");
        assert_eq!(
            manifest["spec"]["containers"][0]["image"],
            "cypress/included:13.6.0"
        );
        assert_eq!(
            manifest["spec"]["containers"][0]["env"][0]["name"],
            "CYPAR_RUN_ID"
        );
    }

    #[test]
    fn empty_annotations_are_omitted() {
        let manifest = sample_spec().manifest();
        assert!(manifest["metadata"].get("annotations").is_none());

        let mut with_notes = sample_spec();
        with_notes
            .annotations
            .insert("example.com/cost-center".into(), "qa-42".into());
        let manifest = with_notes.manifest();
        assert_eq!(
            manifest["metadata"]["annotations"]["example.com/cost-center"],
            "qa-42"
        );
    }
}
