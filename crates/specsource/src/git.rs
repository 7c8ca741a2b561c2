//! Git-backed spec source.
//!
//! Shallow-clones the requested branch into a scratch directory, walks the
//! working tree for files matching the filter, and returns their
//! repository-relative paths sorted and deduplicated. The clone is bounded
//! by a timeout and the scratch directory is removed when the value drops.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::filter;
use crate::{SpecSource, SpecSourceError};

/// Default bound on the whole clone operation.
const DEFAULT_CLONE_TIMEOUT: Duration = Duration::from_secs(60);

/// Lists specs by shallow-cloning the project repository.
pub struct GitSpecSource {
    clone_timeout: Duration,
}

impl Default for GitSpecSource {
    fn default() -> Self {
        Self {
            clone_timeout: DEFAULT_CLONE_TIMEOUT,
        }
    }
}

impl GitSpecSource {
    pub fn new(clone_timeout: Duration) -> Self {
        Self { clone_timeout }
    }

    /// Run `git clone --depth 1 --branch <branch>` into `target`.
    async fn clone_branch(
        &self,
        repository: &str,
        branch: &str,
        target: &Path,
    ) -> Result<(), SpecSourceError> {
        let mut cmd = Command::new("git");
        cmd.arg("clone")
            .arg("--depth")
            .arg("1")
            .arg("--branch")
            .arg(branch)
            .arg("--single-branch")
            .arg(repository)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.clone_timeout, cmd.output())
            .await
            .map_err(|_| {
                SpecSourceError::Transient(format!(
                    "clone of {repository} timed out after {:?}",
                    self.clone_timeout
                ))
            })?
            .map_err(|e| SpecSourceError::Transient(format!("failed to spawn git: {e}")))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        Err(classify_clone_failure(&stderr))
    }
}

/// Git reports caller mistakes (unknown branch/repository) and transient
/// trouble through the same exit code; the stderr text tells them apart.
fn classify_clone_failure(stderr: &str) -> SpecSourceError {
    let lowered = stderr.to_lowercase();
    let caller_fault = lowered.contains("could not find remote branch")
        || (lowered.contains("remote branch") && lowered.contains("not found"))
        || lowered.contains("repository not found")
        || lowered.contains("does not exist");
    if caller_fault {
        SpecSourceError::BadRequest(stderr.trim().to_string())
    } else {
        SpecSourceError::Transient(stderr.trim().to_string())
    }
}

/// Collect repository-relative paths of regular files under `root`
/// matching `filter`, skipping the `.git` directory.
fn walk_specs(root: &Path, filter_expr: &str) -> std::io::Result<Vec<String>> {
    let mut found = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                if entry.file_name() == ".git" {
                    continue;
                }
                stack.push(path);
            } else if file_type.is_file() {
                let relative = path
                    .strip_prefix(root)
                    .expect("walked path is under root")
                    .to_string_lossy()
                    .replace('\\', "/");
                if filter::matches(filter_expr, &relative) {
                    found.push(relative);
                }
            }
        }
    }
    found.sort();
    found.dedup();
    Ok(found)
}

#[async_trait]
impl SpecSource for GitSpecSource {
    async fn list_specs(
        &self,
        repository: &str,
        branch: &str,
        filter: &str,
    ) -> Result<Vec<String>, SpecSourceError> {
        if branch.trim().is_empty() {
            return Err(SpecSourceError::BadRequest("branch must not be empty".into()));
        }

        let scratch = tempfile::tempdir()
            .map_err(|e| SpecSourceError::Transient(format!("failed to create scratch dir: {e}")))?;

        self.clone_branch(repository, branch, scratch.path()).await?;

        let root = scratch.path().to_path_buf();
        let filter_expr = filter.to_string();
        let specs = tokio::task::spawn_blocking(move || walk_specs(&root, &filter_expr))
            .await
            .map_err(|e| SpecSourceError::Transient(format!("spec walk panicked: {e}")))?
            .map_err(|e| SpecSourceError::Transient(format!("failed to walk clone: {e}")))?;

        tracing::debug!(repository, branch, count = specs.len(), "listed specs");
        Ok(specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn unknown_branch_is_callers_fault() {
        let err = classify_clone_failure(
            "fatal: Could not find remote branch nope to clone.",
        );
        assert_matches!(err, SpecSourceError::BadRequest(_));
    }

    #[test]
    fn unknown_repository_is_callers_fault() {
        let err = classify_clone_failure("remote: Repository not found.");
        assert_matches!(err, SpecSourceError::BadRequest(_));
    }

    #[test]
    fn network_trouble_is_transient() {
        let err = classify_clone_failure(
            "fatal: unable to access 'https://host/x.git/': Could not resolve host",
        );
        assert_matches!(err, SpecSourceError::Transient(_));
    }

    #[test]
    fn walk_collects_sorted_relative_matches() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("cypress/e2e/sub")).unwrap();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::write(root.join("cypress/e2e/b.cy.js"), "").unwrap();
        std::fs::write(root.join("cypress/e2e/a.cy.js"), "").unwrap();
        std::fs::write(root.join("cypress/e2e/sub/c.cy.js"), "").unwrap();
        std::fs::write(root.join("README.md"), "").unwrap();
        std::fs::write(root.join(".git/config"), "").unwrap();

        let specs = walk_specs(root, "cypress/e2e/**").unwrap();
        assert_eq!(
            specs,
            vec![
                "cypress/e2e/a.cy.js",
                "cypress/e2e/b.cy.js",
                "cypress/e2e/sub/c.cy.js",
            ]
        );
    }
}
