//! kind cluster lifecycle
use crate::error::ProvisionError;
use crate::exec::CommandExecutor;
use crate::services::kind::tools::KIND;
use anyhow::Result;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterOutcome {
    Created,
    AlreadyExists,
}

/// Names from `kind get clusters`
pub fn list_clusters<E: CommandExecutor>(exec: &E) -> Result<Vec<String>> {
    let output = exec.execute_simple(KIND, &["get", "clusters"])?;
    if !output.status.success() {
        return Err(ProvisionError::Command(format!(
            "kind get clusters exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ))
        .into());
    }
    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn cluster_exists<E: CommandExecutor>(exec: &E, name: &str) -> Result<bool> {
    Ok(list_clusters(exec)?.iter().any(|c| c == name))
}

/// Create the cluster unless kind already knows it.
///
/// The existence check and the create are not atomic; kind itself rejects
/// a duplicate create.
pub fn ensure_cluster<E: CommandExecutor>(exec: &E, name: &str) -> Result<ClusterOutcome> {
    if cluster_exists(exec, name)? {
        info!("✓ Cluster '{}' already exists", name);
        return Ok(ClusterOutcome::AlreadyExists);
    }

    info!("Creating kind cluster '{}'...", name);
    exec.execute_interactive(KIND, &["create", "cluster", "--name", name])
        .map_err(|e| ProvisionError::Command(format!("kind create cluster: {:#}", e)))?;
    info!("✓ Cluster '{}' created", name);
    Ok(ClusterOutcome::Created)
}

/// Delete the cluster if it exists
pub fn delete_cluster<E: CommandExecutor>(exec: &E, name: &str) -> Result<bool> {
    if !cluster_exists(exec, name)? {
        info!("Cluster '{}' does not exist, nothing to delete", name);
        return Ok(false);
    }

    info!("Deleting kind cluster '{}'...", name);
    exec.execute_interactive(KIND, &["delete", "cluster", "--name", name])
        .map_err(|e| ProvisionError::Command(format!("kind delete cluster: {:#}", e)))?;
    info!("✓ Cluster '{}' deleted", name);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::mock::MockExecutor;

    #[test]
    fn test_creates_missing_cluster() {
        let exec = MockExecutor::new().respond("kind get clusters", 0, "other\n");
        let outcome = ensure_cluster(&exec, "keel-dev").unwrap();
        assert_eq!(outcome, ClusterOutcome::Created);
        assert!(exec.called("kind create cluster --name keel-dev"));
    }

    #[test]
    fn test_existing_cluster_is_noop() {
        let exec = MockExecutor::new().respond("kind get clusters", 0, "keel-dev\nother\n");
        let outcome = ensure_cluster(&exec, "keel-dev").unwrap();
        assert_eq!(outcome, ClusterOutcome::AlreadyExists);
        assert!(!exec.called_prefix("kind create"));
    }

    #[test]
    fn test_name_match_is_exact() {
        let exec = MockExecutor::new().respond("kind get clusters", 0, "keel-dev-old\n");
        assert!(!cluster_exists(&exec, "keel-dev").unwrap());
    }

    #[test]
    fn test_no_clusters() {
        // kind prints "No kind clusters found." on stderr
        let exec = MockExecutor::new().respond("kind get clusters", 0, "");
        assert!(list_clusters(&exec).unwrap().is_empty());
    }

    #[test]
    fn test_create_failure_is_command_error() {
        let exec = MockExecutor::new().fail_on("kind create");
        let err = ensure_cluster(&exec, "keel-dev").unwrap_err();
        assert_eq!(crate::error::exit_code(&err), 50);
    }

    #[test]
    fn test_delete_only_when_present() {
        let exec = MockExecutor::new().respond("kind get clusters", 0, "");
        assert!(!delete_cluster(&exec, "keel-dev").unwrap());
        assert!(!exec.called_prefix("kind delete"));

        let exec = MockExecutor::new().respond("kind get clusters", 0, "keel-dev\n");
        assert!(delete_cluster(&exec, "keel-dev").unwrap());
        assert!(exec.called("kind delete cluster --name keel-dev"));
    }
}
