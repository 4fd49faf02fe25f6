//! Context switch and node readiness
use crate::error::ProvisionError;
use crate::exec::CommandExecutor;
use crate::services::kind::tools::KUBECTL;
use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

/// Switch kubectl to `context`, wait for every node to be Ready, then list nodes
pub fn verify_cluster<E: CommandExecutor>(
    exec: &E,
    context: &str,
    timeout_secs: u64,
) -> Result<()> {
    use_context(exec, context)?;

    info!("Waiting for nodes to be ready (timeout {}s)...", timeout_secs);
    let timeout = format!("--timeout={}s", timeout_secs);
    exec.execute_interactive(
        KUBECTL,
        &["wait", "--for=condition=Ready", "nodes", "--all", &timeout],
    )
    .map_err(|e| {
        warn!("kubectl wait failed: {:#}", e);
        ProvisionError::ReadinessTimeout {
            context: context.to_string(),
            timeout_secs,
        }
    })?;
    info!("✓ Cluster is ready");

    exec.execute_interactive(KUBECTL, &["get", "nodes"])
        .map_err(|e| ProvisionError::Command(format!("kubectl get nodes: {:#}", e)))?;
    Ok(())
}

pub fn use_context<E: CommandExecutor>(exec: &E, context: &str) -> Result<()> {
    let output = exec.execute_simple(KUBECTL, &["config", "use-context", context])?;
    if !output.status.success() {
        return Err(ProvisionError::Command(format!(
            "kubectl config use-context {}: {}",
            context,
            String::from_utf8_lossy(&output.stderr).trim()
        ))
        .into());
    }
    info!("✓ Switched to context '{}'", context);
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStatus {
    pub name: String,
    pub ready: bool,
}

#[derive(Deserialize)]
struct NodeList {
    #[serde(default)]
    items: Vec<Node>,
}

#[derive(Deserialize)]
struct Node {
    metadata: NodeMetadata,
    #[serde(default)]
    status: Option<NodeState>,
}

#[derive(Deserialize)]
struct NodeMetadata {
    name: String,
}

#[derive(Deserialize)]
struct NodeState {
    #[serde(default)]
    conditions: Vec<NodeCondition>,
}

#[derive(Deserialize)]
struct NodeCondition {
    #[serde(rename = "type")]
    kind: String,
    status: String,
}

/// Per-node readiness in `context`, read without changing the current context
pub fn node_statuses<E: CommandExecutor>(exec: &E, context: &str) -> Result<Vec<NodeStatus>> {
    let output = exec.execute_simple(
        KUBECTL,
        &["get", "nodes", "-o", "json", "--context", context],
    )?;
    if !output.status.success() {
        return Err(ProvisionError::Command(format!(
            "kubectl get nodes --context {}: {}",
            context,
            String::from_utf8_lossy(&output.stderr).trim()
        ))
        .into());
    }
    parse_node_list(&output.stdout)
}

pub fn parse_node_list(json: &[u8]) -> Result<Vec<NodeStatus>> {
    let list: NodeList = serde_json::from_slice(json).context("Failed to parse node list JSON")?;
    Ok(list
        .items
        .into_iter()
        .map(|node| {
            let ready = node
                .status
                .map(|s| {
                    s.conditions
                        .iter()
                        .any(|c| c.kind == "Ready" && c.status == "True")
                })
                .unwrap_or(false);
            NodeStatus {
                name: node.metadata.name,
                ready,
            }
        })
        .collect())
}
