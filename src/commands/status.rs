//! Read-only report of the development environment
use crate::config::DevConfig;
use crate::exec::CommandExecutor;
use crate::services::kind::cluster::cluster_exists;
use crate::services::kind::engine::{ENGINE, engine_running};
use crate::services::kind::tools::{KIND, KUBECTL, tool_version};
use crate::services::kind::verify::{NodeStatus, node_statuses};
use anyhow::Result;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub engine_installed: bool,
    pub engine_running: bool,
    pub kind: Option<String>,
    pub kubectl: Option<String>,
    /// None when it could not be checked (engine down or kind missing)
    pub cluster_exists: Option<bool>,
    pub nodes: Vec<NodeStatus>,
}

pub fn collect_status<E: CommandExecutor>(exec: &E, config: &DevConfig) -> Result<StatusReport> {
    let engine_installed = exec.check_command_exists(ENGINE)?;
    let engine_running = engine_installed && engine_running(exec)?;
    let kind = tool_version(exec, KIND)?;
    let kubectl = tool_version(exec, KUBECTL)?;

    let cluster_exists = if engine_running && kind.is_some() {
        Some(cluster_exists(exec, &config.cluster_name)?)
    } else {
        None
    };

    let nodes = if cluster_exists == Some(true) && kubectl.is_some() {
        node_statuses(exec, &config.context_name()).unwrap_or_else(|e| {
            warn!("Unable to get nodes: {:#}", e);
            Vec::new()
        })
    } else {
        Vec::new()
    };

    Ok(StatusReport {
        engine_installed,
        engine_running,
        kind,
        kubectl,
        cluster_exists,
        nodes,
    })
}

pub fn render_status(report: &StatusReport, config: &DevConfig) -> String {
    let mark = |ok: bool| if ok { "✓" } else { "✗" };
    let mut out = String::new();

    let engine = match (report.engine_installed, report.engine_running) {
        (false, _) => "not installed",
        (true, false) => "not running",
        (true, true) => "running",
    };
    out.push_str(&format!(
        "  {} Docker: {}\n",
        mark(report.engine_running),
        engine
    ));
    for (name, version) in [("kind", &report.kind), ("kubectl", &report.kubectl)] {
        out.push_str(&format!(
            "  {} {}: {}\n",
            mark(version.is_some()),
            name,
            version.as_deref().unwrap_or("not installed")
        ));
    }

    match report.cluster_exists {
        Some(true) => out.push_str(&format!(
            "  ✓ Cluster '{}' exists (context {})\n",
            config.cluster_name,
            config.context_name()
        )),
        Some(false) => out.push_str(&format!(
            "  ✗ Cluster '{}' does not exist (run: keel-dev up)\n",
            config.cluster_name
        )),
        None => out.push_str(&format!(
            "  ? Cluster '{}' could not be checked\n",
            config.cluster_name
        )),
    }

    if !report.nodes.is_empty() {
        out.push_str("\nNodes:\n");
        for node in &report.nodes {
            out.push_str(&format!(
                "  {} {} ({})\n",
                mark(node.ready),
                node.name,
                if node.ready { "Ready" } else { "NotReady" }
            ));
        }
    }
    out
}

pub fn handle_status<E: CommandExecutor>(exec: &E, config: &DevConfig) -> Result<()> {
    let report = collect_status(exec, config)?;
    println!("Keel development environment");
    println!();
    print!("{}", render_status(&report, config));
    Ok(())
}
