//! The `up` workflow: engine, tools, cluster, readiness, instructions
use crate::config::DevConfig;
use crate::download::Fetcher;
use crate::exec::CommandExecutor;
use crate::services::kind::{self, ClusterOutcome};
use anyhow::Result;
use tracing::{debug, info};

/// Workflow stages, in order. A failure at any edge aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    EngineOk,
    ToolInstalled,
    ControlToolOk,
    ClusterExists,
    ClusterReady,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpReport {
    pub cluster: ClusterOutcome,
}

/// Provision the development cluster end to end
pub fn provision_cluster<E: CommandExecutor, F: Fetcher>(
    exec: &E,
    fetcher: &F,
    config: &DevConfig,
) -> Result<UpReport> {
    let mut stage = Stage::Start;
    let mut advance = |next: Stage| {
        debug!(from = ?stage, to = ?next, "stage");
        stage = next;
    };

    info!("Setting up local Kubernetes cluster for Keel development...");

    kind::check_container_engine(exec)?;
    advance(Stage::EngineOk);

    kind::check_and_install_kind(exec, fetcher, config)?;
    advance(Stage::ToolInstalled);

    kind::check_and_install_kubectl(exec, fetcher, config)?;
    advance(Stage::ControlToolOk);

    let cluster = kind::ensure_cluster(exec, &config.cluster_name)?;
    advance(Stage::ClusterExists);

    kind::verify_cluster(exec, &config.context_name(), config.ready_timeout_secs)?;
    advance(Stage::ClusterReady);

    kind::print_instructions(config);
    advance(Stage::Done);

    Ok(UpReport { cluster })
}
