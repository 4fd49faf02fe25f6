//! Container engine precondition
use crate::error::ProvisionError;
use crate::exec::CommandExecutor;
use anyhow::Result;
use tracing::info;

pub const ENGINE: &str = "docker";

/// Fail unless docker is installed and its daemon answers `docker info`
pub fn check_container_engine<E: CommandExecutor>(exec: &E) -> Result<()> {
    if !exec.check_command_exists(ENGINE)? {
        return Err(ProvisionError::EngineUnavailable(
            "Docker is not installed. Please install Docker first.".into(),
        )
        .into());
    }

    if !engine_running(exec)? {
        return Err(ProvisionError::EngineUnavailable(
            "Docker is not running. Please start Docker first.".into(),
        )
        .into());
    }

    info!("✓ Docker is running");
    Ok(())
}

pub fn engine_running<E: CommandExecutor>(exec: &E) -> Result<bool> {
    let output = exec.execute_simple(ENGINE, &["info"])?;
    Ok(output.status.success())
}
