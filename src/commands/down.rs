use crate::config::DevConfig;
use crate::error::ProvisionError;
use crate::exec::CommandExecutor;
use crate::services::kind::{self, tools::KIND};
use anyhow::Result;

/// Delete the development cluster if it exists. Never installs anything.
pub fn handle_down<E: CommandExecutor>(exec: &E, config: &DevConfig) -> Result<()> {
    kind::check_container_engine(exec)?;
    if !exec.check_command_exists(KIND)? {
        return Err(ProvisionError::Command(
            "kind is not installed, so there is no cluster to delete".into(),
        )
        .into());
    }
    kind::delete_cluster(exec, &config.cluster_name)?;
    Ok(())
}
