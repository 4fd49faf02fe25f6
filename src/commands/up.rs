use crate::config::DevConfig;
use crate::download::HttpFetcher;
use crate::exec::CommandExecutor;
use crate::provision::provision_cluster;
use anyhow::Result;
use std::time::Duration;

pub fn handle_up<E: CommandExecutor>(exec: &E, config: &DevConfig) -> Result<()> {
    let fetcher = HttpFetcher::new(Duration::from_secs(config.download_timeout_secs))?;
    provision_cluster(exec, &fetcher, config)?;
    Ok(())
}
