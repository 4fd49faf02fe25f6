// Command module routing
//
// To add a new command:
// 1. Create a new file in this directory (e.g., `mycommand.rs`)
// 2. Add `pub mod mycommand;` below
// 3. Add the variant to `Commands` and the match arm in `handle_command`

pub mod down;
pub mod status;
pub mod up;

use crate::config::DevConfig;
use crate::exec::LocalExecutor;
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Create (if needed) and verify the local kind cluster (default)
    Up,
    /// Show Docker, tool and cluster status without changing anything
    Status,
    /// Delete the local kind cluster
    Down,
}

/// Dispatch command to appropriate handler
pub fn handle_command(command: Commands, config: &DevConfig) -> Result<()> {
    let exec = LocalExecutor;
    match command {
        Commands::Up => up::handle_up(&exec, config),
        Commands::Status => status::handle_status(&exec, config),
        Commands::Down => down::handle_down(&exec, config),
    }
}
