use clap::Parser;
use keel_dev::commands::{self, Commands};
use keel_dev::{DevConfig, exit_code, logging};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "keel-dev")]
#[command(version)]
#[command(about = "Set up a local kind cluster for Keel development", long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to ./keel-dev.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the cluster name
    #[arg(long, global = true)]
    cluster_name: Option<String>,

    /// Override the node readiness timeout, in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = DevConfig::load(cli.config.as_deref())?;
    if let Some(name) = cli.cluster_name {
        config.cluster_name = name;
    }
    if let Some(timeout) = cli.timeout {
        config.ready_timeout_secs = timeout;
    }
    config.validate()?;

    commands::handle_command(cli.command.unwrap_or(Commands::Up), &config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    if let Err(e) = logging::init_logging(level) {
        eprintln!("failed to initialize logging: {:#}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(exit_code(&e) as u8)
        }
    }
}
