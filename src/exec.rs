use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Local command execution helpers
pub mod local {
    use super::*;

    pub fn execute(program: &str, args: &[&str]) -> Result<Output> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd.stdout(Stdio::piped()); // Capture stdout for parsing
        cmd.stderr(Stdio::piped());
        cmd.stdin(Stdio::null());
        cmd.output()
            .with_context(|| format!("Failed to execute command: {}", program))
    }

    /// Check if a command exists using the which crate
    pub fn check_command_exists(command: &str) -> bool {
        which::which(command).is_ok()
    }

    /// Set file permissions (Unix only)
    #[cfg(unix)]
    pub fn set_permissions(path: impl AsRef<Path>, mode: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let path_ref = path.as_ref();
        std::fs::set_permissions(path_ref, std::fs::Permissions::from_mode(mode))
            .with_context(|| format!("Failed to set permissions for: {}", path_ref.display()))
    }

    #[cfg(unix)]
    pub fn is_root() -> bool {
        nix::unistd::geteuid().is_root()
    }

    #[cfg(not(unix))]
    pub fn is_root() -> bool {
        false
    }
}

/// Trait for executing commands on the host
///
/// Every external tool the provisioning steps touch goes through this trait,
/// so the steps can be driven against a recording executor in tests.
pub trait CommandExecutor {
    /// Execute a command and capture its output
    fn execute_simple(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Execute a command with inherited stdio, failing on a non-zero exit
    fn execute_interactive(&self, program: &str, args: &[&str]) -> Result<()>;

    /// Check if a command is resolvable on PATH
    fn check_command_exists(&self, command: &str) -> Result<bool>;

    /// Write `content` to `path` and mark it executable
    fn write_executable(&self, path: &Path, content: &[u8]) -> Result<()>;

    /// Whether the current process already has root privileges
    fn is_root(&self) -> bool;
}

/// Executor for the machine keel-dev is running on
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalExecutor;

impl CommandExecutor for LocalExecutor {
    fn execute_simple(&self, program: &str, args: &[&str]) -> Result<Output> {
        debug!(program, ?args, "exec");
        local::execute(program, args)
    }

    fn execute_interactive(&self, program: &str, args: &[&str]) -> Result<()> {
        debug!(program, ?args, "exec.interactive");
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to execute interactive command: {}", program))?;

        if !status.success() {
            anyhow::bail!(
                "Command '{} {}' failed with exit code: {}",
                program,
                args.join(" "),
                status.code().unwrap_or(1)
            );
        }

        Ok(())
    }

    fn check_command_exists(&self, command: &str) -> Result<bool> {
        Ok(local::check_command_exists(command))
    }

    fn write_executable(&self, path: &Path, content: &[u8]) -> Result<()> {
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        #[cfg(unix)]
        local::set_permissions(path, 0o755)?;
        Ok(())
    }

    fn is_root(&self) -> bool {
        local::is_root()
    }
}
