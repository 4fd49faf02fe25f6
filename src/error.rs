//! Failure categories and their process exit codes
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("config error: {0}")]
    Config(String),
    #[error("{0}")]
    EngineUnavailable(String),
    #[error("download failed: {0}")]
    Download(String),
    #[error("install failed: {0}")]
    Install(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("nodes in context '{context}' not ready within {timeout_secs}s")]
    ReadinessTimeout { context: String, timeout_secs: u64 },
}

impl ProvisionError {
    pub fn code(&self) -> i32 {
        match self {
            Self::Config(_) => 10,
            Self::EngineUnavailable(_) => 20,
            Self::Download(_) => 30,
            Self::Install(_) => 40,
            Self::Command(_) => 50,
            Self::ReadinessTimeout { .. } => 60,
        }
    }
}

/// Exit code for an error chain; uncategorized failures exit with 1
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ProvisionError>())
        .map(ProvisionError::code)
        .unwrap_or(1)
}
