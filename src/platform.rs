//! Host OS / architecture detection for download URLs
use crate::exec::CommandExecutor;
use anyhow::{Context, Result};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    /// Detect the host platform from `uname -s` / `uname -m`
    pub fn detect<E: CommandExecutor>(exec: &E) -> Result<Self> {
        let os = uname(exec, "-s")?.to_lowercase();
        let raw_arch = uname(exec, "-m")?;
        let arch = normalize_arch(&raw_arch);
        if !is_known_arch(&arch) {
            warn!("Unrecognized architecture '{}', using it as-is", raw_arch);
        }
        Ok(Self { os, arch })
    }
}

/// Map `uname -m` output to the naming used by kind and Kubernetes releases.
/// Unknown values are passed through unchanged.
pub fn normalize_arch(arch: &str) -> String {
    match arch {
        "x86_64" => "amd64".to_string(),
        "aarch64" | "arm64" => "arm64".to_string(),
        other => other.to_string(),
    }
}

fn is_known_arch(arch: &str) -> bool {
    matches!(arch, "amd64" | "arm64")
}

fn uname<E: CommandExecutor>(exec: &E, flag: &str) -> Result<String> {
    let output = exec
        .execute_simple("uname", &[flag])
        .context("Failed to run uname")?;
    if !output.status.success() {
        anyhow::bail!("uname {} exited with {}", flag, output.status);
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
