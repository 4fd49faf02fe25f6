//! Provisioning configuration
//!
//! Values are layered: built-in defaults, then an optional `keel-dev.toml`,
//! then `.env` / process environment (`KEEL_DEV_*`), then CLI flags.
use crate::error::ProvisionError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "keel-dev.toml";
pub const DEFAULT_CLUSTER_NAME: &str = "keel-dev";
pub const DEFAULT_KIND_VERSION: &str = "v0.20.0";
pub const DEFAULT_READY_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DevConfig {
    pub cluster_name: String,
    pub kind_version: String,
    pub ready_timeout_secs: u64,
    pub install_dir: PathBuf,
    pub kind_download_base: String,
    pub kubectl_release_base: String,
    pub download_timeout_secs: u64,
    pub build_command: String,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            cluster_name: DEFAULT_CLUSTER_NAME.to_string(),
            kind_version: DEFAULT_KIND_VERSION.to_string(),
            ready_timeout_secs: DEFAULT_READY_TIMEOUT_SECS,
            install_dir: PathBuf::from("/usr/local/bin"),
            kind_download_base: "https://kind.sigs.k8s.io/dl".to_string(),
            kubectl_release_base: "https://dl.k8s.io/release".to_string(),
            download_timeout_secs: 60,
            build_command: "cargo build --release".to_string(),
        }
    }
}

impl DevConfig {
    /// Load configuration from `path` (or `./keel-dev.toml` when present),
    /// then apply `.env` and `KEEL_DEV_*` overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        // .env is optional
        dotenv::dotenv().ok();
        config.apply_env_with(|key| std::env::var(key).ok())?;
        config.validate()?;

        debug!(?config, "config.loaded");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ProvisionError::Config(format!("{}: {}", path.display(), e)))
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ProvisionError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Apply `KEEL_DEV_*` overrides from `lookup`. Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("KEEL_DEV_CLUSTER_NAME") {
            self.cluster_name = v;
        }
        if let Some(v) = get("KEEL_DEV_KIND_VERSION") {
            self.kind_version = v;
        }
        if let Some(v) = get("KEEL_DEV_READY_TIMEOUT") {
            self.ready_timeout_secs = parse_secs("KEEL_DEV_READY_TIMEOUT", &v)?;
        }
        if let Some(v) = get("KEEL_DEV_INSTALL_DIR") {
            self.install_dir = PathBuf::from(v);
        }
        if let Some(v) = get("KEEL_DEV_KIND_DOWNLOAD_BASE") {
            self.kind_download_base = v;
        }
        if let Some(v) = get("KEEL_DEV_KUBECTL_RELEASE_BASE") {
            self.kubectl_release_base = v;
        }
        if let Some(v) = get("KEEL_DEV_DOWNLOAD_TIMEOUT") {
            self.download_timeout_secs = parse_secs("KEEL_DEV_DOWNLOAD_TIMEOUT", &v)?;
        }
        if let Some(v) = get("KEEL_DEV_BUILD_COMMAND") {
            self.build_command = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.cluster_name.trim().is_empty() {
            return Err(ProvisionError::Config("cluster_name must not be empty".into()).into());
        }
        if self.kind_version.trim().is_empty() {
            return Err(ProvisionError::Config("kind_version must not be empty".into()).into());
        }
        if self.ready_timeout_secs == 0 {
            return Err(
                ProvisionError::Config("ready_timeout_secs must be greater than 0".into()).into(),
            );
        }
        if self.download_timeout_secs == 0 {
            return Err(ProvisionError::Config(
                "download_timeout_secs must be greater than 0".into(),
            )
            .into());
        }
        Ok(())
    }

    /// kubectl context kind creates for the cluster
    pub fn context_name(&self) -> String {
        format!("kind-{}", self.cluster_name)
    }

    pub fn install_path(&self, binary: &str) -> PathBuf {
        self.install_dir.join(binary)
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    value.trim().parse::<u64>().map_err(|_| {
        ProvisionError::Config(format!(
            "{} must be a number of seconds, got '{}'",
            key, value
        ))
        .into()
    })
}
