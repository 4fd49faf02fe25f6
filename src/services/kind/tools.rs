//! kind / kubectl installation
use crate::config::DevConfig;
use crate::download::Fetcher;
use crate::error::ProvisionError;
use crate::exec::CommandExecutor;
use crate::platform::Platform;
use anyhow::{Context, Result};
use tracing::{info, warn};

pub const KIND: &str = "kind";
pub const KUBECTL: &str = "kubectl";

/// Install the pinned kind release unless kind is already on PATH
pub fn check_and_install_kind<E: CommandExecutor, F: Fetcher>(
    exec: &E,
    fetcher: &F,
    config: &DevConfig,
) -> Result<()> {
    if exec.check_command_exists(KIND)? {
        info!("✓ kind is already installed");
        return Ok(());
    }

    info!("Installing kind {}...", config.kind_version);
    let platform = Platform::detect(exec)?;
    let url = kind_download_url(config, &platform);

    install_binary(exec, fetcher, config, KIND, &url).context("Failed to install kind")?;
    info!("✓ kind installed successfully");
    Ok(())
}

/// Install the latest stable kubectl unless kubectl is already on PATH
pub fn check_and_install_kubectl<E: CommandExecutor, F: Fetcher>(
    exec: &E,
    fetcher: &F,
    config: &DevConfig,
) -> Result<()> {
    if exec.check_command_exists(KUBECTL)? {
        info!("✓ kubectl is already installed");
        return Ok(());
    }

    warn!("kubectl not found, installing...");
    let platform = Platform::detect(exec)?;
    let version = resolve_stable_kubectl(fetcher, config)?;
    let url = kubectl_download_url(config, &version, &platform);

    install_binary(exec, fetcher, config, KUBECTL, &url).context("Failed to install kubectl")?;
    info!("✓ kubectl {} installed successfully", version);
    Ok(())
}

pub fn kind_download_url(config: &DevConfig, platform: &Platform) -> String {
    format!(
        "{}/{}/kind-{}-{}",
        config.kind_download_base.trim_end_matches('/'),
        config.kind_version,
        platform.os,
        platform.arch
    )
}

pub fn kubectl_download_url(config: &DevConfig, version: &str, platform: &Platform) -> String {
    format!(
        "{}/{}/bin/{}/{}/kubectl",
        config.kubectl_release_base.trim_end_matches('/'),
        version,
        platform.os,
        platform.arch
    )
}

/// Read the current stable Kubernetes release tag from `stable.txt`
pub fn resolve_stable_kubectl<F: Fetcher>(fetcher: &F, config: &DevConfig) -> Result<String> {
    let url = format!(
        "{}/stable.txt",
        config.kubectl_release_base.trim_end_matches('/')
    );
    let body = fetcher
        .fetch_text(&url)
        .context("Failed to resolve latest stable kubectl version")?;
    let version = body.trim();
    validate_version(version)?;
    Ok(version.to_string())
}

/// A release tag has to be safe to splice into a URL path
fn validate_version(version: &str) -> Result<()> {
    let valid = version.len() > 1
        && version.starts_with('v')
        && !version.contains(|c: char| c.is_whitespace() || c == '/');
    if !valid {
        return Err(ProvisionError::Download(format!(
            "unexpected stable version string '{}'",
            version
        ))
        .into());
    }
    Ok(())
}

/// Download `url`, stage it as an executable, then move it into the install dir.
/// The move runs under sudo unless we are already root.
fn install_binary<E: CommandExecutor, F: Fetcher>(
    exec: &E,
    fetcher: &F,
    config: &DevConfig,
    binary: &str,
    url: &str,
) -> Result<()> {
    info!("  Downloading from: {}", url);
    let content = fetcher.fetch_bytes(url)?;

    let staging = tempfile::Builder::new()
        .prefix("keel-dev-")
        .tempdir()
        .map_err(|e| ProvisionError::Install(format!("staging directory: {}", e)))?;
    let staged = staging.path().join(binary);
    exec.write_executable(&staged, &content)
        .map_err(|e| ProvisionError::Install(format!("{:#}", e)))?;

    let staged = staged.to_string_lossy().to_string();
    let dest = config.install_path(binary).to_string_lossy().to_string();
    let moved = if exec.is_root() {
        exec.execute_interactive("mv", &[&staged, &dest])
    } else {
        info!("  Installing to {} (requires sudo)", dest);
        exec.execute_interactive("sudo", &["mv", &staged, &dest])
    };
    moved.map_err(|e| ProvisionError::Install(format!("{} -> {}: {:#}", staged, dest, e)))?;

    Ok(())
}

/// First line of a tool's version output, if the tool is installed
pub fn tool_version<E: CommandExecutor>(exec: &E, tool: &str) -> Result<Option<String>> {
    if !exec.check_command_exists(tool)? {
        return Ok(None);
    }
    let args: &[&str] = match tool {
        KUBECTL => &["version", "--client"],
        _ => &["version"],
    };
    let output = exec.execute_simple(tool, args)?;
    let version = String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or("unknown")
        .trim()
        .to_string();
    Ok(Some(version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::mock::MockFetcher;
    use crate::error::exit_code;
    use crate::exec::mock::MockExecutor;

    fn linux_amd64() -> MockExecutor {
        MockExecutor::new()
            .respond("uname -s", 0, "Linux\n")
            .respond("uname -m", 0, "x86_64\n")
    }

    #[test]
    fn test_kind_url() {
        let config = DevConfig::default();
        let platform = Platform {
            os: "linux".into(),
            arch: "amd64".into(),
        };
        assert_eq!(
            kind_download_url(&config, &platform),
            "https://kind.sigs.k8s.io/dl/v0.20.0/kind-linux-amd64"
        );
    }

    #[test]
    fn test_kubectl_url() {
        let config = DevConfig::default();
        let platform = Platform {
            os: "darwin".into(),
            arch: "arm64".into(),
        };
        assert_eq!(
            kubectl_download_url(&config, "v1.29.1", &platform),
            "https://dl.k8s.io/release/v1.29.1/bin/darwin/arm64/kubectl"
        );
    }

    #[test]
    fn test_kind_present_skips_download() {
        let exec = MockExecutor::new().with_command("kind");
        let fetcher = MockFetcher::new();
        check_and_install_kind(&exec, &fetcher, &DevConfig::default()).unwrap();
        assert!(fetcher.requests().is_empty());
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn test_kind_install_uses_sudo() {
        let exec = linux_amd64();
        let fetcher = MockFetcher::new().serve(
            "https://kind.sigs.k8s.io/dl/v0.20.0/kind-linux-amd64",
            b"kind-binary",
        );
        check_and_install_kind(&exec, &fetcher, &DevConfig::default()).unwrap();

        assert_eq!(exec.written().len(), 1);
        assert!(exec.written()[0].ends_with("kind (11 bytes)"));
        assert!(exec.called_prefix("sudo mv "));
        assert!(
            exec.calls()
                .iter()
                .any(|c| c.ends_with(" /usr/local/bin/kind"))
        );
    }

    #[test]
    fn test_install_as_root_skips_sudo() {
        let exec = linux_amd64().as_root();
        let fetcher = MockFetcher::new().serve(
            "https://kind.sigs.k8s.io/dl/v0.20.0/kind-linux-amd64",
            b"kind-binary",
        );
        check_and_install_kind(&exec, &fetcher, &DevConfig::default()).unwrap();
        assert!(exec.called_prefix("mv "));
        assert!(!exec.called_prefix("sudo"));
    }

    #[test]
    fn test_kind_download_failure_is_fatal() {
        let exec = linux_amd64();
        let fetcher = MockFetcher::new();
        let err = check_and_install_kind(&exec, &fetcher, &DevConfig::default()).unwrap_err();
        assert_eq!(exit_code(&err), 30);
        assert!(exec.written().is_empty());
    }

    #[test]
    fn test_failed_move_is_install_error() {
        let exec = MockExecutor::new()
            .respond("uname -s", 0, "Linux\n")
            .respond("uname -m", 0, "aarch64\n")
            .fail_on("sudo mv");
        let fetcher = MockFetcher::new().serve(
            "https://kind.sigs.k8s.io/dl/v0.20.0/kind-linux-arm64",
            b"kind-binary",
        );
        let err = check_and_install_kind(&exec, &fetcher, &DevConfig::default()).unwrap_err();
        assert_eq!(exit_code(&err), 40);
    }

    #[test]
    fn test_install_dir_from_config() {
        let exec = linux_amd64();
        let fetcher = MockFetcher::new().serve(
            "https://kind.sigs.k8s.io/dl/v0.20.0/kind-linux-amd64",
            b"kind-binary",
        );
        let config = DevConfig {
            install_dir: "/opt/keel/bin".into(),
            ..DevConfig::default()
        };
        check_and_install_kind(&exec, &fetcher, &config).unwrap();
        assert!(
            exec.calls()
                .iter()
                .any(|c| c.ends_with(" /opt/keel/bin/kind"))
        );
    }

    #[test]
    fn test_kubectl_resolves_stable_version() {
        let exec = linux_amd64();
        let fetcher = MockFetcher::new()
            .serve("https://dl.k8s.io/release/stable.txt", b"v1.29.1\n")
            .serve(
                "https://dl.k8s.io/release/v1.29.1/bin/linux/amd64/kubectl",
                b"kubectl-binary",
            );
        check_and_install_kubectl(&exec, &fetcher, &DevConfig::default()).unwrap();
        assert_eq!(
            fetcher.requests(),
            vec![
                "https://dl.k8s.io/release/stable.txt",
                "https://dl.k8s.io/release/v1.29.1/bin/linux/amd64/kubectl",
            ]
        );
        assert!(
            exec.calls()
                .iter()
                .any(|c| c.ends_with(" /usr/local/bin/kubectl"))
        );
    }

    #[test]
    fn test_kubectl_rejects_garbage_version() {
        let exec = linux_amd64();
        let fetcher = MockFetcher::new().serve(
            "https://dl.k8s.io/release/stable.txt",
            b"<html>maintenance</html>",
        );
        let err =
            check_and_install_kubectl(&exec, &fetcher, &DevConfig::default()).unwrap_err();
        assert_eq!(exit_code(&err), 30);
        assert_eq!(fetcher.requests().len(), 1);
    }

    #[test]
    fn test_validate_version() {
        assert!(validate_version("v1.29.1").is_ok());
        assert!(validate_version("").is_err());
        assert!(validate_version("v").is_err());
        assert!(validate_version("1.29.1").is_err());
        assert!(validate_version("v1.29 .1").is_err());
        assert!(validate_version("v1/../x").is_err());
    }

    #[test]
    fn test_tool_version() {
        let exec = MockExecutor::new()
            .with_command("kind")
            .respond("kind version", 0, "kind v0.20.0 go1.20.4 linux/amd64\n");
        assert_eq!(
            tool_version(&exec, "kind").unwrap().as_deref(),
            Some("kind v0.20.0 go1.20.4 linux/amd64")
        );
        assert_eq!(tool_version(&exec, "kubectl").unwrap(), None);
    }
}
