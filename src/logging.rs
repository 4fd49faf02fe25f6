use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Leveled, colored log lines on stdout. `RUST_LOG` overrides `level`.
pub fn init_logging(level: &str) -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_ansi(std::io::stdout().is_terminal())
        .with_writer(std::io::stdout)
        .compact();
    tracing_subscriber::registry()
        .with(env)
        .with(layer)
        .try_init()?;
    Ok(())
}
