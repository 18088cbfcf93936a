//! sleuth-server: HTTP upload endpoint for plagiarism checks.
//!
//! Reads `.sleuth/config.toml` from the working directory (plus `SLEUTH_*`
//! environment overrides).

use anyhow::Context;
use sleuth_core::config::SleuthConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let root = std::env::current_dir().context("failed to get current directory")?;
    let config = SleuthConfig::load(&root)?;
    sleuth_server::start_server(config).await
}
