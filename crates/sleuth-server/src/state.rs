use anyhow::Context;
use sleuth_core::config::{DetectionConfig, ServerConfig, SleuthConfig};
use sleuth_parser::Language;
use std::time::Instant;

/// Shared application state. Read-only after startup: every comparison
/// builds its own pipeline from these settings.
#[derive(Debug, Clone)]
pub struct AppState {
    pub detection: DetectionConfig,
    pub server: ServerConfig,
    /// Grammar used when a request does not name one.
    pub default_language: Language,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: SleuthConfig) -> anyhow::Result<Self> {
        let default_language = Language::from_name(&config.detection.language)
            .with_context(|| format!("unknown language: {}", config.detection.language))?;
        Ok(Self {
            detection: config.detection,
            server: config.server,
            default_language,
            started_at: Instant::now(),
        })
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
