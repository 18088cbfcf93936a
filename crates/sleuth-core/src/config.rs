//! Configuration for detection and the upload server.
//!
//! Load order: `.sleuth/config.toml` → environment variables → defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level code-sleuth configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SleuthConfig {
    pub detection: DetectionConfig,
    pub server: ServerConfig,
}

/// Detection pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Number of tokens per shingle (k). Both inputs are always shingled with the same k.
    pub shingle_width: usize,
    /// Hash similarity strictly above this percentage flags plagiarism.
    pub hash_threshold: f64,
    /// Structural similarity strictly above this percentage flags plagiarism.
    pub ast_threshold: f64,
    /// Skip very frequent characters when seeding structural matches on long dumps.
    pub autojunk: bool,
    /// Grammar used when none is given and the file extension is unknown.
    pub language: String,
}

/// Upload server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the API from a browser.
    pub allowed_origins: Vec<String>,
    /// Maximum request body size in bytes (both files together).
    pub max_upload_bytes: usize,
    /// Per-request timeout; bounds latency on pathological inputs.
    pub timeout_secs: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            shingle_width: 5,
            hash_threshold: 60.0,
            ast_threshold: 70.0,
            autojunk: true,
            language: "python".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: vec!["http://localhost:8080".to_string()],
            max_upload_bytes: 1024 * 1024,
            timeout_secs: 30,
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl SleuthConfig {
    /// Load config from `.sleuth/config.toml` under `root`, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(".sleuth").join("config.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        env_override("SLEUTH_SHINGLE_WIDTH", &mut config.detection.shingle_width);
        env_override("SLEUTH_HASH_THRESHOLD", &mut config.detection.hash_threshold);
        env_override("SLEUTH_AST_THRESHOLD", &mut config.detection.ast_threshold);
        env_override("SLEUTH_LANGUAGE", &mut config.detection.language);
        env_override("SLEUTH_HOST", &mut config.server.host);
        env_override("SLEUTH_PORT", &mut config.server.port);
        env_override(
            "SLEUTH_MAX_UPLOAD_BYTES",
            &mut config.server.max_upload_bytes,
        );
        env_override("SLEUTH_TIMEOUT_SECS", &mut config.server.timeout_secs);

        config.detection.language = config.detection.language.to_lowercase();
        config.detection.validate()?;
        Ok(config)
    }
}

impl DetectionConfig {
    /// Reject settings under which the scores would be meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.shingle_width == 0 {
            anyhow::bail!("shingle_width must be at least 1");
        }
        for (name, value) in [
            ("hash_threshold", self.hash_threshold),
            ("ast_threshold", self.ast_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                anyhow::bail!("{name} ({value}) must be between 0 and 100");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SleuthConfig::default();
        assert_eq!(config.detection.shingle_width, 5);
        assert_eq!(config.detection.hash_threshold, 60.0);
        assert_eq!(config.detection.ast_threshold, 70.0);
        assert!(config.detection.autojunk);
        assert_eq!(config.detection.language, "python");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:8080"]);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[detection]
shingle_width = 7
ast_threshold = 80.0

[server]
port = 9000
"#;
        let config: SleuthConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.detection.shingle_width, 7);
        assert_eq!(config.detection.ast_threshold, 80.0);
        assert_eq!(config.server.port, 9000);
        // Defaults for unspecified fields
        assert_eq!(config.detection.hash_threshold, 60.0);
        assert_eq!(config.server.timeout_secs, 30);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let config = SleuthConfig::load(Path::new("/nonexistent/path")).unwrap();
        assert_eq!(config.detection.shingle_width, 5);
    }

    #[test]
    fn test_validate_rejects_zero_width() {
        let config = DetectionConfig {
            shingle_width: 0,
            ..DetectionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_threshold() {
        let config = DetectionConfig {
            hash_threshold: 120.0,
            ..DetectionConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("hash_threshold"));
    }

    #[test]
    fn test_load_lowercases_language() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".sleuth");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.toml"),
            r#"
[detection]
language = "Rust"
"#,
        )
        .unwrap();

        let config = SleuthConfig::load(tmp.path()).unwrap();
        assert_eq!(config.detection.language, "rust");
    }
}
