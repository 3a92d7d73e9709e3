use crate::error::Result;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default file name looked up in the working directory.
pub const CONFIG_FILE: &str = "skypass.yaml";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the dashboard backend, e.g. `http://10.0.0.2:5000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// How long a timed success indicator stays up.
    #[serde(default = "default_success_display_ms")]
    pub success_display_ms: u64,
    /// Path of the bulk verification endpoint, relative to `base_url`.
    #[serde(default = "default_verify_all_path")]
    pub verify_all_path: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_success_display_ms() -> u64 {
    2000
}

fn default_verify_all_path() -> String {
    "verificar_todos".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            success_display_ms: default_success_display_ms(),
            verify_all_path: default_verify_all_path(),
        }
    }
}

impl Config {
    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let data = std::fs::read_to_string(path)?;
        if data.trim().is_empty() {
            return Ok(Config::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        match Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "base_url '{}' uses unsupported scheme '{}' (expected http or https)",
                    self.base_url,
                    url.scheme()
                ),
            }),
            Err(e) => warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("base_url '{}' is not a valid url: {e}", self.base_url),
            }),
        }

        if self.request_timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "request_timeout_secs is 0: requests will never time out".to_string(),
            });
        }

        if self.verify_all_path.trim_matches('/').trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "verify_all_path is empty".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.success_display(), Duration::from_secs(2));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "base_url: http://10.0.0.2:5000\nrequest_timeout_secs: 5\n").unwrap();

        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.base_url, "http://10.0.0.2:5000");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.verify_all_path, "verificar_todos");
    }

    #[test]
    fn empty_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn validate_flags_bad_values() {
        let cfg = Config {
            base_url: "ftp://example.com".to_string(),
            request_timeout_secs: 0,
            success_display_ms: 2000,
            verify_all_path: "/".to_string(),
        };
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 3);
        assert_eq!(
            warnings
                .iter()
                .filter(|w| w.level == WarnLevel::Error)
                .count(),
            2
        );
    }
}
