use crate::error::{Result, StorycheckError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

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
// TrackerConfig
// ---------------------------------------------------------------------------

/// Where issues are fetched from. The API token itself never lives in the
/// config file; `token_env` names the environment variable that holds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_token_env() -> String {
    "STORYCHECK_API_TOKEN".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            email: None,
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TrackerConfig {
    /// Read the API token from the configured environment variable.
    pub fn api_token(&self) -> Result<String> {
        match std::env::var(&self.token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(StorycheckError::MissingCredentials(format!(
                "environment variable {} is not set",
                self.token_env
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    3141
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            tracker: TrackerConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    pub fn new(base_url: impl Into<String>, email: Option<String>) -> Self {
        Self {
            tracker: TrackerConfig {
                base_url: base_url.into(),
                email,
                ..TrackerConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(StorycheckError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let tracker = &self.tracker;

        let base_url = tracker.base_url.trim();
        if base_url.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "tracker.base_url is not set".to_string(),
            });
        } else if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "tracker.base_url '{}' must start with http:// or https://",
                    tracker.base_url
                ),
            });
        } else if base_url.starts_with("http://") {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "tracker.base_url uses plain http; credentials are sent unencrypted"
                    .to_string(),
            });
        }

        if tracker.email.as_deref().map(str::trim).unwrap_or("").is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "tracker.email is not set; issue fetches will fail".to_string(),
            });
        }

        if tracker.token_env.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "tracker.token_env must name an environment variable".to_string(),
            });
        }

        if tracker.timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "tracker.timeout_secs is 0; requests will never time out".to_string(),
            });
        }

        if self.version != default_version() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("unknown config version {}", self.version),
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
    fn load_without_config_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(StorycheckError::NotInitialized)
        ));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::new(
            "https://example.atlassian.net",
            Some("dev@example.com".to_string()),
        );
        cfg.save(dir.path()).unwrap();
        assert!(dir.path().join(".storycheck/config.yaml").exists());

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.tracker.base_url, "https://example.atlassian.net");
        assert_eq!(loaded.tracker.email.as_deref(), Some("dev@example.com"));
        assert_eq!(loaded.tracker.token_env, "STORYCHECK_API_TOKEN");
        assert_eq!(loaded.server.port, 3141);
    }

    #[test]
    fn minimal_yaml_fills_defaults() {
        let cfg: Config = serde_yaml::from_str("tracker:\n  base_url: https://t.example\n").unwrap();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.tracker.timeout_secs, 30);
        assert_eq!(cfg.tracker.token_env, "STORYCHECK_API_TOKEN");
        assert!(cfg.tracker.email.is_none());
        assert_eq!(cfg.server.port, 3141);
    }

    #[test]
    fn validate_complete_config_no_warnings() {
        let cfg = Config::new("https://t.example", Some("a@b.c".to_string()));
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn validate_missing_base_url_is_error() {
        let cfg = Config::default();
        let warnings = cfg.validate();
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("base_url")));
    }

    #[test]
    fn validate_bad_scheme_is_error() {
        let cfg = Config::new("ftp://t.example", Some("a@b.c".to_string()));
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Error);
    }

    #[test]
    fn validate_plain_http_and_zero_timeout_warn() {
        let mut cfg = Config::new("http://t.example", Some("a@b.c".to_string()));
        cfg.tracker.timeout_secs = 0;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.level == WarnLevel::Warning));
    }

    #[test]
    fn api_token_reports_variable_name() {
        let tracker = TrackerConfig {
            token_env: "STORYCHECK_TEST_TOKEN_UNSET_1".to_string(),
            ..TrackerConfig::default()
        };
        let err = tracker.api_token().unwrap_err();
        assert!(err.to_string().contains("STORYCHECK_TEST_TOKEN_UNSET_1"));
    }
}
