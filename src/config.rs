//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Staple backend connection
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:9998".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Where the session cookie is kept between runs
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_file")]
    pub cookie_file: String,
}

fn default_cookie_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("staple").join("cookie").to_string_lossy().to_string())
        .unwrap_or_else(|| "./.staple_cookie".to_string())
}

impl SessionConfig {
    /// Cookie file path with a leading `~` expanded to the home directory
    pub fn cookie_path(&self) -> PathBuf {
        expand_home(&self.cookie_file, dirs::home_dir())
    }
}

fn expand_home(path: &str, home: Option<PathBuf>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(path),
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_file: default_cookie_file(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("staple").join("config.toml")),
            Some(PathBuf::from("/etc/staple/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("STAPLE_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = lookup("STAPLE_REQUEST_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.api.request_timeout_secs = secs;
            }
        }

        if let Some(path) = lookup("STAPLE_COOKIE_FILE") {
            self.session.cookie_file = path;
        }

        if let Some(level) = lookup("STAPLE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("STAPLE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Staple Configuration
#
# Environment variables override these settings:
# - STAPLE_API_URL
# - STAPLE_REQUEST_TIMEOUT
# - STAPLE_COOKIE_FILE
# - STAPLE_LOG_LEVEL
# - STAPLE_LOG_FORMAT

[api]
# Staple backend URL
base_url = "http://localhost:9998"

# Request timeout in seconds
request_timeout_secs = 30

[session]
# File holding the session cookie between runs (a leading ~ is the home directory)
cookie_file = "~/.local/share/staple/cookie"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{CookieFileStore, SessionStore};
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:9998");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.session.cookie_file.ends_with("cookie"));
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9998");
        assert_eq!(config.session.cookie_file, "~/.local/share/staple/cookie");
    }

    #[test]
    fn test_generated_cookie_file_lands_in_home() {
        let home = tempdir().unwrap();
        let config = Config::parse(&generate_default_config()).unwrap();

        let path = expand_home(&config.session.cookie_file, Some(home.path().to_path_buf()));
        assert!(path.is_absolute());
        assert_eq!(path, home.path().join(".local/share/staple/cookie"));

        let store = CookieFileStore::new(&path);
        store.set("jwt").unwrap();
        assert!(path.exists());
        assert!(!path.components().any(|c| c.as_os_str() == "~"));
    }

    #[test]
    fn test_expand_home() {
        let home = Some(PathBuf::from("/home/me"));
        assert_eq!(expand_home("~", home.clone()), PathBuf::from("/home/me"));
        assert_eq!(expand_home("~/cookie", home.clone()), PathBuf::from("/home/me/cookie"));
        assert_eq!(expand_home("/tmp/cookie", home.clone()), PathBuf::from("/tmp/cookie"));
        assert_eq!(expand_home("~other/cookie", home), PathBuf::from("~other/cookie"));
        assert_eq!(expand_home("~/cookie", None), PathBuf::from("~/cookie"));

        let config = SessionConfig {
            cookie_file: "~/.staple_cookie".to_string(),
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.cookie_path(), home.join(".staple_cookie"));
        }
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"https://staple.example\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "https://staple.example");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[api\nbase_url = 1").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("STAPLE_API_URL", "http://backend:9000"),
            ("STAPLE_REQUEST_TIMEOUT", "not-a-number"),
            ("STAPLE_COOKIE_FILE", "/tmp/cookie"),
            ("STAPLE_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://backend:9000");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.session.cookie_file, "/tmp/cookie");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }
}
