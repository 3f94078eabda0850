//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::ClientConfig;
use crate::explorer::ExplorerConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub explorer: ExplorerSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// Dataset browser settings
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerSettings {
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u64,
}

fn default_page_size() -> u32 {
    15
}

fn default_search_debounce() -> u64 {
    500
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce(),
        }
    }
}

impl ExplorerSettings {
    pub fn explorer_config(&self) -> ExplorerConfig {
        ExplorerConfig {
            page_size: self.page_size.max(1),
            search_delay: Duration::from_millis(self.search_debounce_ms),
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
    "warn".to_string()
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
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

    /// Default config file locations, most specific first
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("vgdss").join("config.toml")),
            Some(PathBuf::from("/etc/vgdss/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment
    ///
    /// Returns the config plus the file it came from. Runs before logging
    /// is initialised, so problems are reported to the caller instead.
    pub fn load_default() -> (Self, Option<PathBuf>, Vec<ConfigError>) {
        let mut errors = Vec::new();

        for path in Self::default_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => return (config, Some(path), errors),
                    Err(e) => errors.push(e),
                }
            }
        }

        (Self::from_env(), None, errors)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // API overrides
        if let Ok(url) = std::env::var("VGDSS_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(timeout) = std::env::var("VGDSS_REQUEST_TIMEOUT_MS") {
            if let Ok(t) = timeout.parse() {
                self.api.request_timeout_ms = t;
            }
        }

        // Explorer overrides
        if let Ok(size) = std::env::var("VGDSS_PAGE_SIZE") {
            if let Ok(s) = size.parse() {
                self.explorer.page_size = s;
            }
        }
        if let Ok(delay) = std::env::var("VGDSS_SEARCH_DEBOUNCE_MS") {
            if let Ok(d) = delay.parse() {
                self.explorer.search_debounce_ms = d;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("VGDSS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("VGDSS_LOG_FORMAT") {
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
    r#"# vgdss Configuration
#
# Environment variables override these settings:
# - VGDSS_API_URL
# - VGDSS_REQUEST_TIMEOUT_MS
# - VGDSS_PAGE_SIZE
# - VGDSS_SEARCH_DEBOUNCE_MS
# - VGDSS_LOG_LEVEL
# - VGDSS_LOG_FORMAT

[api]
# Decision-support backend URL
base_url = "http://localhost:5000"

# Request timeout in milliseconds
request_timeout_ms = 10000

[explorer]
# Rows per page in the games table
page_size = 15

# Quiet period before a search is sent (ms)
search_debounce_ms = 500

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.explorer.page_size, 15);
        assert_eq!(config.explorer.search_debounce_ms, 500);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, default_base_url());
        assert_eq!(config.api.request_timeout_ms, 10_000);
        assert_eq!(config.explorer.page_size, 15);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[explorer]\npage_size = 25").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.explorer.page_size, 25);
        assert_eq!(config.explorer.search_debounce_ms, 500);
        assert_eq!(config.api.base_url, "http://localhost:5000");

        let explorer = config.explorer.explorer_config();
        assert_eq!(explorer.page_size, 25);
        assert_eq!(explorer.search_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let settings = ExplorerSettings {
            page_size: 0,
            search_debounce_ms: 10,
        };
        assert_eq!(settings.explorer_config().page_size, 1);
    }
}
