//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! A TOML file supplies the base settings; environment variables override it.
//! The presence of `PORT` switches the server to production behavior.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Debug mode: pretty logs and permissive CORS
    #[serde(default = "default_debug")]
    pub debug: bool,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8051
}

fn default_debug() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: default_debug(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Socket address to bind
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::Invalid {
            key: "server.host".to_string(),
            value: addr,
        })
    }
}

/// Dataset and static asset locations
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Photos, logos and icons served under `/assets`
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("assets/data")
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            assets_dir: default_assets_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::Invalid {
                key: "logging.format".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
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

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load from the first default location that exists, or the environment
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("ecofood").join("config.toml")),
            Some(PathBuf::from("/etc/ecofood/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                let config = Self::load_with_env(path)?;
                tracing::info!(path = %path.display(), "Loaded config");
                return Ok(config);
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply overrides read through `var`
    ///
    /// `PORT` selects the port and turns debug off; JSON logs then become the
    /// default unless `ECOFOOD_LOG_FORMAT` says otherwise.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(port) = var("PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT".to_string(),
                value: port.clone(),
            })?;
            self.server.debug = false;
            self.logging.format = LogFormat::Json;
        }
        if let Some(host) = var("ECOFOOD_HOST") {
            self.server.host = host;
        }
        if let Some(dir) = var("ECOFOOD_DATA_DIR") {
            self.data.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = var("ECOFOOD_ASSETS_DIR") {
            self.data.assets_dir = PathBuf::from(dir);
        }
        if let Some(level) = var("ECOFOOD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("ECOFOOD_LOG_FORMAT") {
            self.logging.format = format.parse()?;
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: String, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# EcoFoodSystems Dashboard Configuration
#
# Environment variables override these settings:
# - PORT (also switches to production: debug off, json logs)
# - ECOFOOD_HOST
# - ECOFOOD_DATA_DIR
# - ECOFOOD_ASSETS_DIR
# - ECOFOOD_LOG_LEVEL
# - ECOFOOD_LOG_FORMAT

[server]
# Host to bind
host = "0.0.0.0"

# Port to listen on
port = 8051

# Debug mode (pretty logs, permissive CORS)
debug = true

# Allowed CORS origins when debug is off
cors_origins = []

[data]
# Directory holding the dataset files
data_dir = "assets/data"

# Directory served under /assets (photos, logos, icons)
assets_dir = "assets"

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
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_debug_defaults() {
        let mut config = Config::default();
        config.apply_overrides(env(&[])).unwrap();

        assert!(config.server.debug);
        assert_eq!(config.server.port, 8051);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_port_switches_to_production() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("PORT", "10000")])).unwrap();

        assert!(!config.server.debug);
        assert_eq!(config.server.port, 10000);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_explicit_format_wins() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[("PORT", "80"), ("ECOFOOD_LOG_FORMAT", "pretty")]))
            .unwrap();
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_invalid_port() {
        let mut config = Config::default();
        assert!(matches!(
            config.apply_overrides(env(&[("PORT", "http")])),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();

        assert_eq!(config.server.port, 8051);
        assert_eq!(config.data.data_dir, PathBuf::from("assets/data"));
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\n\n[logging]\nformat = \"json\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_server_addr() {
        let server = ServerConfig::default();
        assert_eq!(server.addr().unwrap().port(), 8051);
    }
}
