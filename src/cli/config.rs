//! Service configuration
//!
//! A JSON file with serde defaults for every field; `PORT` and `MESSAGE`
//! environment variables override whatever the file says.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::Severity;

use super::errors::{CliError, CliResult};

/// Where records live while the server runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process dataset, optionally seeded from `data_file`
    #[default]
    Memory,
    /// `data_file` read and rewritten on every operation
    File,
    /// In-process document store, optionally seeded from `data_file`
    Document,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Memory => "memory",
            BackendKind::File => "file",
            BackendKind::Document => "document",
        }
    }
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Listener, CORS, greeting and static files
    #[serde(flatten)]
    pub server: HttpServerConfig,

    /// Record backend (default: memory)
    #[serde(default)]
    pub backend: BackendKind,

    /// Data file; required by the file backend, a seed for the others
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Minimum log severity (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            backend: BackendKind::default(),
            data_file: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        Ok(config)
    }

    /// Load the file (or defaults), apply environment overrides, validate
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        config.apply_overrides(
            std::env::var("PORT").ok().as_deref(),
            std::env::var("MESSAGE").ok().as_deref(),
        )?;
        config.validate()?;

        Ok(config)
    }

    /// Apply `PORT` / `MESSAGE` style overrides
    pub fn apply_overrides(&mut self, port: Option<&str>, message: Option<&str>) -> CliResult<()> {
        if let Some(port) = port.filter(|p| !p.is_empty()) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| CliError::config_error(format!("Invalid PORT: '{}'", port)))?;
        }

        if let Some(message) = message.filter(|m| !m.is_empty()) {
            self.server.message = message.to_string();
        }

        Ok(())
    }

    /// Validate field combinations serde cannot express
    pub fn validate(&self) -> CliResult<()> {
        if self.backend == BackendKind::File && self.data_file.is_none() {
            return Err(CliError::config_error(
                "data_file is required when backend is 'file'",
            ));
        }

        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }

        self.log_severity()?;

        Ok(())
    }

    /// Parsed `log_level`
    pub fn log_severity(&self) -> CliResult<Severity> {
        self.log_level.parse().map_err(CliError::config_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_config(temp_dir: &TempDir, value: serde_json::Value) -> PathBuf {
        let path = temp_dir.path().join("articles.json");
        fs::write(&path, value.to_string()).unwrap();
        path
    }

    #[test]
    fn test_config_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, json!({}));

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.log_severity().unwrap(), Severity::Info);
    }

    #[test]
    fn test_flattened_server_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            json!({
                "host": "127.0.0.1",
                "port": 8080,
                "message": "hi",
                "backend": "file",
                "data_file": "/tmp/data.json"
            }),
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.socket_addr(), "127.0.0.1:8080");
        assert_eq!(config.server.message, "hi");
        assert_eq!(config.backend, BackendKind::File);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_backend_requires_data_file() {
        let config = Config {
            backend: BackendKind::File,
            ..Default::default()
        };

        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, json!({"backend": "mongo"}));

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let config = Config {
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(Some("4000"), Some("Howdy")).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.message, "Howdy");

        config.apply_overrides(Some(""), None).unwrap();
        assert_eq!(config.server.port, 4000);

        assert!(config.apply_overrides(Some("http"), None).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::load(&temp_dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }
}
