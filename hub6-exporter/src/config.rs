//! Configuration for the Hub 6 exporter.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] json5::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Complete exporter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Hub connection settings.
    #[serde(default)]
    pub hub: HubConfig,

    /// HTTP endpoint settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hub connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Address of the hub served at the metrics path (default: "192.168.100.1").
    #[serde(default = "default_address")]
    pub address: String,

    /// Timeout for each HTTP request to the hub (default: [`hub6_client::DEFAULT_TIMEOUT`]).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_address() -> String {
    "192.168.100.1".to_string()
}

fn default_timeout_secs() -> u64 {
    hub6_client::DEFAULT_TIMEOUT.as_secs()
}

impl HubConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on (default: "0.0.0.0:9188").
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Path scraping the configured hub (default: "/metrics").
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,

    /// Path scraping the hub named by the `target` query parameter (default: "/probe").
    #[serde(default = "default_probe_path")]
    pub probe_path: String,
}

fn default_listen() -> String {
    "0.0.0.0:9188".to_string()
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_probe_path() -> String {
    "/probe".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_path: default_metrics_path(),
            probe_path: default_probe_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
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

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl ExporterConfig {
    /// Load configuration from a JSON5 file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON5 string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: ExporterConfig = json5::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hub.address.trim().is_empty() {
            return Err(ConfigError::Validation(
                "hub address must not be empty".to_string(),
            ));
        }

        if self.hub.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs must be > 0".to_string(),
            ));
        }

        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Invalid log level: {}",
                self.logging.level
            )));
        }

        if self.server.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Invalid listen address: {}",
                self.server.listen
            )));
        }

        for path in [&self.server.metrics_path, &self.server.probe_path] {
            if !path.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "Path must start with /: {}",
                    path
                )));
            }
        }

        if self.server.metrics_path == self.server.probe_path {
            return Err(ConfigError::Validation(
                "metrics_path and probe_path must differ".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config = ExporterConfig::parse("{}").unwrap();

        assert_eq!(config.hub.address, "192.168.100.1");
        assert_eq!(config.hub.timeout(), Duration::from_secs(5));
        assert_eq!(config.hub.timeout(), hub6_client::DEFAULT_TIMEOUT);
        assert_eq!(config.server.listen, "0.0.0.0:9188");
        assert_eq!(config.server.metrics_path, "/metrics");
        assert_eq!(config.server.probe_path, "/probe");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            // JSON5 allows comments
            hub: {
                address: "10.0.0.1:8080",
                timeout_secs: 2,
            },
            server: {
                listen: "127.0.0.1:9999",
                metrics_path: "/hub/metrics",
                probe_path: "/hub/probe",
            },
            logging: {
                level: "debug",
                format: "json",
            },
        }"#;

        let config = ExporterConfig::parse(json).unwrap();

        assert_eq!(config.hub.address, "10.0.0.1:8080");
        assert_eq!(config.hub.timeout_secs, 2);
        assert_eq!(config.server.listen, "127.0.0.1:9999");
        assert_eq!(config.server.metrics_path, "/hub/metrics");
        assert_eq!(config.server.probe_path, "/hub/probe");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validate_invalid_listen() {
        let result = ExporterConfig::parse(r#"{ server: { listen: "not-an-address" } }"#);

        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid listen address")
        );
    }

    #[test]
    fn test_validate_invalid_path() {
        let result = ExporterConfig::parse(r#"{ server: { metrics_path: "metrics" } }"#);

        assert!(result.unwrap_err().to_string().contains("must start with /"));
    }

    #[test]
    fn test_validate_same_paths() {
        let result = ExporterConfig::parse(r#"{ server: { probe_path: "/metrics" } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let result = ExporterConfig::parse(r#"{ hub: { timeout_secs: 0 } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_empty_address() {
        let result = ExporterConfig::parse(r#"{ hub: { address: " " } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_log_level() {
        let result = ExporterConfig::parse(r#"{ logging: { level: "verbose" } }"#);
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));

        let config = ExporterConfig::parse(r#"{ logging: { level: "WARN" } }"#).unwrap();
        assert_eq!(config.logging.level, "WARN");
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ hub: {{ address: "192.168.0.1" }} }}"#).unwrap();

        let config = ExporterConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.hub.address, "192.168.0.1");
    }

    #[test]
    fn test_load_missing_file() {
        let result = ExporterConfig::load_from_file("/nonexistent/hub6.json5");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
