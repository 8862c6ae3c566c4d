use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub mongo: MongoConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Budget for the store work of a single request
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 10,
            shutdown_timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub courses_collection: String,
    pub connect_timeout_secs: u64,
    pub ping_timeout_secs: u64,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "edtech".to_string(),
            courses_collection: "courses".to_string(),
            connect_timeout_secs: 10,
            ping_timeout_secs: 2,
        }
    }
}

impl AppConfig {
    /// Load from a YAML file when one exists at `path`, then apply
    /// environment overrides. A missing file just means defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = if path.exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };
        Ok(config.with_overrides(|key| env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Apply overrides from `lookup` (the process environment in production).
    /// Values that fail to parse keep the current setting.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Server overrides
        if let Some(v) = lookup("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("SERVER_PORT").or_else(|| lookup("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Some(v) = lookup("REQUEST_TIMEOUT_SECS") {
            self.server.request_timeout_secs = v.parse().unwrap_or(self.server.request_timeout_secs);
        }
        if let Some(v) = lookup("SHUTDOWN_TIMEOUT_SECS") {
            self.server.shutdown_timeout_secs = v.parse().unwrap_or(self.server.shutdown_timeout_secs);
        }

        // Mongo overrides
        if let Some(v) = lookup("MONGO_URI") {
            self.mongo.uri = v;
        }
        if let Some(v) = lookup("MONGO_DATABASE") {
            self.mongo.database = v;
        }
        if let Some(v) = lookup("MONGO_COURSES_COLLECTION") {
            self.mongo.courses_collection = v;
        }
        if let Some(v) = lookup("MONGO_CONNECT_TIMEOUT_SECS") {
            self.mongo.connect_timeout_secs = v.parse().unwrap_or(self.mongo.connect_timeout_secs);
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.mongo.uri, "mongodb://localhost:27017");
        assert_eq!(config.mongo.database, "edtech");
        assert_eq!(config.mongo.courses_collection, "courses");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml(
            "server:\n  port: 9090\nmongo:\n  uri: mongodb://db:27017\n",
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.shutdown_timeout_secs, 10);
        assert_eq!(config.mongo.uri, "mongodb://db:27017");
        assert_eq!(config.mongo.database, "edtech");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PORT", "7000"),
            ("MONGO_DATABASE", "school"),
            ("REQUEST_TIMEOUT_SECS", "not-a-number"),
        ]);
        let config = AppConfig::default().with_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.mongo.database, "school");
        assert_eq!(config.server.request_timeout_secs, 10);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mongo:\n  courses_collection: catalogue").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.mongo.courses_collection, "catalogue");
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server: [unclosed").unwrap();

        assert!(matches!(AppConfig::from_file(file.path()), Err(ConfigError::Parse { .. })));
    }
}
