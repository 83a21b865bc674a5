use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid configuration in {path}, reset to defaults; please rerun the application")]
    Reset { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub port: u16,
    pub host: String,
    pub api_key: String,
    pub allowed_origins: Vec<String>,
    pub allow_all_origins: bool,
}

impl Configuration {
    pub fn generate_default() -> Self {
        Self {
            port: 9999,
            host: "0.0.0.0".to_string(),
            api_key: Uuid::new_v4().to_string(),
            allowed_origins: vec![
                "http://localhost".to_string(),
                "http://localhost:8080".to_string(),
                "http://localhost:5173".to_string(),
            ],
            allow_all_origins: false,
        }
    }

    /// Reads the configuration at `path`, creating it with defaults when the
    /// file does not exist. A corrupt file is replaced with defaults and
    /// reported as [`ConfigError::Reset`].
    pub fn load_or_init(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No configuration at {}, generating defaults", path.display());
                let config = Self::generate_default();
                config.write(path)?;
                return Ok(config);
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Configuration at {} is invalid: {}", path.display(), e);
                Self::generate_default().write(path)?;
                Err(ConfigError::Reset {
                    path: path.to_path_buf(),
                })
            }
        }
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("rng-service-config-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let path = scratch_path();

        let config = Configuration::load_or_init(&path).unwrap();
        assert_eq!(config.port, 9999);
        assert_eq!(config.host, "0.0.0.0");
        assert!(!config.allow_all_origins);
        assert!(Uuid::parse_str(&config.api_key).is_ok());

        let reloaded = Configuration::load_or_init(&path).unwrap();
        assert_eq!(reloaded, config);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_existing_file_uses_camel_case_keys() {
        let path = scratch_path();
        fs::write(
            &path,
            r#"{"port": 8080, "host": "127.0.0.1", "apiKey": "secret",
               "allowedOrigins": ["http://example.com"], "allowAllOrigins": true}"#,
        )
        .unwrap();

        let config = Configuration::load_or_init(&path).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.allowed_origins, vec!["http://example.com"]);
        assert!(config.allow_all_origins);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_reset() {
        let path = scratch_path();
        fs::write(&path, "{ not json").unwrap();

        let result = Configuration::load_or_init(&path);
        assert!(matches!(result, Err(ConfigError::Reset { .. })));

        let config = Configuration::load_or_init(&path).unwrap();
        assert_eq!(config.port, 9999);

        fs::remove_file(&path).unwrap();
    }
}
