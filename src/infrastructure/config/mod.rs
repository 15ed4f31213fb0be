use crate::domain::error::{AppError, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Server configuration: defaults, overridden by `chemviz.toml`, overridden
/// by `CHEMVIZ_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    /// How many of the most recent datasets the retention sweep keeps.
    pub retention_keep: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            database_path: "chemviz.db".to_string(),
            retention_keep: 5,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("chemviz.toml"))
            .merge(Env::prefixed("CHEMVIZ_"))
            .extract()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))
    }

    pub fn database_url(&self) -> String {
        format!("sqlite://{}", self.database_path.replace('\\', "/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.retention_keep, 5);
    }

    #[test]
    fn test_database_url_normalizes_separators() {
        let config = AppConfig {
            database_path: "data\\chemviz.db".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.database_url(), "sqlite://data/chemviz.db");
    }
}
