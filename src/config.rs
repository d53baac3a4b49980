//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

fn default_addr() -> String {
    "127.0.0.1:5555".to_string()
}

/// Application configuration
///
/// Loaded from a YAML file or from the environment; environment variables
/// win when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Socket address the server binds to
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Database connection URL.
    ///
    /// When unset (or when the `sqlite` feature is disabled) the in-memory
    /// store is used.
    #[serde(default)]
    pub database_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            database_url: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Build configuration from the environment, starting from defaults.
    ///
    /// Recognized variables: `HEROES_API_ADDR`, `DATABASE_URL` (with `DB_URI`
    /// accepted as a legacy spelling).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = std::env::var("HEROES_API_ADDR") {
            config.addr = addr;
        }
        if let Ok(url) = std::env::var("DATABASE_URL").or_else(|_| std::env::var("DB_URI")) {
            config.database_url = Some(url);
        }
        config
    }
}
