//! Service configuration
//!
//! Layered loading: YAML file first, then `HOMESRV__` environment
//! overrides. Every field has a default so the service starts with no
//! config file at all.

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Default config file path, overridable via `HOMESRV_CONFIG`
const DEFAULT_CONFIG_PATH: &str = "config/homesrv.yaml";

/// Service section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_ping_message")]
    pub ping_message: String,
}

fn default_service_name() -> String {
    crate::SERVICE_NAME.to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_ping_message() -> String {
    "ping".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            port: default_port(),
            ping_message: default_ping_message(),
        }
    }
}

/// Storage section: account database, mock dataset and local profile paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_database_path")]
    pub database: String,
    #[serde(default = "default_dataset_path")]
    pub dataset: String,
    #[serde(default = "default_profile_path")]
    pub profile: String,
}

fn default_database_path() -> String {
    "data/homeguard.db".to_string()
}

fn default_dataset_path() -> String {
    "data/db.json".to_string()
}

fn default_profile_path() -> String {
    "data/profile.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            dataset: default_dataset_path(),
            profile: default_profile_path(),
        }
    }
}

/// Property lookup upstream section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttomConfig {
    /// Upstream API key; without one every lookup falls back to mock details
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_attom_base_url")]
    pub base_url: String,
    #[serde(default = "default_attom_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_attom_base_url() -> String {
    "https://api.gateway.attomdata.com/propertyapi/v1.0.0".to_string()
}

fn default_attom_timeout_ms() -> u64 {
    5000
}

impl Default for AttomConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_attom_base_url(),
            timeout_ms: default_attom_timeout_ms(),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub attom: AttomConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let path =
            std::env::var("HOMESRV_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config: Config = Figment::new()
            .merge(Yaml::file(&path))
            .merge(Env::prefixed("HOMESRV__").split("__"))
            .extract()
            .with_context(|| format!("Failed to load configuration from {}", path))?;

        // Bare env vars honored for compatibility with existing deployments
        if config.attom.api_key.is_none() {
            config.attom.api_key = std::env::var("ATTOM_API_KEY").ok().filter(|k| !k.is_empty());
        }
        if let Ok(message) = std::env::var("PING_MESSAGE") {
            config.service.ping_message = message;
        }

        Ok(config)
    }
}
