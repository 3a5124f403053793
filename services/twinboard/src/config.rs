//! Configuration types for the twinboard service

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable consulted when no access token is configured
pub const ACCESS_TOKEN_ENV: &str = "TWINBOARD_ACCESS_TOKEN";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub twin_store: TwinStoreConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Fill in secrets that are not stored in the config file.
    ///
    /// A missing access token is taken from `TWINBOARD_ACCESS_TOKEN`. An
    /// explicitly empty token is rejected.
    pub fn resolve_secrets(&mut self) -> crate::Result<()> {
        match &self.twin_store.access_token {
            Some(token) if token.trim().is_empty() => Err(crate::TwinboardError::Config(
                "twin_store.access_token is empty".to_string(),
            )),
            Some(_) => Ok(()),
            None => {
                if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
                    tracing::debug!("Using access token from {}", ACCESS_TOKEN_ENV);
                    self.twin_store.access_token = Some(token);
                } else {
                    tracing::warn!(
                        "No access token configured; requests to the twin store are unauthenticated"
                    );
                }
                Ok(())
            }
        }
    }
}

/// Connection settings for the remote digital twins store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwinStoreConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Default for TwinStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_version: default_api_version(),
            access_token: None,
        }
    }
}

/// Model identifiers used to select twins for each page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_floor_model")]
    pub floor: String,
    #[serde(default = "default_room_model")]
    pub room: String,
    #[serde(default = "default_device_model")]
    pub device: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            floor: default_floor_model(),
            room: default_room_model(),
            device: default_device_model(),
        }
    }
}

/// Web server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_server_port(),
        }
    }
}

fn default_endpoint() -> String {
    "https://localhost".to_string()
}

fn default_api_version() -> String {
    "2020-10-31".to_string()
}

fn default_floor_model() -> String {
    "dtmi:com:hellem:dtsample:floor;1".to_string()
}

fn default_room_model() -> String {
    "dtmi:com:hellem:dtsample:room;1".to_string()
}

fn default_device_model() -> String {
    "dtmi:com:hellem:dtsample:device;1".to_string()
}

fn default_true() -> bool {
    true
}

fn default_server_port() -> u16 {
    11120
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::TwinboardError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
