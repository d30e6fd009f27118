use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/node_api.json";
const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
const API_BASE_ENV: &str = "NODE_API_BASE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the local node's HTTP API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

/// Load the config file, then apply the env override.
pub fn load_config(path: &str) -> AppConfig {
    let mut config = read_config_file(path);

    if let Ok(base) = std::env::var(API_BASE_ENV) {
        if !base.trim().is_empty() {
            config.api_base = base;
        }
    }

    config.api_base = config.api_base.trim_end_matches('/').to_string();
    config
}

fn read_config_file(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_default_base() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn explicit_base_is_kept() {
        let config: AppConfig =
            serde_json::from_str(r#"{"api_base": "http://10.0.0.2:9000"}"#).unwrap();
        assert_eq!(config.api_base, "http://10.0.0.2:9000");
    }
}
