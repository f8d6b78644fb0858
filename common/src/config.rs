use config::{Config, ConfigError};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub stage: StageConfig,
    #[serde(default = "default_grid_config")]
    pub grid: GridConfig,
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

/// Stage roots keyed by endpoint (zone) name, e.g. `TARGET = "/TARGET/areastage"`.
#[derive(Debug, Deserialize, Clone)]
pub struct StageConfig {
    #[serde(default)]
    pub roots: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GridConfig {
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_grid_config() -> GridConfig {
    GridConfig {
        request_timeout_secs: default_request_timeout_secs(),
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_api_port() -> u16 {
    3000
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("GRIDSTAGE"));

        // Build the configuration
        let config = builder.build()?;

        // Debug log the raw stage roots before typed deserialization
        if let Ok(roots) = config.get_table("stage.roots") {
            debug!(?roots, "Loaded stage roots from configuration");
        }

        let settings: Settings = config.try_deserialize()?;

        debug!(
            roots = ?settings.stage.roots,
            timeout_secs = settings.grid.request_timeout_secs,
            "Parsed gridstage settings"
        );

        Ok(settings)
    }
}
