use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use config::{Config, ConfigError, Environment, File};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Sent with every request, e.g. the session cookie issued by the auth service.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Layers `config/default.*`, then `path` if given, then `APP_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(File::with_name("config/default").required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Debug summary of what was loaded. Header values stay out of the log.
    /// Call once the subscriber is installed.
    pub fn log_summary(&self) {
        debug!(
            base_url = %self.api.base_url,
            headers = ?self.api.headers.keys().collect::<Vec<_>>(),
            timeout_secs = ?self.api.timeout_secs,
            log_level = %self.logging.level,
            "Loaded settings"
        );
    }
}
