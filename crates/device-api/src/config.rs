//! Server configuration

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// Environment variable prefix, e.g. `DEVICE_API_PORT=8080`
pub const ENV_PREFIX: &str = "DEVICE_API";

/// Optional config file name (any format the `config` crate understands)
pub const CONFIG_FILE: &str = "device-api";

/// Running mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Verbose logging plus per-request tracing
    Debug,
    /// INFO level, JSON formatted logs
    Prod,
}

/// Host configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Running mode
    pub mode: Mode,
    /// Populate the store with demo switches at startup
    pub seed_devices: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            mode: Mode::Debug,
            seed_devices: false,
        }
    }
}

impl ServerConfig {
    /// Load defaults, then the optional config file, then the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Self::default();
        let mode = match defaults.mode {
            Mode::Debug => "debug",
            Mode::Prod => "prod",
        };

        Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("mode", mode)?
            .set_default("seed_devices", defaults.seed_devices)
    }

    /// Socket address string for the listener
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
