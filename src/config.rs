use std::path::PathBuf;

use config::{Config, Environment, File};
pub use config::ConfigError;
use serde::Deserialize;

use crate::panel::FormInput;

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    /// Backend endpoints
    #[serde(default)]
    pub backend: BackendConfig,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
    /// Initial form values
    #[serde(default)]
    pub form: FormConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Backend root (default http://127.0.0.1:5000)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path the form is posted to
    #[serde(default = "default_submit_path")]
    pub submit_path: String,
    /// Path order history is fetched from
    #[serde(default = "default_history_path")]
    pub history_path: String,
}

impl BackendConfig {
    /// Default paths against a different root
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            submit_path: default_submit_path(),
            history_path: default_history_path(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_submit_path() -> String {
    "/submit".to_string()
}

fn default_history_path() -> String {
    "/order_history".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Also append log lines to this file
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Form values used when the command line leaves a field out
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FormConfig {
    #[serde(default)]
    pub price_range_low: String,
    #[serde(default)]
    pub price_range_high: String,
    #[serde(default)]
    pub number_of_grids: String,
    #[serde(default)]
    pub margin: String,
}

impl From<&FormConfig> for FormInput {
    fn from(form: &FormConfig) -> Self {
        FormInput::new(
            form.price_range_low.as_str(),
            form.price_range_high.as_str(),
            form.number_of_grids.as_str(),
            form.margin.as_str(),
        )
    }
}

impl Settings {
    /// Load settings from an optional configuration file
    pub fn new(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path));
        }

        let s = builder
            // Environment variables override the file
            // e.g. PANEL_BACKEND__BASE_URL=http://10.0.0.2:5000
            .add_source(Environment::with_prefix("PANEL").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
