use serde::Deserialize;

use crate::utils::constants::{DEFAULT_LOG_LEVEL, TENANT_ACCESS_TOKEN_URL};

/// ================================
/// Global service-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SettingsConfig {
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    pub logging: Option<LoggingConfig>,
}

/// Outbound token request
#[derive(Debug, Deserialize, Clone)]
pub struct RequestConfig {
    #[serde(default = "default_request_url")]
    pub url: String,
    /// unset -> reqwest client default (no timeout)
    pub timeout_ms: Option<u64>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            url: default_request_url(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MetricsConfig {
    /// node_exporter textfile collector target
    pub textfile: Option<String>,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String, // allowed: trace, debug, info, warn, error
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(default_log_level(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Compact,
}

fn default_request_url() -> String {
    TENANT_ACCESS_TOKEN_URL.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
