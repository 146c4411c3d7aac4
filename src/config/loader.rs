use anyhow::{anyhow, Result};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error, warn};

use crate::config::settings::LoggingConfig;
use crate::config::types::ServiceConfig;
use crate::utils::constants::{PARAM_APP_ID, PARAM_APP_SECRET};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Load and validate config from YAML file.
/// A missing file yields the built-in defaults.
pub async fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        debug!("config file {} not found, using defaults", path.display());
        return parse_config(String::new()).await;
    }
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow!("read config {}: {}", path.display(), e))?;
    let expanded = expand_env_vars(&content)?;
    parse_config(expanded).await
}

pub async fn parse_config(content: String) -> Result<ServiceConfig> {
    let mut service_config: ServiceConfig = if content.trim().is_empty() {
        ServiceConfig::default()
    } else {
        serde_yaml::from_str(&content).inspect_err(|e| error!("parse config error: {}", e))?
    };

    // Apply defaults
    if service_config.settings.logging.is_none() {
        service_config.settings.logging = Some(LoggingConfig::default());
    }

    debug!("validation config ...");
    validate_service_config(&service_config).map_err(|errors| {
        anyhow!("invalid config:\n  - {}", errors.join("\n  - "))
    })?;

    Ok(service_config)
}

/// Returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    let url = &cfg.settings.request.url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!("settings.request.url '{}' must be an http(s) URL", url));
    }
    if cfg.settings.request.timeout_ms == Some(0) {
        errors.push("settings.request.timeout_ms must be > 0 when set".to_string());
    }
    if let Some(logging) = &cfg.settings.logging {
        if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' must be one of {:?}",
                logging.level, LOG_LEVELS
            ));
        }
    }
    if let Some(textfile) = &cfg.settings.metrics.textfile {
        if textfile.trim().is_empty() {
            errors.push("settings.metrics.textfile must not be empty when set".to_string());
        }
    }
    for name in cfg.node.parameters.keys() {
        if name != PARAM_APP_ID && name != PARAM_APP_SECRET {
            warn!("node.parameters['{}'] is not used by the node", name);
        }
    }

    match errors.is_empty() {
        true => Ok(()),
        false => Err(errors),
    }
}

/// Resolve node-level parameter values (literal / env / file) once.
pub fn resolve_parameters(cfg: &ServiceConfig) -> Result<HashMap<String, String>> {
    let mut resolved = HashMap::with_capacity(cfg.node.parameters.len());
    for (name, value) in &cfg.node.parameters {
        let value = value
            .resolve()
            .map_err(|e| anyhow!("node.parameters['{}']: {}", name, e))?;
        resolved.insert(name.to_owned(), value);
    }
    Ok(resolved)
}

/// `${VAR}` or `${VAR:default}`
pub fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}")?;
    Ok(re
        .replace_all(input, |caps: &regex::Captures| {
            let var = &caps[1];
            let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            std::env::var(var).unwrap_or_else(|_| default.to_string())
        })
        .to_string())
}
