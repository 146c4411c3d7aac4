use serde::Deserialize;
use std::collections::HashMap;

use crate::config::parameters::GenericParameterValue;
use crate::config::settings::SettingsConfig;

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServiceConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub node: NodeConfig,
}

/// ================================
/// Node instance
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct NodeConfig {
    #[serde(default)]
    pub continue_on_fail: bool,
    pub icon: Option<String>,
    /// declare an (empty) credentials list in the descriptor
    #[serde(default)]
    pub declare_credentials: bool,
    /// node-level parameter values, e.g. app_id / app_secret
    #[serde(default)]
    pub parameters: HashMap<String, GenericParameterValue>,
}
