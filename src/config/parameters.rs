use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::{env, fs};

/// Where a node parameter value comes from.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum GenericParameterValue {
    Literal {
        value: String,
    },
    FromEnv {
        from_env: String,
    },
    FromFile {
        path: String,
    },
}

impl GenericParameterValue {
    /// Resolve to the concrete string. File contents are trimmed.
    pub fn resolve(&self) -> Result<String> {
        match self {
            GenericParameterValue::Literal { value } => Ok(value.to_owned()),
            GenericParameterValue::FromEnv { from_env } => env::var(from_env)
                .map_err(|err| anyhow!("env variable '{}': {}", from_env, err)),
            GenericParameterValue::FromFile { path } => fs::read_to_string(path)
                .map(|res| res.trim().to_string())
                .map_err(|err| anyhow!("file '{}': {}", path, err)),
        }
    }
}
