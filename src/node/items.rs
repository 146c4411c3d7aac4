use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// One item flowing into the node. Owned by the host, read-only here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputItem {
    #[serde(default)]
    pub json: Map<String, Value>,
}

impl InputItem {
    pub fn new(json: Map<String, Value>) -> Self {
        Self { json }
    }

    /// Accepts either the `{ "json": {...} }` wrapper or a bare object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(mut obj) => match (obj.len(), obj.remove("json")) {
                (1, Some(Value::Object(inner))) => Some(Self::new(inner)),
                (_, Some(other)) => {
                    obj.insert("json".to_owned(), other);
                    Some(Self::new(obj))
                }
                (_, None) => Some(Self::new(obj)),
            },
            _ => None,
        }
    }
}

/// Parse a host input batch: a JSON array of items, a single object, or nothing.
pub fn parse_items(raw: &str) -> Result<Vec<InputItem>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let values = match serde_json::from_str::<Value>(raw)? {
        Value::Array(values) => values,
        value @ Value::Object(_) => vec![value],
        other => return Err(anyhow!("input must be a JSON array of objects, got {}", other)),
    };
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            InputItem::from_value(value).ok_or_else(|| anyhow!("input item {} is not a JSON object", index))
        })
        .collect()
}

/// One item produced by the node, 1:1 with the input at the same position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputItem {
    pub json: Value,
}

impl OutputItem {
    /// Upstream body forwarded verbatim.
    pub fn success(response: Value) -> Self {
        Self { json: response }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            json: json!({ "error": message.into() }),
        }
    }

    pub fn is_error(&self) -> bool {
        self.json
            .as_object()
            .map(|obj| obj.len() == 1 && obj.get("error").is_some_and(Value::is_string))
            .unwrap_or(false)
    }
}

/// POST body for the tenant token endpoint. Built per item, dropped after the call.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct CredentialPayload {
    pub app_id: String,
    pub app_secret: String,
}

impl CredentialPayload {
    pub fn new(app_id: String, app_secret: String) -> Self {
        Self { app_id, app_secret }
    }
}

impl fmt::Debug for CredentialPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPayload")
            .field("app_id", &self.app_id)
            .field("app_secret", &"***")
            .finish()
    }
}
