//! Node-level error types.

use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// A failed token request. Every variant collapses to a single message string
/// when written into an output item.
#[derive(Debug, Error)]
pub enum RequestFailure {
    /// Connection, DNS, TLS or timeout failure.
    #[error("{0}")]
    Transport(String),

    /// Upstream answered with a non-2xx status.
    #[error("Request failed with status code {}{}", .status.as_u16(), upstream_suffix(.detail))]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },

    /// Response body is not valid JSON.
    #[error("Invalid JSON in response body: {0}")]
    MalformedBody(String),
}

impl RequestFailure {
    /// Build a `Status` failure, pulling the upstream message out of the body:
    /// `msg` (Lark) or `message`, otherwise the raw body text.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let body = body.trim();
        let detail = match serde_json::from_str::<Value>(body) {
            Ok(json) => ["msg", "message"]
                .iter()
                .find_map(|key| json.get(*key).and_then(Value::as_str))
                .map(str::to_owned)
                .or_else(|| (!body.is_empty()).then(|| body.to_owned())),
            Err(_) => (!body.is_empty()).then(|| body.to_owned()),
        };
        RequestFailure::Status { status, detail }
    }

    /// Metrics label.
    pub fn reason(&self) -> &'static str {
        match self {
            RequestFailure::Transport(_) => "transport",
            RequestFailure::Status { .. } => "status",
            RequestFailure::MalformedBody(_) => "malformed_body",
        }
    }
}

fn upstream_suffix(detail: &Option<String>) -> String {
    detail
        .as_ref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

/// The host's parameter accessor could not produce a string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("Could not get parameter '{name}' for item {item_index}: value is not a string")]
    NotAString { name: String, item_index: usize },

    #[error("Could not get parameter '{name}': no item at index {item_index}")]
    NoSuchItem { name: String, item_index: usize },
}

/// Anything that can go wrong while handling one item.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Request(#[from] RequestFailure),
}

impl ItemError {
    pub fn reason(&self) -> &'static str {
        match self {
            ItemError::Parameter(_) => "parameter",
            ItemError::Request(failure) => failure.reason(),
        }
    }
}

/// Fatal error surfaced to the host when continue-on-fail is off.
/// Carries the node identity so the host can attribute the failure.
#[derive(Debug, Error)]
#[error("{node_name}: {source} (item {item_index})")]
pub struct NodeApiError {
    pub node_name: String,
    pub node_type: String,
    pub item_index: usize,
    #[source]
    pub source: ItemError,
}
