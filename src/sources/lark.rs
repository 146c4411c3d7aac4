use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Read-only view over a tenant_access_token response.
/// Used for logs and metrics only; the body itself is forwarded untouched.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TenantAccessToken {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub tenant_access_token: Option<String>,
    /// seconds until expiration
    pub expire: Option<i64>,
}

impl TenantAccessToken {
    pub fn from_response(body: &Value) -> Option<Self> {
        serde_json::from_value(body.clone()).ok()
    }

    /// Lark reports business errors with HTTP 200 and a non-zero code.
    pub fn is_ok(&self) -> bool {
        self.code == 0 && self.tenant_access_token.is_some()
    }

    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.expire
            .filter(|seconds| *seconds >= 0)
            .and_then(TimeDelta::try_seconds)
            .map(|ttl| now + ttl)
    }
}
