//! Shared constants and invariants

/// Lark open API endpoint issuing tenant access tokens for custom (internal) apps.
pub const TENANT_ACCESS_TOKEN_URL: &str =
    "https://open.larksuite.com/open-apis/auth/v3/tenant_access_token/internal";

// Node parameter names
pub const PARAM_APP_ID: &str = "app_id";
pub const PARAM_APP_SECRET: &str = "app_secret";

pub const DEFAULT_CONFIG_PATH: &str = "lark-auth.yaml";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const METRICS_NAMESPACE: &str = "larkauth";
