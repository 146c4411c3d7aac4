use chrono::Utc;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::node::description::NodeDescription;
use crate::node::error::{ItemError, NodeApiError};
use crate::node::items::{CredentialPayload, InputItem, OutputItem};
use crate::node::parameters::NodeParameters;
use crate::observability::metrics::{get_metrics, OUTCOME_CAPTURED, OUTCOME_FATAL, OUTCOME_SUCCESS};
use crate::sources::fetch::FetchJson;
use crate::sources::lark::TenantAccessToken;
use crate::utils::constants::{PARAM_APP_ID, PARAM_APP_SECRET, TENANT_ACCESS_TOKEN_URL};

/// Exchanges app credentials for a tenant access token, one call per item.
#[derive(Debug, Clone)]
pub struct TokenRequester<F> {
    fetcher: F,
    url: String,
    description: NodeDescription,
}

impl<F: FetchJson> TokenRequester<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_url(fetcher, TENANT_ACCESS_TOKEN_URL)
    }

    pub fn with_url(fetcher: F, url: impl Into<String>) -> Self {
        Self {
            fetcher,
            url: url.into(),
            description: NodeDescription::lark_authentication(),
        }
    }

    pub fn with_description(mut self, description: NodeDescription) -> Self {
        self.description = description;
        self
    }

    pub fn description(&self) -> &NodeDescription {
        &self.description
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run the node over `items` sequentially, in input order.
    ///
    /// With `continue_on_fail` every item yields exactly one output item and
    /// failures become `{"error": message}`. Without it the first failure aborts
    /// the batch and nothing is returned but the error.
    pub async fn process<P>(
        &self,
        items: &[InputItem],
        params: &P,
        continue_on_fail: bool,
    ) -> Result<Vec<OutputItem>, NodeApiError>
    where
        P: NodeParameters + ?Sized,
    {
        let metrics = get_metrics().await;
        let mut output = Vec::with_capacity(items.len());
        info!("processing {} item(s), continue_on_fail: {}", items.len(), continue_on_fail);

        for item_index in 0..items.len() {
            match self.process_item(params, item_index).await {
                Ok(response) => {
                    metrics.token_requests.with_label_values(&[OUTCOME_SUCCESS]).inc();
                    output.push(OutputItem::success(response));
                }
                Err(err) if continue_on_fail => {
                    warn!("item {} failed, continuing: {}", item_index, err);
                    metrics.token_requests.with_label_values(&[OUTCOME_CAPTURED]).inc();
                    metrics.token_request_failures.with_label_values(&[err.reason()]).inc();
                    output.push(OutputItem::error(err.to_string()));
                }
                Err(err) => {
                    error!("item {} failed, aborting batch: {}", item_index, err);
                    metrics.token_requests.with_label_values(&[OUTCOME_FATAL]).inc();
                    metrics.token_request_failures.with_label_values(&[err.reason()]).inc();
                    return Err(NodeApiError {
                        node_name: self.description.display_name.clone(),
                        node_type: self.description.name.clone(),
                        item_index,
                        source: err,
                    });
                }
            }
        }

        info!("processed {} item(s)", output.len());
        Ok(output)
    }

    async fn process_item<P>(&self, params: &P, item_index: usize) -> Result<Value, ItemError>
    where
        P: NodeParameters + ?Sized,
    {
        let payload = CredentialPayload::new(
            params.get_string(PARAM_APP_ID, item_index)?,
            params.get_string(PARAM_APP_SECRET, item_index)?,
        );
        debug!("item {}: requesting tenant token with {:?}", item_index, payload);

        let start = Instant::now();
        let result = self.fetcher.post_json(&self.url, &payload).await;
        get_metrics()
            .await
            .token_request_duration
            .with_label_values(&[payload.app_id.as_str()])
            .observe(start.elapsed().as_secs_f64());

        let response = result?;
        self.observe_response(&payload.app_id, item_index, &response).await;
        Ok(response)
    }

    async fn observe_response(&self, app_id: &str, item_index: usize, response: &Value) {
        let Some(token) = TenantAccessToken::from_response(response) else {
            debug!("item {}: response is not a tenant token body", item_index);
            return;
        };
        let metrics = get_metrics().await;
        if !token.is_ok() {
            warn!("item {}: Lark returned code {}: {}", item_index, token.code, token.msg);
            metrics.lark_business_errors.with_label_values(&[token.code.to_string().as_str()]).inc();
            return;
        }
        if let Some(expires_at) = token.expires_at(Utc::now()) {
            debug!("item {}: tenant token for {} expires at {}", item_index, app_id, expires_at);
            metrics.token_expiry_unix.with_label_values(&[app_id]).set(expires_at.timestamp());
        }
    }
}
