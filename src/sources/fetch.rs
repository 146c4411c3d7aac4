//! Outbound JSON requests
//!
//! The host's HTTP helper: serialize a body, POST it, parse the JSON answer.

use anyhow::Result;
use http::header::ACCEPT;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::error::Error as StdError;
use std::time::Duration;

use crate::config::settings::RequestConfig;
use crate::node::error::RequestFailure;

pub trait FetchJson {
    fn post_json<B>(
        &self,
        url: &str,
        body: &B,
    ) -> impl std::future::Future<Output = Result<Value, RequestFailure>> + Send
    where
        B: Serialize + Sync + ?Sized;
}

impl FetchJson for Client {
    async fn post_json<B>(&self, url: &str, body: &B) -> Result<Value, RequestFailure>
    where
        B: Serialize + Sync + ?Sized,
    {
        let response = self
            .post(url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| RequestFailure::Transport(error_chain(&err)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| RequestFailure::Transport(error_chain(&err)))?;

        if !status.is_success() {
            return Err(RequestFailure::from_status(status, &text));
        }
        serde_json::from_str(&text).map_err(|err| RequestFailure::MalformedBody(err.to_string()))
    }
}

/// Build the shared client. No timeout unless configured.
pub fn build_client(request: &RequestConfig) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout_ms) = request.timeout_ms {
        builder = builder.timeout(Duration::from_millis(timeout_ms));
    }
    Ok(builder.build()?)
}

// reqwest hides the root cause behind "error sending request"
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
