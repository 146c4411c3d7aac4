// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use crate::node::error::RequestFailure;
use crate::node::items::InputItem;
use crate::node::{ItemParameters, NodeDescription};
use crate::sources::fetch::FetchJson;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Items carrying their own credentials, e.g. `[("cli_a", "s_a")]`.
pub fn credential_items(pairs: &[(&str, &str)]) -> Vec<InputItem> {
    pairs
        .iter()
        .map(|(app_id, app_secret)| {
            InputItem::from_value(json!({"app_id": app_id, "app_secret": app_secret})).unwrap()
        })
        .collect()
}

pub fn item_parameters<'a>(
    items: &'a [InputItem],
    node_values: &'a HashMap<String, String>,
    description: &'a NodeDescription,
) -> ItemParameters<'a> {
    ItemParameters::new(items, node_values, description)
}

type Responder = dyn Fn(&Value) -> Result<Value, RequestFailure> + Send + Sync;

/// In-memory `FetchJson` recording every (url, body) it is asked to send.
#[derive(Clone)]
pub struct RecordingFetcher {
    pub calls: Arc<Mutex<Vec<(String, Value)>>>,
    respond: Arc<Responder>,
}

impl RecordingFetcher {
    pub fn new(respond: impl Fn(&Value) -> Result<Value, RequestFailure> + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            respond: Arc::new(respond),
        }
    }

    /// Answers every call with a token derived from the app id.
    pub fn issuing_tokens() -> Self {
        Self::new(|body| {
            Ok(json!({
                "code": 0,
                "msg": "ok",
                "tenant_access_token": format!("t-{}", body["app_id"].as_str().unwrap_or_default()),
                "expire": 7200
            }))
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.calls.lock().unwrap().iter().map(|(_, body)| body.clone()).collect()
    }
}

impl FetchJson for RecordingFetcher {
    async fn post_json<B>(&self, url: &str, body: &B) -> Result<Value, RequestFailure>
    where
        B: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(|e| RequestFailure::MalformedBody(e.to_string()))?;
        self.calls.lock().unwrap().push((url.to_owned(), body.clone()));
        (self.respond)(&body)
    }
}
