use anyhow::Result;
use prometheus::core::Collector;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::utils::constants::METRICS_NAMESPACE;

pub const OUTCOME_SUCCESS: &str = "success";
pub const OUTCOME_CAPTURED: &str = "captured";
pub const OUTCOME_FATAL: &str = "fatal";

static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE
        .get_or_init(|| async {
            info!("Initializing Metrics ...");
            Metrics::new()
        })
        .await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    pub token_requests: IntCounterVec,
    pub token_request_failures: IntCounterVec,
    pub token_request_duration: HistogramVec,
    pub token_expiry_unix: IntGaugeVec,
    pub lark_business_errors: IntCounterVec,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some(METRICS_NAMESPACE.into()), None).expect("metrics registry");

        let metrics = Arc::new(Self {
            token_requests: IntCounterVec::new(Opts::new("token_requests_total", "Token requests by outcome"), &["outcome"]).expect("token_requests_total"),
            token_request_failures: IntCounterVec::new(Opts::new("token_request_failures_total", "Failed token requests by reason"), &["reason"]).expect("token_request_failures_total"),
            token_request_duration: HistogramVec::new(HistogramOpts::new("token_request_duration_seconds", "Token request duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]), &["app_id"]).expect("token_request_duration_seconds"),
            token_expiry_unix: IntGaugeVec::new(Opts::new("token_expiry_unix_seconds", "Issued tenant token expiry timestamp"), &["app_id"]).expect("token_expiry_unix_seconds"),
            lark_business_errors: IntCounterVec::new(Opts::new("lark_business_errors_total", "Responses with a non-zero Lark code"), &["code"]).expect("lark_business_errors_total"),
            registry,
        });

        // Register all metrics in the registry
        let collectors: Vec<Box<dyn Collector>> = vec![
            Box::new(metrics.token_requests.clone()),
            Box::new(metrics.token_request_failures.clone()),
            Box::new(metrics.token_request_duration.clone()),
            Box::new(metrics.token_expiry_unix.clone()),
            Box::new(metrics.lark_business_errors.clone()),
        ];
        for collector in collectors {
            metrics.registry.register(collector).expect("register metric");
        }

        metrics
    }

    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Write the registry for the node_exporter textfile collector (tmp -> rename).
    pub async fn write_textfile(&self, path: &Path) -> Result<()> {
        let content = self.render()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = path.with_extension("prom.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, path).await?;
        debug!("metrics written to {}", path.display());
        Ok(())
    }
}
