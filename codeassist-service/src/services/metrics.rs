//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter, provides the /metrics endpoint body and
//! the generation counters recorded by the fallback chain.

use ::metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the metrics recorder.
///
/// Call once at startup before any metrics are recorded. Later calls are
/// ignored.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
            tracing::info!("Prometheus metrics initialized");
        }
        Err(e) => tracing::error!(error = %e, "Failed to install Prometheus recorder"),
    }
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Count one candidate attempt; `outcome` is `success`, `error` or `empty`.
pub fn record_attempt(model: &str, outcome: &'static str) {
    counter!(
        "genai_attempts_total",
        "model" => model.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Count a prompt for which every candidate failed.
pub fn record_exhausted() {
    counter!("genai_exhausted_total").increment(1);
}

pub fn record_provider_latency(provider: &'static str, model: &str, elapsed: Duration) {
    histogram!(
        "genai_provider_latency_seconds",
        "provider" => provider,
        "model" => model.to_string()
    )
    .record(elapsed.as_secs_f64());
}
