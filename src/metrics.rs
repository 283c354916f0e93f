//! Prometheus metrics for request counting and latency tracking.

use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, describe_counter, describe_histogram, histogram, SharedString};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::error::Result;

/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// How often histogram samples are folded into their summaries.
pub const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Install the global Prometheus recorder.
///
/// May only succeed once per process. The caller must keep upkeep running,
/// see [`spawn_upkeep`].
pub fn install_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Periodically drain buffered histogram samples so memory stays bounded
/// when `/metrics` is never scraped.
pub fn spawn_upkeep(handle: PrometheusHandle, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            handle.run_upkeep();
        }
    })
}

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests served");
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Middleware recording request count and latency per matched route.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());
    let method = req.method().to_string();

    let timer = LatencyTimer::new(METRIC_HTTP_REQUEST_LATENCY, route.clone(), method.clone());
    let response = next.run(req).await;
    drop(timer);

    counter!(
        METRIC_HTTP_REQUESTS,
        "route" => route,
        "method" => method,
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);

    response
}

/// RAII guard for timing a request.
/// Records latency with `route` and `method` labels when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
    route: SharedString,
    method: SharedString,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric and labels.
    pub fn new(metric_name: &'static str, route: String, method: String) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
            route: route.into(),
            method: method.into(),
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.elapsed_ms();
        histogram!(
            self.metric_name,
            "route" => self.route.clone(),
            "method" => self.method.clone()
        )
        .record(latency_ms);
    }
}
