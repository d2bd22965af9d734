//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, path, and status
//! - HTTP request latency histograms
//! - Invites created by event category
//! - Tracked invite views
//! - PDF exports by outcome

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, path, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests")
            .namespace("invite_card"),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace("invite_card")
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Invites created, by event category
pub static INVITES_CREATED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("invites_created_total", "Total number of invites created")
            .namespace("invite_card"),
        &["category"],
    )
    .expect("Failed to create INVITES_CREATED_TOTAL metric")
});

/// View events received (including unknown slugs)
pub static INVITE_VIEWS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("invite_views_total", "Total number of tracked invite views")
            .namespace("invite_card"),
    )
    .expect("Failed to create INVITE_VIEWS_TOTAL metric")
});

/// PDF exports, by outcome ("ok", "rejected")
pub static PDF_EXPORTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("pdf_exports_total", "Total number of PDF export requests")
            .namespace("invite_card"),
        &["outcome"],
    )
    .expect("Failed to create PDF_EXPORTS_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(INVITES_CREATED_TOTAL.clone()))
        .expect("Failed to register INVITES_CREATED_TOTAL");
    registry
        .register(Box::new(INVITE_VIEWS_TOTAL.clone()))
        .expect("Failed to register INVITE_VIEWS_TOTAL");
    registry
        .register(Box::new(PDF_EXPORTS_TOTAL.clone()))
        .expect("Failed to register PDF_EXPORTS_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status = status.to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, status.as_str()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

pub fn record_invite_created(category: &str) {
    INVITES_CREATED_TOTAL.with_label_values(&[category]).inc();
}

pub fn record_invite_view() {
    INVITE_VIEWS_TOTAL.inc();
}

pub fn record_pdf_export(outcome: &str) {
    PDF_EXPORTS_TOTAL.with_label_values(&[outcome]).inc();
}
