// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics module
//!
//! Provides global metrics using the default Prometheus registry via macros and
//! an Axum-compatible metrics handler.

use std::sync::LazyLock;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use prometheus::{
    Encoder, HistogramVec, IntCounterVec, TextEncoder, register_histogram_vec,
    register_int_counter_vec,
};
use tracing::error;

use crate::error::unexpected_error_response;

/// Which figure a request asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Total value locked
    Tvl,
    /// Supplied minus borrowed
    Liquidity,
}

impl Metric {
    /// Label value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tvl => "tvl",
            Self::Liquidity => "liquidity",
        }
    }
}

/// Whether a request covered many markets or one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Sum over every market matching the filter
    Aggregate,
    /// A single market by id
    Market,
}

impl Scope {
    /// Label value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aggregate => "aggregate",
            Self::Market => "market",
        }
    }
}

/// Total number of metric requests, labeled by metric, scope and outcome.
pub static METRIC_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "market_api_requests_total",
        "Total number of metric requests, labeled by metric, scope and outcome",
        &["metric", "scope", "outcome"]
    )
    .expect("Failed to create market_api_requests_total counter vec")
});

/// Histogram for metric query durations in seconds.
pub static QUERY_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "market_api_query_duration_seconds",
        "Metric query durations in seconds",
        &["metric", "scope", "result"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to create market_api_query_duration_seconds histogram")
});

/// Count one metric request
///
/// # Arguments
/// * `metric` - The figure requested
/// * `scope` - Aggregate or single market
/// * `outcome` - `ok`, `validation_error`, or the service error kind
pub fn inc_metric_requests(metric: Metric, scope: Scope, outcome: &str) {
    METRIC_REQUESTS
        .with_label_values(&[metric.as_str(), scope.as_str(), outcome])
        .inc();
}

/// Observe the duration of one metric query
pub fn observe_query_duration(metric: Metric, scope: Scope, result: &str, duration_secs: f64) {
    QUERY_DURATION
        .with_label_values(&[metric.as_str(), scope.as_str(), result])
        .observe(duration_secs);
}

/// Axum handler that exports metrics in Prometheus text format
pub async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %err, "failed to encode metrics");
        return unexpected_error_response();
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    #[tokio::test]
    async fn exported_text_contains_recorded_requests() {
        inc_metric_requests(Metric::Liquidity, Scope::Market, "ok");
        observe_query_duration(Metric::Liquidity, Scope::Market, "ok", 0.002);

        let response = metrics_handler().await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let text = String::from_utf8(body.to_vec()).expect("utf-8 metrics");
        assert!(text.contains("market_api_requests_total"));
        assert!(text.contains("market_api_query_duration_seconds"));
    }

    #[test]
    fn label_values() {
        assert_eq!(Metric::Tvl.as_str(), "tvl");
        assert_eq!(Metric::Liquidity.as_str(), "liquidity");
        assert_eq!(Scope::Aggregate.as_str(), "aggregate");
        assert_eq!(Scope::Market.as_str(), "market");
    }
}
