// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Fallback responses
//!
//! The last line of the error contract: unknown routes get a JSON 404, while a
//! handler that panics or outlives the request timeout still answers with the
//! generic 500 envelope.

use std::any::Any;

use axum::{
    BoxError, Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::error::{ErrorResponse, unexpected_error_response};

/// Router fallback for paths with no handler
pub async fn not_found_handler(uri: axum::http::Uri) -> impl IntoResponse {
    debug!(path = %uri.path(), "no route matched");
    (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found()))
}

/// Response used by `CatchPanicLayer` when a handler panics
#[allow(clippy::needless_pass_by_value)] // signature fixed by tower-http
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    error!(error_kind = "panic", panic = detail, "request handler panicked");
    unexpected_error_response()
}

/// Error handler wrapped around the request timeout layer
pub async fn handle_timeout_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        error!(error_kind = "timeout", "request timed out");
    } else {
        error!(error_kind = "middleware", error = %err, "request failed in middleware");
    }
    unexpected_error_response()
}
