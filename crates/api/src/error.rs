// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module
//!
//! This module provides the server error types and their mapping onto the JSON
//! error envelope returned to clients. Validation failures carry field-level
//! details; every other failure is reported with one generic message while the
//! underlying cause is only logged.

use std::net::SocketAddr;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use market_service::MarketServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::validation::ValidationErrors;

/// Message of every 400 response
pub const VALIDATION_ERROR_MESSAGE: &str = "Validation error";

/// Message of every 500 response
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected error occurred";

/// Message of 404 responses for unknown routes
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Comprehensive error types for server operations
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Network binding errors
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        /// Socket address that failed to bind
        address: SocketAddr,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server startup errors
    #[error("Server startup failed: {source}")]
    Startup {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server shutdown errors
    #[error("Server shutdown failed: {source}")]
    Shutdown {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Task join errors for async operations
    #[error("Task join error: {source}")]
    TaskJoin {
        /// Underlying tokio join error
        #[source]
        source: tokio::task::JoinError,
    },

    /// Request parameters failed validation
    #[error("Validation error")]
    Validation(ValidationErrors),

    /// A metric query failed
    #[error("Market service error: {0}")]
    Service(#[from] MarketServiceError),
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable summary
    pub message: String,
    /// Field-level validation details, only present on 400 responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ValidationErrors>,
}

impl ErrorResponse {
    /// Envelope for rejected request parameters
    pub fn validation(details: ValidationErrors) -> Self {
        Self {
            message: VALIDATION_ERROR_MESSAGE.to_string(),
            details: Some(details),
        }
    }

    /// Envelope for server faults; never carries details
    pub fn unexpected() -> Self {
        Self {
            message: UNEXPECTED_ERROR_MESSAGE.to_string(),
            details: None,
        }
    }

    /// Envelope for unknown routes
    pub fn not_found() -> Self {
        Self {
            message: NOT_FOUND_MESSAGE.to_string(),
            details: None,
        }
    }
}

/// The generic 500 response
pub fn unexpected_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::unexpected()),
    )
        .into_response()
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::validation(details)),
            )
                .into_response(),
            ServerError::Service(err) => {
                // Shape drift and database failures look the same to the client
                error!(error_kind = err.kind(), error = %err, "market metric query failed");
                unexpected_error_response()
            }
            other => {
                error!(error = %other, "request failed with server error");
                unexpected_error_response()
            }
        }
    }
}

/// Convenient From implementations for common async error types
impl From<tokio::task::JoinError> for ServerError {
    fn from(source: tokio::task::JoinError) -> Self {
        Self::TaskJoin { source }
    }
}
