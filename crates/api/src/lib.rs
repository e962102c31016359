// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Market Metrics API Server Implementation
//!
//! This crate provides the HTTP server reporting total value locked and available
//! liquidity of lending markets, built with Axum on top of the `market-service` crate.
//!
//! # Module Structure
//!
//! - [`config`]: Server and database configuration with hierarchical loading
//! - [`validation`]: Request parameter validation with field-level error reports
//! - [`extractors`]: Path extractors that reject with the JSON error envelope
//! - [`error`]: Error types and the JSON error envelope
//! - [`state`]: Shared application state with cancellation token support
//! - [`server`]: Main server implementation, lifecycle, and coordinated shutdown
//! - [`routes`]: Route configuration and HTTP request handlers
//! - [`middleware`]: Not-found and panic fallbacks
//! - [`metrics`]: Prometheus request counters and query timings
//! - [`openapi`]: `OpenAPI` specification endpoint
//!
//! # Key Features
//!
//! - **Exact amounts**: cents are rendered as decimal strings, never as JSON numbers
//! - **Uniform errors**: 400 with field details for bad input, one generic 500 otherwise
//! - **Graceful Shutdown**: Coordinated termination using `CancellationToken` with a timeout
//! - **Health Monitoring**: database liveness at `/`

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;
pub mod validation;

pub use config::{DatabaseConfig, Environment, ServerConfig};
pub use error::{ErrorResponse, ServerError, ServerResult};
pub use server::{Server, ShutdownConfig};
pub use shared_types::{Cents, ChainId, MarketId};
pub use state::{HealthCheck, ServerState};
pub use validation::ValidationErrors;
