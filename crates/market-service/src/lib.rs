// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Market metric queries
//!
//! This crate turns metric requests into SQL against the `market` table and
//! turns the single aggregate row that comes back into typed [`Cents`].
//!
//! # Architecture
//!
//! - **Query Builder**: [`query`] - pure functions producing SQL text and ordered bind parameters
//! - **Service**: [`service::MarketService`] - the capability the HTTP layer depends on, with
//!   [`service::SqlMarketService`] as the MySQL implementation
//! - **Result Shape**: [`shape`] - validates that a result row carries the expected numeric column
//! - **Errors**: [`error::MarketServiceError`] - separates result-shape drift from database failures
//!
//! [`Cents`]: shared_types::Cents

pub mod error;
pub mod query;
pub mod service;
pub mod shape;

pub use error::{MarketServiceError, MarketServiceResult};
pub use query::{BuiltQuery, MarketFilter, QueryParam, build_liquidity_query, build_tvl_query};
pub use service::{MarketLiquidity, MarketService, MarketTvl, SqlMarketService};
