// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Routes module
//!
//! This module provides route configuration and handlers for the market metrics server.

pub mod handlers;

use axum::{Router, routing::get};
use handlers::{
    health_handler, market_liquidity_by_market_id_handler, market_liquidity_handler,
    market_tvl_by_market_id_handler, market_tvl_handler,
};
use market_service::MarketService;

use crate::{
    metrics::metrics_handler, middleware::not_found_handler, openapi::openapi_spec,
    state::ServerState,
};

/// Create application routes
pub fn create_routes<M: MarketService + 'static>() -> Router<ServerState<M>> {
    let health_routes = Router::new().route("/", get(health_handler::<M>));

    let docs_routes = Router::new()
        .route("/api-doc/openapi.json", get(openapi_spec))
        .route("/metrics", get(metrics_handler));

    let market_routes = Router::new()
        .route("/tvl", get(market_tvl_handler::<M>))
        .route("/tvl/{marketId}", get(market_tvl_by_market_id_handler::<M>))
        .route("/liquidity", get(market_liquidity_handler::<M>))
        .route(
            "/liquidity/{marketId}",
            get(market_liquidity_by_market_id_handler::<M>),
        );

    Router::new()
        .merge(health_routes)
        .merge(docs_routes)
        .merge(market_routes)
        .fallback(not_found_handler)
}
