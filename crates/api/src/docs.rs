// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` document definition

use shared_types::Cents;
use utoipa::OpenApi;

use crate::{
    error::ErrorResponse,
    routes::handlers::{MarketLiquidityResponse, MarketTvlResponse},
    state::HealthCheck,
    validation::ValidationErrors,
};

/// `OpenAPI` document for the market metrics API
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Market Metrics API",
        description = "Total value locked and available liquidity of lending markets, in cents."
    ),
    paths(
        crate::routes::handlers::health_handler,
        crate::routes::handlers::market_tvl_handler,
        crate::routes::handlers::market_tvl_by_market_id_handler,
        crate::routes::handlers::market_liquidity_handler,
        crate::routes::handlers::market_liquidity_by_market_id_handler
    ),
    components(schemas(
        Cents,
        HealthCheck,
        MarketTvlResponse,
        MarketLiquidityResponse,
        ErrorResponse,
        ValidationErrors
    )),
    tags(
        (name = "health", description = "Service liveness"),
        (name = "metrics", description = "Market metrics in cents")
    )
)]
pub struct ApiDoc;
