// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! This module provides the health check and the four market metric handlers.
//! Each metric handler runs the same pipeline: lift the raw request input into
//! a JSON object, validate it, call the market service once, and render the
//! amount as a decimal string.

use std::time::Instant;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use market_service::{MarketLiquidity, MarketService, MarketServiceResult, MarketTvl};
use serde::Serialize;
use serde_json::Value;
use shared_types::Cents;
use tracing::debug;
use utoipa::ToSchema;

use crate::{
    error::{ErrorResponse, ServerError},
    extractors::MarketIdSegment,
    metrics::{Metric, Scope, inc_metric_requests, observe_query_duration},
    state::{HealthCheck, ServerState},
    validation::{MarketIdPath, MetricQuery, Validate, query_input},
};

const OUTCOME_OK: &str = "ok";
const OUTCOME_VALIDATION_ERROR: &str = "validation_error";

/// Total value locked, as a decimal string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketTvlResponse {
    /// Sum of supplied principal in cents
    pub market_tvl: Cents,
}

/// Available liquidity, as a decimal string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketLiquidityResponse {
    /// Supplied minus borrowed principal in cents; negative when over-borrowed
    pub market_liquidity: Cents,
}

/// Health check endpoint handler
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    summary = "Database liveness",
    description = "Reports whether a database connection can be acquired from the pool.",
    responses(
        (status = 200, description = "Database reachable", body = HealthCheck),
        (status = 503, description = "Database unreachable", body = HealthCheck)
    )
)]
pub async fn health_handler<M: MarketService>(
    State(state): State<ServerState<M>>,
) -> impl IntoResponse {
    let health = state.health_check().await;
    let status = if health.db_alive {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health))
}

/// Total value locked across markets
///
/// # Errors
///
/// Returns `ServerError::Validation` for a bad `chain_id` and
/// `ServerError::Service` when the query fails.
#[utoipa::path(
    get,
    path = "/tvl",
    tag = "metrics",
    summary = "Total value locked",
    description = "Sums supplied principal over every market, optionally restricted to one chain.",
    params(
        ("chain_id" = Option<String>, Query, description = "Chain filter", example = "56")
    ),
    responses(
        (status = 200, description = "Total value locked in cents", body = MarketTvlResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Unexpected error", body = ErrorResponse)
    )
)]
pub async fn market_tvl_handler<M: MarketService>(
    State(state): State<ServerState<M>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<MarketTvlResponse>, ServerError> {
    let (metric, scope) = (Metric::Tvl, Scope::Aggregate);
    let query: MetricQuery = validated(&query_input(pairs), metric, scope)?;

    let MarketTvl { tvl } =
        observed(metric, scope, state.market_service().get_tvl(query.into())).await?;

    Ok(Json(MarketTvlResponse { market_tvl: tvl }))
}

/// Total value locked in one market
///
/// # Errors
///
/// Returns `ServerError::Validation` for a bad `marketId` and
/// `ServerError::Service` when the query fails or the market does not exist.
#[utoipa::path(
    get,
    path = "/tvl/{marketId}",
    tag = "metrics",
    summary = "Total value locked in one market",
    params(
        ("marketId" = u32, Path, description = "Market identifier, a positive integer", example = 2)
    ),
    responses(
        (status = 200, description = "Total value locked in cents", body = MarketTvlResponse),
        (status = 400, description = "Invalid market identifier", body = ErrorResponse),
        (status = 500, description = "Unexpected error", body = ErrorResponse)
    )
)]
pub async fn market_tvl_by_market_id_handler<M: MarketService>(
    State(state): State<ServerState<M>>,
    MarketIdSegment(input): MarketIdSegment,
) -> Result<Json<MarketTvlResponse>, ServerError> {
    let (metric, scope) = (Metric::Tvl, Scope::Market);
    let path: MarketIdPath = validated(&input, metric, scope)?;

    let MarketTvl { tvl } = observed(
        metric,
        scope,
        state.market_service().get_tvl_by_market_id(path.market_id),
    )
    .await?;

    Ok(Json(MarketTvlResponse { market_tvl: tvl }))
}

/// Liquidity across markets
///
/// # Errors
///
/// Returns `ServerError::Validation` for a bad `chain_id` and
/// `ServerError::Service` when the query fails.
#[utoipa::path(
    get,
    path = "/liquidity",
    tag = "metrics",
    summary = "Available liquidity",
    description = "Sums supplied minus borrowed principal over every market, optionally restricted to one chain.",
    params(
        ("chain_id" = Option<String>, Query, description = "Chain filter", example = "1")
    ),
    responses(
        (status = 200, description = "Liquidity in cents", body = MarketLiquidityResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Unexpected error", body = ErrorResponse)
    )
)]
pub async fn market_liquidity_handler<M: MarketService>(
    State(state): State<ServerState<M>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<MarketLiquidityResponse>, ServerError> {
    let (metric, scope) = (Metric::Liquidity, Scope::Aggregate);
    let query: MetricQuery = validated(&query_input(pairs), metric, scope)?;

    let MarketLiquidity { liquidity } = observed(
        metric,
        scope,
        state.market_service().get_liquidity(query.into()),
    )
    .await?;

    Ok(Json(MarketLiquidityResponse {
        market_liquidity: liquidity,
    }))
}

/// Liquidity of one market
///
/// # Errors
///
/// Returns `ServerError::Validation` for a bad `marketId` and
/// `ServerError::Service` when the query fails or the market does not exist.
#[utoipa::path(
    get,
    path = "/liquidity/{marketId}",
    tag = "metrics",
    summary = "Available liquidity of one market",
    params(
        ("marketId" = u32, Path, description = "Market identifier, a positive integer", example = 2)
    ),
    responses(
        (status = 200, description = "Liquidity in cents", body = MarketLiquidityResponse),
        (status = 400, description = "Invalid market identifier", body = ErrorResponse),
        (status = 500, description = "Unexpected error", body = ErrorResponse)
    )
)]
pub async fn market_liquidity_by_market_id_handler<M: MarketService>(
    State(state): State<ServerState<M>>,
    MarketIdSegment(input): MarketIdSegment,
) -> Result<Json<MarketLiquidityResponse>, ServerError> {
    let (metric, scope) = (Metric::Liquidity, Scope::Market);
    let path: MarketIdPath = validated(&input, metric, scope)?;

    let MarketLiquidity { liquidity } = observed(
        metric,
        scope,
        state
            .market_service()
            .get_liquidity_by_market_id(path.market_id),
    )
    .await?;

    Ok(Json(MarketLiquidityResponse {
        market_liquidity: liquidity,
    }))
}

fn validated<T: Validate>(input: &Value, metric: Metric, scope: Scope) -> Result<T, ServerError> {
    T::validate(input).map_err(|details| {
        debug!(metric = metric.as_str(), scope = scope.as_str(), ?details, "rejected request input");
        inc_metric_requests(metric, scope, OUTCOME_VALIDATION_ERROR);
        ServerError::Validation(details)
    })
}

async fn observed<T>(
    metric: Metric,
    scope: Scope,
    query: impl Future<Output = MarketServiceResult<T>>,
) -> Result<T, ServerError> {
    let started = Instant::now();
    let result = query.await;

    let outcome = match &result {
        Ok(_) => OUTCOME_OK,
        Err(err) => err.kind(),
    };
    observe_query_duration(metric, scope, outcome, started.elapsed().as_secs_f64());
    inc_metric_requests(metric, scope, outcome);

    result.map_err(ServerError::from)
}
