// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Market metric service
//!
//! [`MarketService`] is the capability the HTTP layer depends on. The MySQL
//! implementation runs each statement through the connection pool, which hands
//! out one connection for the duration of that statement and takes it back on
//! every exit path, including errors.

use shared_types::{Cents, MarketId};
use sqlx::{MySql, MySqlPool, mysql::MySqlArguments, query::Query};
use tracing::debug;

use crate::{
    error::MarketServiceResult,
    query::{
        BuiltQuery, LIQUIDITY_BY_MARKET_ID_QUERY, MarketFilter, QueryParam,
        TVL_BY_MARKET_ID_QUERY, build_liquidity_query, build_tvl_query,
    },
    shape::read_cents,
};

const TVL_COLUMN: &str = "tvl";
const LIQUIDITY_COLUMN: &str = "liquidity";

/// Total value locked, in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketTvl {
    /// Sum of supplied principal
    pub tvl: Cents,
}

/// Available liquidity, in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketLiquidity {
    /// Supplied minus borrowed principal
    pub liquidity: Cents,
}

/// Read access to market metrics
///
/// Implementations must report result-shape drift as
/// [`MarketServiceError::UnexpectedShape`](crate::MarketServiceError::UnexpectedShape)
/// and pass data store failures through as
/// [`MarketServiceError::Database`](crate::MarketServiceError::Database).
pub trait MarketService: Send + Sync {
    /// Total value locked across markets matching `filter`
    ///
    /// Returns zero when no market matches.
    fn get_tvl(
        &self,
        filter: MarketFilter,
    ) -> impl Future<Output = MarketServiceResult<MarketTvl>> + Send;

    /// Total value locked in a single market
    fn get_tvl_by_market_id(
        &self,
        market_id: MarketId,
    ) -> impl Future<Output = MarketServiceResult<MarketTvl>> + Send;

    /// Liquidity across markets matching `filter`
    ///
    /// Returns zero when no market matches.
    fn get_liquidity(
        &self,
        filter: MarketFilter,
    ) -> impl Future<Output = MarketServiceResult<MarketLiquidity>> + Send;

    /// Liquidity of a single market
    fn get_liquidity_by_market_id(
        &self,
        market_id: MarketId,
    ) -> impl Future<Output = MarketServiceResult<MarketLiquidity>> + Send;

    /// Check that the data store hands out a connection
    fn ping(&self) -> impl Future<Output = MarketServiceResult<()>> + Send;
}

/// [`MarketService`] backed by a MySQL connection pool
#[derive(Debug, Clone)]
pub struct SqlMarketService {
    pool: MySqlPool,
}

impl SqlMarketService {
    /// Create a service over an existing pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// The underlying pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    async fn fetch_cents(
        &self,
        query: Query<'_, MySql, MySqlArguments>,
        column: &str,
    ) -> MarketServiceResult<Cents> {
        let row = query.fetch_optional(&self.pool).await?;
        read_cents(row.as_ref(), column)
    }

    async fn fetch_built(&self, built: &BuiltQuery, column: &str) -> MarketServiceResult<Cents> {
        debug!(query = %built.text, params = built.params.len(), "running metric query");
        self.fetch_cents(bind_params(&built.text, &built.params), column)
            .await
    }
}

fn bind_params<'q>(text: &'q str, params: &[QueryParam]) -> Query<'q, MySql, MySqlArguments> {
    params
        .iter()
        .fold(sqlx::query(text), |query, param| match *param {
            QueryParam::Text(value) => query.bind(value),
        })
}

impl MarketService for SqlMarketService {
    async fn get_tvl(&self, filter: MarketFilter) -> MarketServiceResult<MarketTvl> {
        let built = build_tvl_query(&filter);
        let tvl = self.fetch_built(&built, TVL_COLUMN).await?;
        Ok(MarketTvl { tvl })
    }

    async fn get_tvl_by_market_id(&self, market_id: MarketId) -> MarketServiceResult<MarketTvl> {
        debug!(%market_id, query = TVL_BY_MARKET_ID_QUERY, "running metric query");
        let query = sqlx::query(TVL_BY_MARKET_ID_QUERY).bind(market_id.value());
        let tvl = self.fetch_cents(query, TVL_COLUMN).await?;
        Ok(MarketTvl { tvl })
    }

    async fn get_liquidity(&self, filter: MarketFilter) -> MarketServiceResult<MarketLiquidity> {
        let built = build_liquidity_query(&filter);
        let liquidity = self.fetch_built(&built, LIQUIDITY_COLUMN).await?;
        Ok(MarketLiquidity { liquidity })
    }

    async fn get_liquidity_by_market_id(
        &self,
        market_id: MarketId,
    ) -> MarketServiceResult<MarketLiquidity> {
        debug!(%market_id, query = LIQUIDITY_BY_MARKET_ID_QUERY, "running metric query");
        let query = sqlx::query(LIQUIDITY_BY_MARKET_ID_QUERY).bind(market_id.value());
        let liquidity = self.fetch_cents(query, LIQUIDITY_COLUMN).await?;
        Ok(MarketLiquidity { liquidity })
    }

    async fn ping(&self) -> MarketServiceResult<()> {
        // Dropping the connection returns it to the pool
        let _connection = self.pool.acquire().await?;
        Ok(())
    }
}
