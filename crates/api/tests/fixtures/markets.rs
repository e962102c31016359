// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

//! Market fixtures
//!
//! Three markets across two chains, and a [`MarketService`] that computes the
//! same sums the SQL queries do, over those rows in memory.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use api::{Server, ServerConfig, ShutdownConfig};
use market_service::{
    MarketFilter, MarketLiquidity, MarketService, MarketServiceError, MarketServiceResult,
    MarketTvl,
};
use shared_types::{Cents, ChainId, MarketId};
use tokio_util::sync::CancellationToken;

/// One row of the `market` table
#[derive(Debug, Clone, Copy)]
pub struct SeedMarket {
    /// Display name
    pub name: &'static str,
    /// Chain the market lives on
    pub chain_id: ChainId,
    /// Supplied principal in cents
    pub total_supply_cents: i64,
    /// Borrowed principal in cents
    pub total_borrow_cents: i64,
}

/// Seed rows; ids are assigned from 1 in this order
pub const SEED_MARKETS: [SeedMarket; 3] = [
    SeedMarket {
        name: "Token A",
        chain_id: ChainId::Ethereum,
        total_supply_cents: 1000,
        total_borrow_cents: 300,
    },
    SeedMarket {
        name: "Token B",
        chain_id: ChainId::BnbSmartChain,
        total_supply_cents: 2500,
        total_borrow_cents: 1200,
    },
    SeedMarket {
        name: "Token C",
        chain_id: ChainId::BnbSmartChain,
        total_supply_cents: 500,
        total_borrow_cents: 200,
    },
];

/// How the in-memory service misbehaves, if at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Answer from the seed rows
    None,
    /// Report result-shape drift
    Shape,
    /// Report an unreachable database
    Database,
    /// Panic inside the handler
    Panic,
    /// Hang well past any request timeout the tests configure
    Stall,
}

/// [`MarketService`] over [`SEED_MARKETS`]
#[derive(Debug)]
pub struct InMemoryMarketService {
    markets: Vec<SeedMarket>,
    failure: Failure,
}

impl InMemoryMarketService {
    /// Service over the seed rows
    pub fn seeded() -> Self {
        Self {
            markets: SEED_MARKETS.to_vec(),
            failure: Failure::None,
        }
    }

    /// Service over custom rows
    pub fn with_markets(markets: Vec<SeedMarket>) -> Self {
        Self {
            markets,
            failure: Failure::None,
        }
    }

    /// Service that always fails in the given way
    pub fn failing(failure: Failure) -> Self {
        Self {
            markets: Vec::new(),
            failure,
        }
    }

    async fn check(&self) -> MarketServiceResult<()> {
        match self.failure {
            Failure::None => Ok(()),
            Failure::Shape => Err(MarketServiceError::unexpected_shape("column tvl missing")),
            Failure::Database => Err(MarketServiceError::from(sqlx::Error::PoolTimedOut)),
            #[allow(clippy::panic)]
            Failure::Panic => panic!("in-memory market service asked to panic"),
            Failure::Stall => {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok(())
            }
        }
    }

    fn sum(&self, filter: MarketFilter, amount: impl Fn(&SeedMarket) -> i64) -> Cents {
        let total: i128 = self
            .markets
            .iter()
            .filter(|market| filter.chain_id.is_none_or(|chain| market.chain_id == chain))
            .map(|market| i128::from(amount(market)))
            .sum();
        Cents::new(total)
    }

    fn by_id(&self, market_id: MarketId) -> MarketServiceResult<&SeedMarket> {
        usize::try_from(market_id.value() - 1)
            .ok()
            .and_then(|index| self.markets.get(index))
            .ok_or_else(|| {
                MarketServiceError::unexpected_shape(format!("no row for market {market_id}"))
            })
    }
}

fn liquidity(market: &SeedMarket) -> i64 {
    market.total_supply_cents - market.total_borrow_cents
}

impl MarketService for InMemoryMarketService {
    async fn get_tvl(&self, filter: MarketFilter) -> MarketServiceResult<MarketTvl> {
        self.check().await?;
        Ok(MarketTvl {
            tvl: self.sum(filter, |market| market.total_supply_cents),
        })
    }

    async fn get_tvl_by_market_id(&self, market_id: MarketId) -> MarketServiceResult<MarketTvl> {
        self.check().await?;
        let market = self.by_id(market_id)?;
        Ok(MarketTvl {
            tvl: Cents::from(market.total_supply_cents),
        })
    }

    async fn get_liquidity(&self, filter: MarketFilter) -> MarketServiceResult<MarketLiquidity> {
        self.check().await?;
        Ok(MarketLiquidity {
            liquidity: self.sum(filter, liquidity),
        })
    }

    async fn get_liquidity_by_market_id(
        &self,
        market_id: MarketId,
    ) -> MarketServiceResult<MarketLiquidity> {
        self.check().await?;
        let market = self.by_id(market_id)?;
        Ok(MarketLiquidity {
            liquidity: Cents::from(liquidity(market)),
        })
    }

    async fn ping(&self) -> MarketServiceResult<()> {
        match self.failure {
            Failure::Database => Err(MarketServiceError::from(sqlx::Error::PoolTimedOut)),
            _ => Ok(()),
        }
    }
}

/// Start a test server over `service` and return its address
pub async fn spawn_server(service: InMemoryMarketService) -> (SocketAddr, CancellationToken) {
    spawn_server_with_config(ServerConfig::for_testing(), service).await
}

/// Same as [`spawn_server`] with a custom configuration
pub async fn spawn_server_with_config(
    config: ServerConfig,
    service: InMemoryMarketService,
) -> (SocketAddr, CancellationToken) {
    Server::with_market_service(
        config,
        ShutdownConfig::default(),
        Arc::new(service),
    )
    .expect("Failed to create server")
    .run_for_testing()
    .await
    .expect("Failed to start test server")
}
