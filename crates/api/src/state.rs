// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server state management module
//!
//! This module provides shared application state for the market metrics server,
//! including configuration, the market service, and coordinated cancellation.

use std::sync::Arc;

use market_service::MarketService;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::warn;
use utoipa::ToSchema;

use crate::config::ServerConfig;

/// Shared application state with cancellation token support
#[derive(Debug)]
pub struct ServerState<M> {
    /// Server configuration
    config: ServerConfig,
    /// Market metric queries
    market_service: Arc<M>,
    /// Cancellation token for coordinated shutdown
    pub cancellation_token: CancellationToken,
}

// Derived `Clone` would require `M: Clone`
impl<M> Clone for ServerState<M> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            market_service: Arc::clone(&self.market_service),
            cancellation_token: self.cancellation_token.clone(),
        }
    }
}

impl<M: MarketService> ServerState<M> {
    /// Create new server state
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `market_service` - Source of market metrics
    /// * `cancellation_token` - Token for coordinated cancellation
    pub fn new(
        config: ServerConfig,
        market_service: Arc<M>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            market_service,
            cancellation_token,
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Market metric queries
    pub fn market_service(&self) -> &M {
        &self.market_service
    }

    /// Check whether the database hands out a connection
    pub async fn health_check(&self) -> HealthCheck {
        match self.market_service.ping().await {
            Ok(()) => HealthCheck { db_alive: true },
            Err(err) => {
                warn!(error_kind = err.kind(), error = %err, "database health check failed");
                HealthCheck { db_alive: false }
            }
        }
    }
}

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    /// Whether a database connection could be acquired
    pub db_alive: bool,
}

#[cfg(test)]
mod tests {
    use market_service::{
        MarketFilter, MarketLiquidity, MarketServiceError, MarketServiceResult, MarketTvl,
    };
    use shared_types::{Cents, MarketId};

    use super::*;

    struct PingOnly {
        alive: bool,
    }

    impl MarketService for PingOnly {
        async fn get_tvl(&self, _filter: MarketFilter) -> MarketServiceResult<MarketTvl> {
            Ok(MarketTvl { tvl: Cents::ZERO })
        }

        async fn get_tvl_by_market_id(&self, _id: MarketId) -> MarketServiceResult<MarketTvl> {
            Ok(MarketTvl { tvl: Cents::ZERO })
        }

        async fn get_liquidity(&self, _filter: MarketFilter) -> MarketServiceResult<MarketLiquidity> {
            Ok(MarketLiquidity {
                liquidity: Cents::ZERO,
            })
        }

        async fn get_liquidity_by_market_id(
            &self,
            _id: MarketId,
        ) -> MarketServiceResult<MarketLiquidity> {
            Ok(MarketLiquidity {
                liquidity: Cents::ZERO,
            })
        }

        async fn ping(&self) -> MarketServiceResult<()> {
            if self.alive {
                Ok(())
            } else {
                Err(MarketServiceError::from(sqlx::Error::PoolTimedOut))
            }
        }
    }

    fn state(alive: bool, token: CancellationToken) -> ServerState<PingOnly> {
        ServerState::new(
            ServerConfig::for_testing(),
            Arc::new(PingOnly { alive }),
            token,
        )
    }

    #[test]
    fn server_state_with_cancellation_token() {
        let token = CancellationToken::new();
        let state = state(true, token.clone());
        let cloned = state.clone();

        assert!(!state.cancellation_token.is_cancelled());

        // Test that the tokens are linked
        token.cancel();
        assert!(state.cancellation_token.is_cancelled());
        assert!(cloned.cancellation_token.is_cancelled());
    }

    #[tokio::test]
    async fn health_check_reflects_ping() {
        let up = state(true, CancellationToken::new()).health_check().await;
        assert_eq!(up, HealthCheck { db_alive: true });

        let down = state(false, CancellationToken::new()).health_check().await;
        assert_eq!(down, HealthCheck { db_alive: false });
    }

    #[test]
    fn health_check_wire_format() {
        let body = serde_json::to_value(HealthCheck { db_alive: false }).expect("serializable");
        assert_eq!(body, serde_json::json!({ "db_alive": false }));
    }
}
