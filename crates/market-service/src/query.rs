// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! SQL construction for market metrics
//!
//! Builders are pure: they return the statement text and the values to bind,
//! in placeholder order, and never touch the database. Base statements end in
//! `WHERE 1 = 1` so every filter can be appended as ` AND <column> = ?`.

use shared_types::ChainId;

/// Sum of supplied principal over every market
pub const TVL_QUERY_BASE: &str =
    "SELECT COALESCE(SUM(total_supply_cents), 0) AS tvl FROM market WHERE 1 = 1";

/// Sum of supplied minus borrowed principal over every market
pub const LIQUIDITY_QUERY_BASE: &str = "SELECT COALESCE(SUM(total_supply_cents - total_borrow_cents), 0) AS liquidity FROM market WHERE 1 = 1";

/// Supplied principal of a single market
pub const TVL_BY_MARKET_ID_QUERY: &str =
    "SELECT COALESCE(total_supply_cents, 0) AS tvl FROM market WHERE id = ?";

/// Supplied minus borrowed principal of a single market
pub const LIQUIDITY_BY_MARKET_ID_QUERY: &str = "SELECT COALESCE(total_supply_cents - total_borrow_cents, 0) AS liquidity FROM market WHERE id = ?";

const CHAIN_ID_CONDITION: &str = " AND chain_id = ?";

/// Optional filters for aggregate metrics
///
/// An empty filter aggregates over every market.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarketFilter {
    /// Restrict the aggregate to markets on this chain
    pub chain_id: Option<ChainId>,
}

impl MarketFilter {
    /// Filter on a single chain
    pub const fn for_chain(chain_id: ChainId) -> Self {
        Self {
            chain_id: Some(chain_id),
        }
    }
}

/// A value bound to one `?` placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryParam {
    /// A string column value
    Text(&'static str),
}

/// Statement text plus its positional parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    /// SQL text with `?` placeholders
    pub text: String,
    /// One entry per placeholder, in the order the placeholders appear
    pub params: Vec<QueryParam>,
}

/// Build the TVL aggregate for the given filter
pub fn build_tvl_query(filter: &MarketFilter) -> BuiltQuery {
    apply_filter(TVL_QUERY_BASE, filter)
}

/// Build the liquidity aggregate for the given filter
pub fn build_liquidity_query(filter: &MarketFilter) -> BuiltQuery {
    apply_filter(LIQUIDITY_QUERY_BASE, filter)
}

fn apply_filter(base: &str, filter: &MarketFilter) -> BuiltQuery {
    let mut text = String::from(base);
    let mut params = Vec::new();

    if let Some(chain_id) = filter.chain_id {
        text.push_str(CHAIN_ID_CONDITION);
        params.push(QueryParam::Text(chain_id.as_str()));
    }

    BuiltQuery { text, params }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tvl_without_filter_is_base_query() {
        let BuiltQuery { text, params } = build_tvl_query(&MarketFilter::default());

        assert_eq!(text, TVL_QUERY_BASE);
        assert!(params.is_empty());
    }

    #[test]
    fn tvl_with_chain_id() {
        for &chain in ChainId::all() {
            let BuiltQuery { text, params } = build_tvl_query(&MarketFilter::for_chain(chain));

            assert_eq!(text, format!("{TVL_QUERY_BASE} AND chain_id = ?"));
            assert_eq!(params, vec![QueryParam::Text(chain.as_str())]);
        }
    }

    #[test]
    fn liquidity_without_filter_is_base_query() {
        let BuiltQuery { text, params } = build_liquidity_query(&MarketFilter::default());

        assert_eq!(text, LIQUIDITY_QUERY_BASE);
        assert!(params.is_empty());
    }

    #[test]
    fn liquidity_with_chain_id() {
        let BuiltQuery { text, params } =
            build_liquidity_query(&MarketFilter::for_chain(ChainId::BnbSmartChain));

        assert_eq!(text, format!("{LIQUIDITY_QUERY_BASE} AND chain_id = ?"));
        assert_eq!(params, vec![QueryParam::Text("56")]);
    }

    #[test]
    fn placeholders_match_params() {
        let queries = [
            build_tvl_query(&MarketFilter::default()),
            build_tvl_query(&MarketFilter::for_chain(ChainId::Ethereum)),
            build_liquidity_query(&MarketFilter::default()),
            build_liquidity_query(&MarketFilter::for_chain(ChainId::Ethereum)),
        ];

        for query in queries {
            assert_eq!(query.text.matches('?').count(), query.params.len());
        }
    }

    #[test]
    fn by_market_id_queries_take_one_param() {
        assert_eq!(TVL_BY_MARKET_ID_QUERY.matches('?').count(), 1);
        assert_eq!(LIQUIDITY_BY_MARKET_ID_QUERY.matches('?').count(), 1);
    }
}
