// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Custom extractors for uniform error responses
//!
//! Axum's own extractors answer rejections with plain-text bodies. The
//! extractors here route every rejection through [`ServerError`] so clients
//! always receive the JSON error envelope.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde_json::Value;
use tracing::debug;

use crate::{
    error::ServerError,
    validation::{MarketIdPath, market_id_input},
};

/// The `marketId` path segment, lifted into validator input
///
/// A segment that cannot be percent-decoded into UTF-8 is rejected with the
/// same field error as any other non-numeric identifier.
#[derive(Debug)]
pub struct MarketIdSegment(pub Value);

impl<S> FromRequestParts<S> for MarketIdSegment
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => Ok(Self(market_id_input(raw))),
            Err(rejection) => {
                debug!(error = %rejection, path = %parts.uri.path(), "rejected market id segment");
                Err(ServerError::Validation(MarketIdPath::undecodable()))
            }
        }
    }
}
