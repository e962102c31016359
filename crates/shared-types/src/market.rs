// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Market identifiers and monetary amounts

use std::fmt;

use serde::{Serialize, Serializer};
use utoipa::ToSchema;

/// Primary key of a row in the `market` table
///
/// Identifiers are auto-assigned starting at 1, so zero is never a valid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(transparent)]
pub struct MarketId(u32);

impl MarketId {
    /// Create a new `MarketId`
    ///
    /// # Errors
    ///
    /// Returns `MarketIdError::Zero` if `id` is 0
    pub const fn new(id: u32) -> Result<Self, MarketIdError> {
        if id == 0 {
            return Err(MarketIdError::Zero);
        }
        Ok(Self(id))
    }

    /// Get the raw identifier
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for MarketId {
    type Error = MarketIdError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

/// Error type for market identifier construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MarketIdError {
    /// Market identifiers start at 1
    #[error("market id must be greater than 0")]
    Zero,
}

/// An amount of money in cents
///
/// Aggregates over `BIGINT` columns can exceed the 64-bit range, so the amount
/// is held as an `i128`. Liquidity is a difference and may be negative when a
/// market reports more borrowed than supplied.
///
/// Serializes as a decimal string so JSON consumers never round it through a
/// floating-point number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, ToSchema)]
#[schema(value_type = String, example = "4000")]
pub struct Cents(i128);

impl Cents {
    /// Zero cents
    pub const ZERO: Self = Self(0);

    /// Create a new amount
    pub const fn new(cents: i128) -> Self {
        Self(cents)
    }

    /// Get the raw amount
    pub const fn value(self) -> i128 {
        self.0
    }
}

impl From<i64> for Cents {
    fn from(cents: i64) -> Self {
        Self(i128::from(cents))
    }
}

impl From<u64> for Cents {
    fn from(cents: u64) -> Self {
        Self(i128::from(cents))
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Cents {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
