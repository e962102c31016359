// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Blockchain chain identifiers
//!
//! Markets are tagged with the network they live on. The `market` table stores
//! the identifier as an enumerated string column, so the wire and storage form
//! of a [`ChainId`] is always its decimal string (`"1"`, `"56"`), never a number.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::{
    PartialSchema, ToSchema,
    openapi::{
        RefOr,
        schema::{ObjectBuilder, Schema, Type},
    },
};

/// Supported blockchain chain identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainId {
    /// Ethereum Mainnet - Chain ID: "1"
    Ethereum,
    /// BNB Smart Chain - Chain ID: "56"
    BnbSmartChain,
}

impl ChainId {
    /// Returns the identifier exactly as stored in the `chain_id` column
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ethereum => "1",
            Self::BnbSmartChain => "56",
        }
    }

    /// Returns the human-readable name of the chain
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ethereum => "Ethereum",
            Self::BnbSmartChain => "BNB Smart Chain",
        }
    }

    /// Returns all supported chain IDs
    pub const fn all() -> &'static [Self] {
        &[Self::Ethereum, Self::BnbSmartChain]
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainId {
    type Err = ChainIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|chain| chain.as_str() == s)
            .ok_or_else(|| ChainIdParseError::Unsupported(s.to_string()))
    }
}

impl Serialize for ChainId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ChainIdVisitor;

        impl serde::de::Visitor<'_> for ChainIdVisitor {
            type Value = ChainId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a chain ID string (\"1\" or \"56\")")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                ChainId::from_str(value).map_err(|_| {
                    E::invalid_value(
                        serde::de::Unexpected::Str(value),
                        &"a supported chain ID (\"1\", \"56\")",
                    )
                })
            }
        }

        deserializer.deserialize_str(ChainIdVisitor)
    }
}

impl PartialSchema for ChainId {
    fn schema() -> RefOr<Schema> {
        let object = ObjectBuilder::new()
            .schema_type(Type::String)
            .enum_values(Some(Self::all().iter().map(|chain| chain.as_str())))
            .description(Some("Blockchain network identifier"))
            .build();
        RefOr::T(Schema::Object(object))
    }
}

impl ToSchema for ChainId {}

/// Error type for chain ID parsing
#[derive(Debug, thiserror::Error)]
pub enum ChainIdParseError {
    /// The string is not one of the enumerated identifiers
    #[error("unsupported chain ID: {0:?}. Supported chain IDs are: \"1\" (Ethereum), \"56\" (BNB Smart Chain)")]
    Unsupported(String),
}
