// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the market metrics API
//!
//! This crate provides the domain value types that are shared between the
//! query layer and the HTTP server, avoiding circular dependencies.

pub mod chains;
pub mod market;

pub use chains::{ChainId, ChainIdParseError};
pub use market::{Cents, MarketId, MarketIdError};
