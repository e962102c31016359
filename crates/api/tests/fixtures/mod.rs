// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Test fixtures for market metric endpoints
//!
//! This module provides the seeded market rows used across integration tests and
//! an in-memory market service that answers from them.

pub mod markets;

pub use markets::*;
