// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for market metric queries

use thiserror::Error;

/// Errors returned by a [`MarketService`](crate::MarketService)
#[derive(Debug, Error)]
pub enum MarketServiceError {
    /// The query ran but its result did not have the expected shape
    ///
    /// This means the SQL and the row validation have drifted apart. It is a
    /// server fault, never a client input problem.
    #[error("unexpected result shape: {message}")]
    UnexpectedShape {
        /// What was wrong with the row
        message: String,
    },

    /// The database could not be reached or rejected the statement
    #[error("database error: {source}")]
    Database {
        /// Underlying driver error
        #[from]
        source: sqlx::Error,
    },
}

impl MarketServiceError {
    /// Create an unexpected shape error
    pub fn unexpected_shape(message: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            message: message.into(),
        }
    }

    /// Stable label for logs and metrics
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnexpectedShape { .. } => "unexpected_shape",
            Self::Database { .. } => "database",
        }
    }
}

/// Result type for market metric queries
pub type MarketServiceResult<T> = Result<T, MarketServiceError>;
