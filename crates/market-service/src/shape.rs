// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Result-shape validation for metric rows
//!
//! Every metric query yields one row with one named numeric column. MySQL hands
//! back `SUM` over `BIGINT` as `DECIMAL`, while plain column arithmetic stays
//! `BIGINT`, so both are accepted here. Anything else (no row, a missing
//! column, `NULL`, text, a fractional decimal or a value past `i128`) means the
//! SQL no longer matches what the service expects.

use bigdecimal::{BigDecimal, ToPrimitive};
use shared_types::Cents;
use sqlx::{Row, mysql::MySqlRow};

use crate::error::{MarketServiceError, MarketServiceResult};

/// A numeric column value as decoded from the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawAmount {
    /// Signed integer column
    Integer(i64),
    /// Unsigned integer column
    Unsigned(u64),
    /// `DECIMAL` column
    Decimal(BigDecimal),
}

impl RawAmount {
    /// Losslessly convert to cents, rejecting fractional or out-of-range values
    pub fn into_cents(self) -> MarketServiceResult<Cents> {
        match self {
            Self::Integer(value) => Ok(Cents::from(value)),
            Self::Unsigned(value) => Ok(Cents::from(value)),
            Self::Decimal(value) => {
                let integral = value.with_scale(0);
                if integral != value {
                    return Err(MarketServiceError::unexpected_shape(format!(
                        "expected an integral amount, received {value}"
                    )));
                }

                let (digits, _) = integral.as_bigint_and_exponent();
                digits.to_i128().map(Cents::new).ok_or_else(|| {
                    MarketServiceError::unexpected_shape(format!(
                        "amount {value} does not fit in 128 bits"
                    ))
                })
            }
        }
    }
}

/// Read `column` from the first row of a metric query as cents
pub fn read_cents(row: Option<&MySqlRow>, column: &str) -> MarketServiceResult<Cents> {
    let row = row.ok_or_else(|| {
        MarketServiceError::unexpected_shape(format!(
            "expected one row with column {column}, received none"
        ))
    })?;

    decode_amount(row, column)?.into_cents()
}

fn decode_amount(row: &MySqlRow, column: &str) -> MarketServiceResult<RawAmount> {
    match row.try_get::<i64, _>(column) {
        Ok(value) => return Ok(RawAmount::Integer(value)),
        Err(sqlx::Error::ColumnDecode { .. }) => {}
        Err(err) => return Err(column_error(column, err)),
    }

    match row.try_get::<BigDecimal, _>(column) {
        Ok(value) => return Ok(RawAmount::Decimal(value)),
        Err(sqlx::Error::ColumnDecode { .. }) => {}
        Err(err) => return Err(column_error(column, err)),
    }

    row.try_get::<u64, _>(column)
        .map(RawAmount::Unsigned)
        .map_err(|err| column_error(column, err))
}

fn column_error(column: &str, err: sqlx::Error) -> MarketServiceError {
    match err {
        sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnDecode { .. } => {
            MarketServiceError::unexpected_shape(format!("column {column}: {err}"))
        }
        other => MarketServiceError::from(other),
    }
}
