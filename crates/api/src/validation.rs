// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Request parameter validation
//!
//! Query strings and path segments are untrusted, loosely typed input. They are
//! lifted into a [`serde_json::Value`] object first and then checked field by
//! field, so a failing request reports every bad field at once instead of
//! stopping at the first one.
//!
//! Field names in error reports are the wire names (`chain_id`, `marketId`).

use std::{collections::BTreeMap, str::FromStr};

use market_service::MarketFilter;
use serde::Serialize;
use serde_json::{Map, Value};
use shared_types::{ChainId, MarketId};
use utoipa::ToSchema;

/// Wire name of the chain filter query parameter
pub const CHAIN_ID_FIELD: &str = "chain_id";

/// Wire name of the market identifier path parameter
pub const MARKET_ID_FIELD: &str = "marketId";

const NOT_A_NUMBER_REASON: &str = "Invalid input: expected number, received NaN";

/// Every validation failure of one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    /// Reasons keyed by the failing field's wire name
    pub field_errors: BTreeMap<String, Vec<String>>,
    /// Reasons that apply to the input as a whole
    pub form_errors: Vec<String>,
}

impl ValidationErrors {
    /// Record a failure for `field`
    pub fn add_field_error(&mut self, field: &str, reason: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(reason.into());
    }

    /// Record a failure of the whole input
    pub fn add_form_error(&mut self, reason: impl Into<String>) {
        self.form_errors.push(reason.into());
    }

    /// Whether nothing failed
    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.form_errors.is_empty()
    }

    /// `Ok(value)` when nothing failed, otherwise the collected errors
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Types that can be parsed out of untrusted request input
pub trait Validate: Sized {
    /// Validate and normalize `input`
    ///
    /// # Errors
    ///
    /// Returns every field-level and form-level failure found.
    fn validate(input: &Value) -> Result<Self, ValidationErrors>;
}

/// Query parameters of the aggregate metric endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricQuery {
    /// Optional chain filter
    pub chain_id: Option<ChainId>,
}

impl Validate for MetricQuery {
    fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let Some(fields) = expect_object(input, &mut errors) else {
            return Err(errors);
        };

        let chain_id = optional_chain_id(fields.get(CHAIN_ID_FIELD))
            .map_err(|reason| errors.add_field_error(CHAIN_ID_FIELD, reason))
            .ok()
            .flatten();

        errors.into_result(Self { chain_id })
    }
}

impl From<MetricQuery> for MarketFilter {
    fn from(query: MetricQuery) -> Self {
        Self {
            chain_id: query.chain_id,
        }
    }
}

/// Path parameters of the per-market endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketIdPath {
    /// Market primary key
    pub market_id: MarketId,
}

impl Validate for MarketIdPath {
    fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let Some(fields) = expect_object(input, &mut errors) else {
            return Err(errors);
        };

        match coerce_market_id(fields.get(MARKET_ID_FIELD)) {
            Ok(market_id) => errors.into_result(Self { market_id }),
            Err(reason) => {
                errors.add_field_error(MARKET_ID_FIELD, reason);
                Err(errors)
            }
        }
    }
}

impl MarketIdPath {
    /// Errors for a `marketId` segment that does not even decode as text
    pub fn undecodable() -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        errors.add_field_error(MARKET_ID_FIELD, NOT_A_NUMBER_REASON);
        errors
    }
}

/// Lift decoded query pairs into an object; a repeated key becomes an array
pub fn query_input(pairs: Vec<(String, String)>) -> Value {
    let mut fields = Map::new();

    for (key, value) in pairs {
        match fields.get_mut(&key) {
            Some(Value::Array(values)) => values.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                fields.insert(key, Value::String(value));
            }
        }
    }

    Value::Object(fields)
}

/// Lift a raw path segment into the object [`MarketIdPath`] validates
pub fn market_id_input(raw: String) -> Value {
    let mut fields = Map::new();
    fields.insert(MARKET_ID_FIELD.to_string(), Value::String(raw));
    Value::Object(fields)
}

fn expect_object<'a>(
    input: &'a Value,
    errors: &mut ValidationErrors,
) -> Option<&'a Map<String, Value>> {
    if let Value::Object(fields) = input {
        Some(fields)
    } else {
        errors.add_form_error(format!(
            "Invalid input: expected object, received {}",
            type_name(input)
        ));
        None
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn chain_id_options() -> String {
    ChainId::all()
        .iter()
        .map(|chain| format!("\"{chain}\""))
        .collect::<Vec<_>>()
        .join("|")
}

/// Absent is fine; present must be one of the enumerated chain id strings
fn optional_chain_id(value: Option<&Value>) -> Result<Option<ChainId>, String> {
    let Some(value) = value else {
        return Ok(None);
    };

    value
        .as_str()
        .and_then(|raw| ChainId::from_str(raw).ok())
        .map(Some)
        .ok_or_else(|| format!("Invalid option: expected one of {}", chain_id_options()))
}

/// Result of numeric coercion, before integer and range checks
enum Coerced {
    Integer(i128),
    Fractional,
    NotANumber,
}

fn coerce_number(value: &Value) -> Coerced {
    match value {
        Value::Null => Coerced::Integer(0),
        Value::Bool(flag) => Coerced::Integer(i128::from(*flag)),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Coerced::Integer(i128::from(int))
            } else if let Some(int) = number.as_u64() {
                Coerced::Integer(i128::from(int))
            } else {
                number.as_f64().map_or(Coerced::NotANumber, coerce_float)
            }
        }
        Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Coerced::Integer(0)
            } else if let Ok(int) = trimmed.parse::<i128>() {
                Coerced::Integer(int)
            } else {
                trimmed
                    .parse::<f64>()
                    .map_or(Coerced::NotANumber, coerce_float)
            }
        }
        Value::Array(_) | Value::Object(_) => Coerced::NotANumber,
    }
}

#[allow(clippy::cast_possible_truncation)] // integral and bounded by the range check below
fn coerce_float(float: f64) -> Coerced {
    if float.is_nan() {
        Coerced::NotANumber
    } else if !float.is_finite() || float.fract() != 0.0 {
        Coerced::Fractional
    } else if float.abs() > 1e30 {
        // Far outside any identifier range, keep the sign for the range message
        Coerced::Integer(if float > 0.0 { i128::MAX } else { i128::MIN })
    } else {
        Coerced::Integer(float as i128)
    }
}

/// Required; coerced to a number, then it must be a positive integer in `u32` range
fn coerce_market_id(value: Option<&Value>) -> Result<MarketId, String> {
    let Some(value) = value else {
        return Err("Invalid input: expected number, received undefined".to_string());
    };

    let int = match coerce_number(value) {
        Coerced::Integer(int) => int,
        Coerced::Fractional => {
            return Err("Invalid input: expected int, received number".to_string());
        }
        Coerced::NotANumber => {
            return Err(NOT_A_NUMBER_REASON.to_string());
        }
    };

    if int <= 0 {
        return Err("Too small: expected number to be >0".to_string());
    }

    u32::try_from(int)
        .ok()
        .and_then(|id| MarketId::new(id).ok())
        .ok_or_else(|| format!("Too big: expected number to be <={}", u32::MAX))
}
