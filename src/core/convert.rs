//! Swap arithmetic over a loaded price catalog

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

use crate::core::catalog::Catalog;

/// Fractional digits in every formatted result.
const RESULT_DECIMALS: usize = 8;

static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("amount pattern is valid"));

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConvertError {
    #[error("amount to send must be a non-negative number, got '{0}'")]
    InvalidAmount(String),
    #[error("no price is known for currency '{0}'")]
    UnknownCurrency(String),
    #[error("currency '{0}' has no positive price, cannot convert")]
    NonPositivePrice(String),
}

/// What to do when a requested currency has no usable price.
///
/// `Fail` is the default. `AssumeUnit` prices unknown (or non-positive)
/// entries at 1, which quietly skews the result, so it sits behind an
/// explicit flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPrice {
    #[default]
    Fail,
    AssumeUnit,
}

/// Validates the user-entered amount and parses it.
pub fn validate_amount(input: &str) -> Result<f64, ConvertError> {
    if input.is_empty() || !AMOUNT_PATTERN.is_match(input) {
        return Err(ConvertError::InvalidAmount(input.to_string()));
    }
    input
        .parse::<f64>()
        .map_err(|_| ConvertError::InvalidAmount(input.to_string()))
}

fn unit_price(
    catalog: &Catalog,
    code: &str,
    missing: MissingPrice,
) -> Result<f64, ConvertError> {
    match catalog.unit_price(code) {
        Some(price) if price > 0.0 => Ok(price),
        Some(_) => match missing {
            MissingPrice::Fail => Err(ConvertError::NonPositivePrice(code.to_string())),
            MissingPrice::AssumeUnit => Ok(1.0),
        },
        None => match missing {
            MissingPrice::Fail => Err(ConvertError::UnknownCurrency(code.to_string())),
            MissingPrice::AssumeUnit => Ok(1.0),
        },
    }
}

/// Converts `amount` of `from` into `to` via their unit prices and formats
/// the result to a fixed number of fractional digits.
pub fn convert(
    amount: &str,
    from: &str,
    to: &str,
    catalog: &Catalog,
    missing: MissingPrice,
) -> Result<String, ConvertError> {
    let amount = validate_amount(amount)?;
    let from_price = unit_price(catalog, from, missing)?;
    let to_price = unit_price(catalog, to, missing)?;

    let result = amount * from_price / to_price;
    debug!(amount, from, from_price, to, to_price, result, "Converted");

    Ok(format_amount(result))
}

/// Fixed-point rendering; never falls back to scientific notation.
pub fn format_amount(value: f64) -> String {
    format!("{value:.prec$}", prec = RESULT_DECIMALS)
}
