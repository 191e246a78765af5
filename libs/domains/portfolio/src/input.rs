//! Conversions from loosely typed request bodies to checked values.

use axum_helpers::NO_DATA_PROVIDED;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{PortfolioError, PortfolioResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Records `name` in `missing` when `value` is absent.
pub(crate) fn required<T>(
    value: Option<T>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<T> {
    if value.is_none() {
        missing.push(name);
    }
    value
}

pub(crate) fn no_data() -> PortfolioError {
    PortfolioError::Validation(NO_DATA_PROVIDED.to_string())
}

/// Text kept as submitted; blank text is rejected.
pub(crate) fn text(value: String, field: &str) -> PortfolioResult<String> {
    if value.trim().is_empty() {
        return Err(PortfolioError::Validation(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(value)
}

/// `YYYY-MM-DD` calendar date.
pub(crate) fn date(value: &str, field: &str) -> PortfolioResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        PortfolioError::Validation(format!(
            "Invalid date for {}: expected YYYY-MM-DD, got '{}'",
            field, value
        ))
    })
}

/// Non-negative amount rounded to cents.
pub(crate) fn price(value: Decimal) -> PortfolioResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PortfolioError::Validation(
            "price must not be negative".to_string(),
        ));
    }
    Ok(value.round_dp(2))
}

/// Applies `convert` to a present value.
pub(crate) fn optional<T, U>(
    value: Option<T>,
    convert: impl FnOnce(T) -> PortfolioResult<U>,
) -> PortfolioResult<Option<U>> {
    value.map(convert).transpose()
}
