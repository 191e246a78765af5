//! Sorting and filtering shared by every list endpoint.

use sea_orm::Order;
use serde::Deserialize;
use std::cmp::Ordering;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

use crate::error::{PortfolioError, PortfolioResult};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Deserialize, ToSchema,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// `ASC` / `DESC` for hand-written `ORDER BY` clauses.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// Parsed `sort` + `order` query parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sort<F> {
    pub field: F,
    pub order: SortOrder,
}

impl<F> Sort<F>
where
    F: FromStr + Default,
{
    /// Absent or blank values fall back to the default field, ascending.
    pub fn parse(sort: Option<&str>, order: Option<&str>) -> PortfolioResult<Self> {
        let field = match non_blank(sort) {
            Some(raw) => raw
                .parse::<F>()
                .map_err(|_| PortfolioError::Validation(format!("Invalid sort field: {}", raw)))?,
            None => F::default(),
        };

        let order = match non_blank(order) {
            Some(raw) => raw.parse::<SortOrder>().map_err(|_| {
                PortfolioError::Validation(format!(
                    "Invalid sort order: {} (expected asc or desc)",
                    raw
                ))
            })?,
            None => SortOrder::default(),
        };

        Ok(Self { field, order })
    }
}

/// `?sort=&order=` for resources without filters.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SortParams {
    /// Field to sort by
    pub sort: Option<String>,
    /// `asc` (default) or `desc`
    pub order: Option<String>,
}

/// Trimmed filter value, `None` when absent or blank.
pub fn filter_value(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Case-insensitive substring match; no needle matches everything.
pub fn matches_filter(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

/// `LIKE` pattern for a case-insensitive substring search against `LOWER(column)`.
pub fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
