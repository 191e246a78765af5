use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::EnumString;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{PortfolioError, PortfolioResult};
use crate::input::{date, no_data, optional, price, required, text};
use crate::listing::{Sort, filter_value};

/// A property with its type and status descriptions inlined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i32,
    #[schema(example = "12 Oak Street")]
    pub address: String,
    pub type_id: i32,
    /// Property type description
    #[serde(rename = "type")]
    #[schema(example = "Residential")]
    pub type_name: String,
    pub status_id: i32,
    /// Property status description
    #[serde(rename = "status")]
    #[schema(example = "Vacant")]
    pub status_name: String,
    #[schema(example = "2020-05-01")]
    pub purchase_date: NaiveDate,
    #[schema(value_type = f64, example = 250000.0)]
    pub price: Decimal,
}

/// Body for creating a property; every field is required
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProperty {
    #[validate(length(max = 255))]
    #[schema(example = "12 Oak Street")]
    pub address: Option<String>,
    #[serde(alias = "propertytypeid")]
    pub type_id: Option<i32>,
    #[serde(alias = "propertystatusid")]
    pub status_id: Option<i32>,
    /// `YYYY-MM-DD`
    #[serde(alias = "purchasedate")]
    #[schema(example = "2020-05-01")]
    pub purchase_date: Option<String>,
    #[schema(value_type = Option<f64>, example = 250000.0)]
    pub price: Option<Decimal>,
}

/// Body for a partial property update; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProperty {
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[serde(alias = "propertytypeid")]
    pub type_id: Option<i32>,
    #[serde(alias = "propertystatusid")]
    pub status_id: Option<i32>,
    #[serde(alias = "purchasedate")]
    pub purchase_date: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
}

/// Checked values for an insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub address: String,
    pub type_id: i32,
    pub status_id: i32,
    pub purchase_date: NaiveDate,
    pub price: Decimal,
}

/// Checked values for an update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyPatch {
    pub address: Option<String>,
    pub type_id: Option<i32>,
    pub status_id: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    pub price: Option<Decimal>,
}

impl CreateProperty {
    fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.type_id.is_none()
            && self.status_id.is_none()
            && self.purchase_date.is_none()
            && self.price.is_none()
    }

    pub fn into_new(self) -> PortfolioResult<NewProperty> {
        if self.is_empty() {
            return Err(no_data());
        }

        let mut missing = Vec::new();
        let address = required(self.address, "address", &mut missing);
        let type_id = required(self.type_id, "typeId", &mut missing);
        let status_id = required(self.status_id, "statusId", &mut missing);
        let purchase_date = required(self.purchase_date, "purchaseDate", &mut missing);
        let amount = required(self.price, "price", &mut missing);

        let (Some(address), Some(type_id), Some(status_id), Some(purchase_date), Some(amount)) =
            (address, type_id, status_id, purchase_date, amount)
        else {
            return Err(PortfolioError::missing_fields(&missing));
        };

        Ok(NewProperty {
            address: text(address, "address")?,
            type_id,
            status_id,
            purchase_date: date(&purchase_date, "purchaseDate")?,
            price: price(amount)?,
        })
    }
}

impl UpdateProperty {
    pub fn into_patch(self) -> PortfolioResult<PropertyPatch> {
        let patch = PropertyPatch {
            address: optional(self.address, |a| text(a, "address"))?,
            type_id: self.type_id,
            status_id: self.status_id,
            purchase_date: optional(self.purchase_date, |d| date(&d, "purchaseDate"))?,
            price: optional(self.price, price)?,
        };

        if patch == PropertyPatch::default() {
            return Err(no_data());
        }
        Ok(patch)
    }
}

/// Query parameters for listing properties
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PropertyFilter {
    /// Case-insensitive substring of the property type
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    /// Case-insensitive substring of the property status
    pub status: Option<String>,
    /// id, address, type, status, purchaseDate or price
    pub sort: Option<String>,
    /// asc (default) or desc
    pub order: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum PropertySortField {
    #[default]
    #[strum(serialize = "id")]
    Id,
    #[strum(serialize = "address")]
    Address,
    #[strum(serialize = "type")]
    Type,
    #[strum(serialize = "status")]
    Status,
    #[strum(serialize = "purchaseDate")]
    PurchaseDate,
    #[strum(serialize = "price")]
    Price,
}

/// Parsed list query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyQuery {
    pub type_contains: Option<String>,
    pub status_contains: Option<String>,
    pub sort: Sort<PropertySortField>,
}

impl PropertyFilter {
    pub fn into_query(self) -> PortfolioResult<PropertyQuery> {
        Ok(PropertyQuery {
            sort: Sort::parse(self.sort.as_deref(), self.order.as_deref())?,
            type_contains: filter_value(self.property_type),
            status_contains: filter_value(self.status),
        })
    }
}
