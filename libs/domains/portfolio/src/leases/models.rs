use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::EnumString;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{PortfolioError, PortfolioResult};
use crate::guard::DateRange;
use crate::input::{date, no_data, optional, required};
use crate::listing::{Sort, filter_value};

/// A lease with tenant name, property address and payment status inlined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    pub id: i32,
    pub tenant_id: i32,
    #[schema(example = "Jane Doe")]
    pub tenant_name: String,
    pub property_id: i32,
    #[schema(example = "12 Oak Street")]
    pub property_address: String,
    #[schema(example = "2024-01-01")]
    pub lease_start: NaiveDate,
    #[schema(example = "2024-12-31")]
    pub lease_end: NaiveDate,
    pub payment_status_id: i32,
    #[schema(example = "Paid")]
    pub payment_status: String,
}

/// Body for creating a lease; every field is required
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLease {
    #[serde(alias = "tenantid")]
    pub tenant_id: Option<i32>,
    #[serde(alias = "propertyid")]
    pub property_id: Option<i32>,
    /// `YYYY-MM-DD`, first day of the lease
    #[serde(alias = "leasetermstart")]
    #[schema(example = "2024-01-01")]
    pub lease_start: Option<String>,
    /// `YYYY-MM-DD`, last day of the lease (inclusive)
    #[serde(alias = "leasetermend")]
    #[schema(example = "2024-12-31")]
    pub lease_end: Option<String>,
    #[serde(alias = "paymentstatusid")]
    pub payment_status_id: Option<i32>,
}

/// Body for a partial lease update; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLease {
    #[serde(alias = "tenantid")]
    pub tenant_id: Option<i32>,
    #[serde(alias = "propertyid")]
    pub property_id: Option<i32>,
    #[serde(alias = "leasetermstart")]
    pub lease_start: Option<String>,
    #[serde(alias = "leasetermend")]
    pub lease_end: Option<String>,
    #[serde(alias = "paymentstatusid")]
    pub payment_status_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLease {
    pub tenant_id: i32,
    pub property_id: i32,
    pub term: DateRange,
    pub payment_status_id: i32,
}

/// Checked update values. The term is only validated once merged with the stored lease.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeasePatch {
    pub tenant_id: Option<i32>,
    pub property_id: Option<i32>,
    pub lease_start: Option<NaiveDate>,
    pub lease_end: Option<NaiveDate>,
    pub payment_status_id: Option<i32>,
}

impl LeasePatch {
    /// Term after the patch, falling back to `current` for unsupplied fields.
    pub fn merged_term(&self, current: DateRange) -> PortfolioResult<DateRange> {
        DateRange::new(
            self.lease_start.unwrap_or(current.start),
            self.lease_end.unwrap_or(current.end),
        )
    }
}

impl CreateLease {
    fn is_empty(&self) -> bool {
        self.tenant_id.is_none()
            && self.property_id.is_none()
            && self.lease_start.is_none()
            && self.lease_end.is_none()
            && self.payment_status_id.is_none()
    }

    pub fn into_new(self) -> PortfolioResult<NewLease> {
        if self.is_empty() {
            return Err(no_data());
        }

        let mut missing = Vec::new();
        let tenant_id = required(self.tenant_id, "tenantId", &mut missing);
        let property_id = required(self.property_id, "propertyId", &mut missing);
        let lease_start = required(self.lease_start, "leaseStart", &mut missing);
        let lease_end = required(self.lease_end, "leaseEnd", &mut missing);
        let payment_status_id = required(self.payment_status_id, "paymentStatusId", &mut missing);

        let (
            Some(tenant_id),
            Some(property_id),
            Some(lease_start),
            Some(lease_end),
            Some(payment_status_id),
        ) = (tenant_id, property_id, lease_start, lease_end, payment_status_id)
        else {
            return Err(PortfolioError::missing_fields(&missing));
        };

        let term = DateRange::new(
            date(&lease_start, "leaseStart")?,
            date(&lease_end, "leaseEnd")?,
        )?;

        Ok(NewLease {
            tenant_id,
            property_id,
            term,
            payment_status_id,
        })
    }
}

impl UpdateLease {
    pub fn into_patch(self) -> PortfolioResult<LeasePatch> {
        let patch = LeasePatch {
            tenant_id: self.tenant_id,
            property_id: self.property_id,
            lease_start: optional(self.lease_start, |d| date(&d, "leaseStart"))?,
            lease_end: optional(self.lease_end, |d| date(&d, "leaseEnd"))?,
            payment_status_id: self.payment_status_id,
        };

        if patch == LeasePatch::default() {
            return Err(no_data());
        }
        Ok(patch)
    }
}

/// Query parameters for listing leases
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaseFilter {
    /// Case-insensitive substring of the payment status
    pub status: Option<String>,
    /// id, tenantName, propertyAddress, leaseStart, leaseEnd or status
    pub sort: Option<String>,
    /// asc (default) or desc
    pub order: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum LeaseSortField {
    #[default]
    #[strum(serialize = "id")]
    Id,
    #[strum(serialize = "tenantName")]
    TenantName,
    #[strum(serialize = "propertyAddress")]
    PropertyAddress,
    #[strum(serialize = "leaseStart")]
    LeaseStart,
    #[strum(serialize = "leaseEnd")]
    LeaseEnd,
    #[strum(serialize = "status")]
    Status,
}

/// Parsed list query, optionally scoped to one tenant or property
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaseQuery {
    pub tenant_id: Option<i32>,
    pub property_id: Option<i32>,
    pub status_contains: Option<String>,
    pub sort: Sort<LeaseSortField>,
}

impl LeaseFilter {
    pub fn into_query(self) -> PortfolioResult<LeaseQuery> {
        Ok(LeaseQuery {
            tenant_id: None,
            property_id: None,
            status_contains: filter_value(self.status),
            sort: Sort::parse(self.sort.as_deref(), self.order.as_deref())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_create_accepts_original_field_names() {
        let input: CreateLease = serde_json::from_str(
            r#"{"tenantid":1,"propertyid":2,"leasetermstart":"2024-01-01","leasetermend":"2024-12-31","paymentstatusid":1}"#,
        )
        .unwrap();
        let new = input.into_new().unwrap();
        assert_eq!(new.property_id, 2);
        assert_eq!(new.term.start, day("2024-01-01"));
        assert_eq!(new.term.end, day("2024-12-31"));
    }

    #[test]
    fn test_missing_fields_listed_in_order() {
        let input = CreateLease {
            tenant_id: Some(1),
            property_id: Some(1),
            ..Default::default()
        };
        assert_eq!(
            input.into_new().unwrap_err().to_string(),
            "Missing required fields: leaseStart, leaseEnd, paymentStatusId"
        );
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let input = CreateLease {
            tenant_id: Some(1),
            property_id: Some(1),
            lease_start: Some("2024-06-01".into()),
            lease_end: Some("2024-05-31".into()),
            payment_status_id: Some(1),
        };
        assert!(matches!(input.into_new(), Err(PortfolioError::Validation(_))));
    }

    #[test]
    fn test_bad_date_names_the_field() {
        let input = UpdateLease {
            lease_end: Some("31/12/2024".into()),
            ..Default::default()
        };
        let err = input.into_patch().unwrap_err().to_string();
        assert!(err.contains("leaseEnd"), "{}", err);
    }

    #[test]
    fn test_merged_term_falls_back_to_current() {
        let current = DateRange::new(day("2024-01-01"), day("2024-12-31")).unwrap();
        let patch = LeasePatch {
            lease_end: Some(day("2025-06-30")),
            ..Default::default()
        };
        let merged = patch.merged_term(current).unwrap();
        assert_eq!(merged.start, day("2024-01-01"));
        assert_eq!(merged.end, day("2025-06-30"));

        let inverted = LeasePatch {
            lease_start: Some(day("2025-01-01")),
            ..Default::default()
        };
        assert!(inverted.merged_term(current).is_err());
    }

    #[test]
    fn test_sort_fields() {
        let query = LeaseFilter {
            status: Some("paid".into()),
            sort: Some("propertyaddress".into()),
            order: Some("desc".into()),
        }
        .into_query()
        .unwrap();
        assert_eq!(query.sort.field, LeaseSortField::PropertyAddress);
        assert_eq!(query.status_contains.as_deref(), Some("paid"));
    }
}
