use serde::{Deserialize, Serialize};
use strum::EnumString;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{PortfolioError, PortfolioResult};
use crate::input::{no_data, optional, required, text};

/// A tenant and the number of leases they hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: i32,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub contact_info: String,
    pub lease_count: i64,
}

/// Body for creating a tenant; both fields are required
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenant {
    #[validate(length(max = 100))]
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    #[serde(alias = "contactinfo")]
    #[validate(length(max = 100))]
    #[schema(example = "jane@example.com")]
    pub contact_info: Option<String>,
}

/// Body for a partial tenant update
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTenant {
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[serde(alias = "contactinfo")]
    #[validate(length(max = 100))]
    pub contact_info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTenant {
    pub name: String,
    pub contact_info: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantPatch {
    pub name: Option<String>,
    pub contact_info: Option<String>,
}

impl CreateTenant {
    pub fn into_new(self) -> PortfolioResult<NewTenant> {
        if self.name.is_none() && self.contact_info.is_none() {
            return Err(no_data());
        }

        let mut missing = Vec::new();
        let name = required(self.name, "name", &mut missing);
        let contact_info = required(self.contact_info, "contactInfo", &mut missing);

        let (Some(name), Some(contact_info)) = (name, contact_info) else {
            return Err(PortfolioError::missing_fields(&missing));
        };

        Ok(NewTenant {
            name: text(name, "name")?,
            contact_info: text(contact_info, "contactInfo")?,
        })
    }
}

impl UpdateTenant {
    pub fn into_patch(self) -> PortfolioResult<TenantPatch> {
        let patch = TenantPatch {
            name: optional(self.name, |n| text(n, "name"))?,
            contact_info: optional(self.contact_info, |c| text(c, "contactInfo"))?,
        };

        if patch == TenantPatch::default() {
            return Err(no_data());
        }
        Ok(patch)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TenantSortField {
    #[default]
    #[strum(serialize = "id")]
    Id,
    #[strum(serialize = "name")]
    Name,
    #[strum(serialize = "contactInfo")]
    ContactInfo,
}

impl TenantSortField {
    /// Qualified column in the tenant listing query.
    pub fn column(self) -> &'static str {
        match self {
            TenantSortField::Id => "t.id",
            TenantSortField::Name => "t.name",
            TenantSortField::ContactInfo => "t.contact_info",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_accepts_lowercase_alias() {
        let input: CreateTenant =
            serde_json::from_str(r#"{"name":"Jane","contactinfo":"555-0100"}"#).unwrap();
        let new = input.into_new().unwrap();
        assert_eq!(new.contact_info, "555-0100");
    }

    #[test]
    fn test_missing_contact_is_reported() {
        let err = CreateTenant {
            name: Some("Jane".into()),
            contact_info: None,
        }
        .into_new()
        .unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: contactInfo");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let err = CreateTenant {
            name: Some("  ".into()),
            contact_info: Some("x".into()),
        }
        .into_new()
        .unwrap_err();
        assert_eq!(err.to_string(), "name must not be empty");
    }

    #[test]
    fn test_overlong_name_fails_validation() {
        let input = CreateTenant {
            name: Some("n".repeat(101)),
            contact_info: Some("x".into()),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_empty_update_reports_no_data() {
        assert_eq!(
            UpdateTenant::default().into_patch().unwrap_err().to_string(),
            "No data provided"
        );
    }

    #[test]
    fn test_sort_field_parses_camel_case() {
        assert_eq!(
            "contactinfo".parse::<TenantSortField>().unwrap(),
            TenantSortField::ContactInfo
        );
    }

    #[test]
    fn test_response_is_camel_case() {
        let tenant = Tenant {
            id: 1,
            name: "Jane".into(),
            contact_info: "555".into(),
            lease_count: 2,
        };
        let value = serde_json::to_value(&tenant).unwrap();
        assert_eq!(value["contactInfo"], "555");
        assert_eq!(value["leaseCount"], 2);
    }
}
