use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::EnumString;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{PortfolioError, PortfolioResult};
use crate::input::{date, no_data, optional, required, text};
use crate::listing::{Sort, filter_value};

/// A maintenance task with its status and property address inlined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    pub id: i32,
    #[schema(example = "Replace boiler")]
    pub description: String,
    pub status_id: i32,
    #[schema(example = "Scheduled")]
    pub status: String,
    #[schema(example = "2024-09-15")]
    pub scheduled_date: NaiveDate,
    pub property_id: i32,
    #[schema(example = "12 Oak Street")]
    pub property_address: String,
}

/// Body for scheduling a maintenance task; every field is required
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenance {
    #[schema(example = "Replace boiler")]
    pub description: Option<String>,
    #[serde(alias = "maintenancestatusid")]
    pub status_id: Option<i32>,
    /// `YYYY-MM-DD`
    #[serde(alias = "scheduleddate")]
    #[schema(example = "2024-09-15")]
    pub scheduled_date: Option<String>,
    #[serde(alias = "propertyid")]
    pub property_id: Option<i32>,
}

/// Body for a partial maintenance update
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaintenance {
    pub description: Option<String>,
    #[serde(alias = "maintenancestatusid")]
    pub status_id: Option<i32>,
    #[serde(alias = "scheduleddate")]
    pub scheduled_date: Option<String>,
    #[serde(alias = "propertyid")]
    pub property_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMaintenance {
    pub description: String,
    pub status_id: i32,
    pub scheduled_date: NaiveDate,
    pub property_id: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenancePatch {
    pub description: Option<String>,
    pub status_id: Option<i32>,
    pub scheduled_date: Option<NaiveDate>,
    pub property_id: Option<i32>,
}

impl CreateMaintenance {
    fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.status_id.is_none()
            && self.scheduled_date.is_none()
            && self.property_id.is_none()
    }

    pub fn into_new(self) -> PortfolioResult<NewMaintenance> {
        if self.is_empty() {
            return Err(no_data());
        }

        let mut missing = Vec::new();
        let description = required(self.description, "description", &mut missing);
        let status_id = required(self.status_id, "statusId", &mut missing);
        let scheduled_date = required(self.scheduled_date, "scheduledDate", &mut missing);
        let property_id = required(self.property_id, "propertyId", &mut missing);

        let (Some(description), Some(status_id), Some(scheduled_date), Some(property_id)) =
            (description, status_id, scheduled_date, property_id)
        else {
            return Err(PortfolioError::missing_fields(&missing));
        };

        Ok(NewMaintenance {
            description: text(description, "description")?,
            status_id,
            scheduled_date: date(&scheduled_date, "scheduledDate")?,
            property_id,
        })
    }
}

impl UpdateMaintenance {
    pub fn into_patch(self) -> PortfolioResult<MaintenancePatch> {
        let patch = MaintenancePatch {
            description: optional(self.description, |d| text(d, "description"))?,
            status_id: self.status_id,
            scheduled_date: optional(self.scheduled_date, |d| date(&d, "scheduledDate"))?,
            property_id: self.property_id,
        };

        if patch == MaintenancePatch::default() {
            return Err(no_data());
        }
        Ok(patch)
    }
}

/// Query parameters for listing maintenance tasks
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MaintenanceFilter {
    /// Case-insensitive substring of the maintenance status
    pub status: Option<String>,
    /// id, description, status, scheduledDate or propertyId
    pub sort: Option<String>,
    /// asc (default) or desc
    pub order: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum MaintenanceSortField {
    #[default]
    #[strum(serialize = "id")]
    Id,
    #[strum(serialize = "description")]
    Description,
    #[strum(serialize = "status")]
    Status,
    #[strum(serialize = "scheduledDate")]
    ScheduledDate,
    #[strum(serialize = "propertyId")]
    PropertyId,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceQuery {
    pub status_contains: Option<String>,
    pub sort: Sort<MaintenanceSortField>,
}

impl MaintenanceFilter {
    pub fn into_query(self) -> PortfolioResult<MaintenanceQuery> {
        Ok(MaintenanceQuery {
            status_contains: filter_value(self.status),
            sort: Sort::parse(self.sort.as_deref(), self.order.as_deref())?,
        })
    }
}
