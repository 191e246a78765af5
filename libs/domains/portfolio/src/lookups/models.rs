use serde::{Deserialize, Serialize};
use strum::EnumString;
use utoipa::ToSchema;
use validator::Validate;

/// The four reference tables. Each is served by the same handlers under its own mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    PropertyType,
    PropertyStatus,
    PaymentStatus,
    MaintenanceStatus,
}

/// Rows in another table that point at a lookup value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupReference {
    pub table: &'static str,
    pub column: &'static str,
    pub noun: &'static str,
}

impl LookupKind {
    pub const ALL: [LookupKind; 4] = [
        LookupKind::PropertyType,
        LookupKind::PropertyStatus,
        LookupKind::PaymentStatus,
        LookupKind::MaintenanceStatus,
    ];

    /// Name used in response messages, e.g. `PropertyType created successfully`.
    pub fn resource(self) -> &'static str {
        match self {
            LookupKind::PropertyType => "PropertyType",
            LookupKind::PropertyStatus => "PropertyStatus",
            LookupKind::PaymentStatus => "PaymentStatus",
            LookupKind::MaintenanceStatus => "MaintenanceStatus",
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            LookupKind::PropertyType => "property_types",
            LookupKind::PropertyStatus => "property_statuses",
            LookupKind::PaymentStatus => "payment_statuses",
            LookupKind::MaintenanceStatus => "maintenance_statuses",
        }
    }

    /// Mount point under `/api`.
    pub fn path(self) -> &'static str {
        match self {
            LookupKind::PropertyType => "/property_type",
            LookupKind::PropertyStatus => "/property_status",
            LookupKind::PaymentStatus => "/payment_status",
            LookupKind::MaintenanceStatus => "/maintenance_status",
        }
    }

    /// Lower-case label for conflict messages.
    pub fn label(self) -> &'static str {
        match self {
            LookupKind::PropertyType => "property type",
            LookupKind::PropertyStatus => "property status",
            LookupKind::PaymentStatus => "payment status",
            LookupKind::MaintenanceStatus => "maintenance status",
        }
    }

    pub fn referenced_by(self) -> LookupReference {
        match self {
            LookupKind::PropertyType => LookupReference {
                table: "properties",
                column: "property_type_id",
                noun: "property(ies)",
            },
            LookupKind::PropertyStatus => LookupReference {
                table: "properties",
                column: "property_status_id",
                noun: "property(ies)",
            },
            LookupKind::PaymentStatus => LookupReference {
                table: "leases",
                column: "payment_status_id",
                noun: "lease(s)",
            },
            LookupKind::MaintenanceStatus => LookupReference {
                table: "maintenance",
                column: "maintenance_status_id",
                noun: "maintenance task(s)",
            },
        }
    }

    pub(crate) fn duplicate(self, description: &str) -> crate::PortfolioError {
        crate::PortfolioError::Conflict(format!(
            "{} '{}' already exists",
            self.resource(),
            description
        ))
    }
}

/// A lookup value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Lookup {
    pub id: i32,
    pub description: String,
}

/// Body for creating or renaming a lookup value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct LookupInput {
    #[serde(alias = "Description")]
    #[validate(length(max = 50))]
    #[schema(example = "Under Renovation")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum LookupSortField {
    #[default]
    #[strum(serialize = "id")]
    Id,
    #[strum(serialize = "description")]
    Description,
}

impl LookupSortField {
    pub fn column(self) -> &'static str {
        match self {
            LookupSortField::Id => "id",
            LookupSortField::Description => "description",
        }
    }
}
