use sea_orm::entity::prelude::*;

use crate::guard::{BookedLease, DateRange};
use crate::lookups::entity::payment_status;
use crate::{properties, tenants};

/// Sea-ORM Entity for the leases table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tenant_id: i32,
    pub property_id: i32,
    pub start_date: Date,
    pub end_date: Date,
    pub payment_status_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "tenants::entity::Entity",
        from = "Column::TenantId",
        to = "tenants::entity::Column::Id"
    )]
    Tenant,
    #[sea_orm(
        belongs_to = "properties::entity::Entity",
        from = "Column::PropertyId",
        to = "properties::entity::Column::Id"
    )]
    Property,
    #[sea_orm(
        belongs_to = "payment_status::Entity",
        from = "Column::PaymentStatusId",
        to = "payment_status::Column::Id"
    )]
    PaymentStatus,
}

impl Related<tenants::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl Related<properties::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl Related<payment_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentStatus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The stored term; rows are only written after `DateRange::new` accepted them.
    pub fn term(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }

    pub fn booked(&self) -> BookedLease {
        BookedLease {
            id: self.id,
            property_id: self.property_id,
            term: self.term(),
        }
    }
}
