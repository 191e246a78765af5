use sea_orm::entity::prelude::*;

use crate::lookups::entity::maintenance_status;
use crate::properties;

/// Sea-ORM Entity for the maintenance table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "maintenance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub maintenance_status_id: i32,
    pub scheduled_date: Date,
    pub property_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "maintenance_status::Entity",
        from = "Column::MaintenanceStatusId",
        to = "maintenance_status::Column::Id"
    )]
    Status,
    #[sea_orm(
        belongs_to = "properties::entity::Entity",
        from = "Column::PropertyId",
        to = "properties::entity::Column::Id"
    )]
    Property,
}

impl Related<maintenance_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Status.def()
    }
}

impl Related<properties::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
