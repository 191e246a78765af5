use sea_orm::entity::prelude::*;

use crate::lookups::entity::{property_status, property_type};

/// Sea-ORM Entity for the properties table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub address: String,
    pub property_type_id: i32,
    pub property_status_id: i32,
    pub purchase_date: Date,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "property_type::Entity",
        from = "Column::PropertyTypeId",
        to = "property_type::Column::Id"
    )]
    PropertyType,
    #[sea_orm(
        belongs_to = "property_status::Entity",
        from = "Column::PropertyStatusId",
        to = "property_status::Column::Id"
    )]
    PropertyStatus,
}

impl Related<property_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyType.def()
    }
}

impl Related<property_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyStatus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
