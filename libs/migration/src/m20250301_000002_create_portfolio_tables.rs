use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_lookup_tables::{
    MaintenanceStatuses, PaymentStatuses, PropertyStatuses, PropertyTypes,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Every reference is RESTRICT: dependents must be removed explicitly first.
fn restrict(fk: &mut ForeignKeyCreateStatement) -> ForeignKeyCreateStatement {
    fk.on_delete(ForeignKeyAction::Restrict)
        .on_update(ForeignKeyAction::NoAction)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(pk_auto(Properties::Id))
                    .col(string_len(Properties::Address, 255))
                    .col(integer(Properties::PropertyTypeId))
                    .col(integer(Properties::PropertyStatusId))
                    .col(date(Properties::PurchaseDate))
                    .col(decimal_len(Properties::Price, 15, 2))
                    .foreign_key(&mut restrict(
                        ForeignKey::create()
                            .name("fk_properties_property_type")
                            .from(Properties::Table, Properties::PropertyTypeId)
                            .to(PropertyTypes::Table, PropertyTypes::Id),
                    ))
                    .foreign_key(&mut restrict(
                        ForeignKey::create()
                            .name("fk_properties_property_status")
                            .from(Properties::Table, Properties::PropertyStatusId)
                            .to(PropertyStatuses::Table, PropertyStatuses::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tenants::Table)
                    .if_not_exists()
                    .col(pk_auto(Tenants::Id))
                    .col(string_len(Tenants::Name, 100))
                    .col(string_len(Tenants::ContactInfo, 100))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Leases::Table)
                    .if_not_exists()
                    .col(pk_auto(Leases::Id))
                    .col(integer(Leases::TenantId))
                    .col(integer(Leases::PropertyId))
                    .col(date(Leases::StartDate))
                    .col(date(Leases::EndDate))
                    .col(integer(Leases::PaymentStatusId))
                    .foreign_key(&mut restrict(
                        ForeignKey::create()
                            .name("fk_leases_tenant")
                            .from(Leases::Table, Leases::TenantId)
                            .to(Tenants::Table, Tenants::Id),
                    ))
                    .foreign_key(&mut restrict(
                        ForeignKey::create()
                            .name("fk_leases_property")
                            .from(Leases::Table, Leases::PropertyId)
                            .to(Properties::Table, Properties::Id),
                    ))
                    .foreign_key(&mut restrict(
                        ForeignKey::create()
                            .name("fk_leases_payment_status")
                            .from(Leases::Table, Leases::PaymentStatusId)
                            .to(PaymentStatuses::Table, PaymentStatuses::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Maintenance::Table)
                    .if_not_exists()
                    .col(pk_auto(Maintenance::Id))
                    .col(text(Maintenance::Description))
                    .col(integer(Maintenance::MaintenanceStatusId))
                    .col(date(Maintenance::ScheduledDate))
                    .col(integer(Maintenance::PropertyId))
                    .foreign_key(&mut restrict(
                        ForeignKey::create()
                            .name("fk_maintenance_status")
                            .from(Maintenance::Table, Maintenance::MaintenanceStatusId)
                            .to(MaintenanceStatuses::Table, MaintenanceStatuses::Id),
                    ))
                    .foreign_key(&mut restrict(
                        ForeignKey::create()
                            .name("fk_maintenance_property")
                            .from(Maintenance::Table, Maintenance::PropertyId)
                            .to(Properties::Table, Properties::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        // Overlap checks read every lease of one property
        manager
            .create_index(
                Index::create()
                    .name("idx_leases_property_start")
                    .table(Leases::Table)
                    .col(Leases::PropertyId)
                    .col(Leases::StartDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leases_tenant_id")
                    .table(Leases::Table)
                    .col(Leases::TenantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leases_payment_status_id")
                    .table(Leases::Table)
                    .col(Leases::PaymentStatusId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_maintenance_property_id")
                    .table(Maintenance::Table)
                    .col(Maintenance::PropertyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_maintenance_status_id")
                    .table(Maintenance::Table)
                    .col(Maintenance::MaintenanceStatusId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_property_type_id")
                    .table(Properties::Table)
                    .col(Properties::PropertyTypeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_property_status_id")
                    .table(Properties::Table)
                    .col(Properties::PropertyStatusId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Maintenance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Leases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tenants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
    Address,
    PropertyTypeId,
    PropertyStatusId,
    PurchaseDate,
    Price,
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
    Name,
    ContactInfo,
}

#[derive(DeriveIden)]
enum Leases {
    Table,
    Id,
    TenantId,
    PropertyId,
    StartDate,
    EndDate,
    PaymentStatusId,
}

#[derive(DeriveIden)]
enum Maintenance {
    Table,
    Id,
    Description,
    MaintenanceStatusId,
    ScheduledDate,
    PropertyId,
}
