use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PropertyTypes::Table)
                    .if_not_exists()
                    .col(pk_auto(PropertyTypes::Id))
                    .col(string_len_uniq(PropertyTypes::Description, 50))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PropertyStatuses::Table)
                    .if_not_exists()
                    .col(pk_auto(PropertyStatuses::Id))
                    .col(string_len_uniq(PropertyStatuses::Description, 50))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PaymentStatuses::Table)
                    .if_not_exists()
                    .col(pk_auto(PaymentStatuses::Id))
                    .col(string_len_uniq(PaymentStatuses::Description, 50))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MaintenanceStatuses::Table)
                    .if_not_exists()
                    .col(pk_auto(MaintenanceStatuses::Id))
                    .col(string_len_uniq(MaintenanceStatuses::Description, 50))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MaintenanceStatuses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PaymentStatuses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PropertyStatuses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PropertyTypes::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PropertyTypes {
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
pub enum PropertyStatuses {
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
pub enum PaymentStatuses {
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
pub enum MaintenanceStatuses {
    Table,
    Id,
    Description,
}
