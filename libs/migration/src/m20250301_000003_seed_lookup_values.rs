use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const SEEDS: &[(&str, &[&str])] = &[
    ("property_types", &["Residential", "Commercial"]),
    ("property_statuses", &["Vacant", "Occupied"]),
    ("payment_statuses", &["Paid", "Pending", "Overdue"]),
    ("maintenance_statuses", &["Scheduled", "In Progress", "Completed"]),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        for (table, descriptions) in SEEDS {
            let values = descriptions
                .iter()
                .map(|d| format!("('{}')", d))
                .collect::<Vec<_>>()
                .join(", ");

            db.execute_unprepared(&format!(
                "INSERT INTO {table} (description) VALUES {values} ON CONFLICT (description) DO NOTHING"
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        for (table, descriptions) in SEEDS {
            let values = descriptions
                .iter()
                .map(|d| format!("'{}'", d))
                .collect::<Vec<_>>()
                .join(", ");

            db.execute_unprepared(&format!(
                "DELETE FROM {table} WHERE description IN ({values})"
            ))
            .await?;
        }

        Ok(())
    }
}
