use async_trait::async_trait;
use chrono::NaiveDate;
use database::postgres::{DatabaseConnection, UnitOfWork};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType, Order,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};

use super::entity::{self, Column, Entity, Relation};
use super::models::{
    Maintenance, MaintenancePatch, MaintenanceQuery, MaintenanceSortField, NewMaintenance,
};
use super::repository::MaintenanceRepository;
use crate::error::{PortfolioError, PortfolioResult};
use crate::listing::like_pattern;
use crate::lookups::LookupKind;
use crate::lookups::entity::maintenance_status;
use crate::properties;

/// PostgreSQL implementation of MaintenanceRepository
#[derive(Clone)]
pub struct PgMaintenanceRepository {
    db: DatabaseConnection,
}

impl PgMaintenanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct MaintenanceRow {
    id: i32,
    description: String,
    status_id: i32,
    status: String,
    scheduled_date: NaiveDate,
    property_id: i32,
    property_address: String,
}

impl From<MaintenanceRow> for Maintenance {
    fn from(row: MaintenanceRow) -> Self {
        Self {
            id: row.id,
            description: row.description,
            status_id: row.status_id,
            status: row.status,
            scheduled_date: row.scheduled_date,
            property_id: row.property_id,
            property_address: row.property_address,
        }
    }
}

fn joined() -> Select<Entity> {
    Entity::find()
        .select_only()
        .column(Column::Id)
        .column(Column::Description)
        .column_as(Column::MaintenanceStatusId, "status_id")
        .column_as(maintenance_status::Column::Description, "status")
        .column(Column::ScheduledDate)
        .column(Column::PropertyId)
        .column_as(properties::entity::Column::Address, "property_address")
        .join(JoinType::InnerJoin, Relation::Status.def())
        .join(JoinType::InnerJoin, Relation::Property.def())
}

async fn check_references<C: ConnectionTrait>(
    conn: &C,
    status_id: Option<i32>,
    property_id: Option<i32>,
) -> PortfolioResult<()> {
    if let Some(id) = status_id {
        if maintenance_status::Entity::find_by_id(id).one(conn).await?.is_none() {
            return Err(PortfolioError::missing_reference(
                LookupKind::MaintenanceStatus.label(),
                id,
            ));
        }
    }
    if let Some(id) = property_id {
        if properties::entity::Entity::find_by_id(id).one(conn).await?.is_none() {
            return Err(PortfolioError::missing_reference("property", id));
        }
    }
    Ok(())
}

async fn insert<C: ConnectionTrait>(conn: &C, input: NewMaintenance) -> PortfolioResult<i32> {
    check_references(conn, Some(input.status_id), Some(input.property_id)).await?;

    let model = entity::ActiveModel {
        id: NotSet,
        description: Set(input.description),
        maintenance_status_id: Set(input.status_id),
        scheduled_date: Set(input.scheduled_date),
        property_id: Set(input.property_id),
    }
    .insert(conn)
    .await?;

    Ok(model.id)
}

async fn apply_patch<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    patch: MaintenancePatch,
) -> PortfolioResult<bool> {
    let Some(existing) = Entity::find_by_id(id).lock_exclusive().one(conn).await? else {
        return Ok(false);
    };
    check_references(conn, patch.status_id, patch.property_id).await?;

    let mut model: entity::ActiveModel = existing.into();
    if let Some(description) = patch.description {
        model.description = Set(description);
    }
    if let Some(status_id) = patch.status_id {
        model.maintenance_status_id = Set(status_id);
    }
    if let Some(scheduled_date) = patch.scheduled_date {
        model.scheduled_date = Set(scheduled_date);
    }
    if let Some(property_id) = patch.property_id {
        model.property_id = Set(property_id);
    }
    model.update(conn).await?;

    Ok(true)
}

#[async_trait]
impl MaintenanceRepository for PgMaintenanceRepository {
    async fn list(&self, query: MaintenanceQuery) -> PortfolioResult<Vec<Maintenance>> {
        let mut select = joined();

        if let Some(needle) = query.status_contains.as_deref() {
            select = select.filter(Expr::cust_with_values(
                "LOWER(maintenance_statuses.description) LIKE $1",
                [like_pattern(needle)],
            ));
        }

        let order: Order = query.sort.order.into();
        select = match query.sort.field {
            MaintenanceSortField::Id => select.order_by(Column::Id, order),
            MaintenanceSortField::Description => select.order_by(Column::Description, order),
            MaintenanceSortField::Status => {
                select.order_by(maintenance_status::Column::Description, order)
            }
            MaintenanceSortField::ScheduledDate => select.order_by(Column::ScheduledDate, order),
            MaintenanceSortField::PropertyId => select.order_by(Column::PropertyId, order),
        };

        let rows = select
            .order_by_asc(Column::Id)
            .into_model::<MaintenanceRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: i32) -> PortfolioResult<Option<Maintenance>> {
        let row = joined()
            .filter(Column::Id.eq(id))
            .into_model::<MaintenanceRow>()
            .one(&self.db)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, input: NewMaintenance) -> PortfolioResult<i32> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let outcome = insert(uow.conn(), input).await;
        let id = uow.finish(outcome).await?;

        tracing::info!(maintenance_id = id, "Created maintenance task");
        Ok(id)
    }

    async fn update(&self, id: i32, patch: MaintenancePatch) -> PortfolioResult<bool> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let outcome = apply_patch(uow.conn(), id, patch).await;
        let updated = uow.finish(outcome).await?;

        if updated {
            tracing::info!(maintenance_id = id, "Updated maintenance task");
        }
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> PortfolioResult<bool> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let outcome: PortfolioResult<bool> = Entity::delete_by_id(id)
            .exec(uow.conn())
            .await
            .map(|result| result.rows_affected > 0)
            .map_err(Into::into);
        let deleted = uow.finish(outcome).await?;

        if deleted {
            tracing::info!(maintenance_id = id, "Deleted maintenance task");
        }
        Ok(deleted)
    }
}
