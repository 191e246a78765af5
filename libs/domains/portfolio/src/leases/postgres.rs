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
use super::models::{Lease, LeasePatch, LeaseQuery, LeaseSortField, NewLease};
use super::repository::LeaseRepository;
use crate::error::{PortfolioError, PortfolioResult};
use crate::guard::{BookedLease, DateRange, OVERLAP_ON_CREATE, OVERLAP_ON_UPDATE, find_conflicting_lease};
use crate::listing::like_pattern;
use crate::lookups::LookupKind;
use crate::lookups::entity::payment_status;
use crate::{properties, tenants};

/// PostgreSQL implementation of LeaseRepository.
///
/// Writes lock the target property row before reading its leases, so
/// concurrent writers on one property run their overlap checks in turn.
#[derive(Clone)]
pub struct PgLeaseRepository {
    db: DatabaseConnection,
}

impl PgLeaseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct LeaseRow {
    id: i32,
    tenant_id: i32,
    tenant_name: String,
    property_id: i32,
    property_address: String,
    lease_start: NaiveDate,
    lease_end: NaiveDate,
    payment_status_id: i32,
    payment_status: String,
}

impl From<LeaseRow> for Lease {
    fn from(row: LeaseRow) -> Self {
        Self {
            id: row.id,
            tenant_id: row.tenant_id,
            tenant_name: row.tenant_name,
            property_id: row.property_id,
            property_address: row.property_address,
            lease_start: row.lease_start,
            lease_end: row.lease_end,
            payment_status_id: row.payment_status_id,
            payment_status: row.payment_status,
        }
    }
}

fn joined() -> Select<Entity> {
    Entity::find()
        .select_only()
        .column(Column::Id)
        .column(Column::TenantId)
        .column_as(tenants::entity::Column::Name, "tenant_name")
        .column(Column::PropertyId)
        .column_as(properties::entity::Column::Address, "property_address")
        .column_as(Column::StartDate, "lease_start")
        .column_as(Column::EndDate, "lease_end")
        .column(Column::PaymentStatusId)
        .column_as(payment_status::Column::Description, "payment_status")
        .join(JoinType::InnerJoin, Relation::Tenant.def())
        .join(JoinType::InnerJoin, Relation::Property.def())
        .join(JoinType::InnerJoin, Relation::PaymentStatus.def())
}

/// Locks the property row for the rest of the unit of work.
async fn lock_property<C: ConnectionTrait>(conn: &C, property_id: i32) -> PortfolioResult<()> {
    let property = properties::entity::Entity::find_by_id(property_id)
        .lock_exclusive()
        .one(conn)
        .await?;

    match property {
        Some(_) => Ok(()),
        None => Err(PortfolioError::missing_reference("property", property_id)),
    }
}

async fn check_references<C: ConnectionTrait>(
    conn: &C,
    tenant_id: Option<i32>,
    payment_status_id: Option<i32>,
) -> PortfolioResult<()> {
    if let Some(id) = tenant_id {
        if tenants::entity::Entity::find_by_id(id).one(conn).await?.is_none() {
            return Err(PortfolioError::missing_reference("tenant", id));
        }
    }
    if let Some(id) = payment_status_id {
        if payment_status::Entity::find_by_id(id).one(conn).await?.is_none() {
            return Err(PortfolioError::missing_reference(LookupKind::PaymentStatus.label(), id));
        }
    }
    Ok(())
}

async fn leases_on<C: ConnectionTrait>(
    conn: &C,
    property_id: i32,
) -> PortfolioResult<Vec<BookedLease>> {
    let models = Entity::find()
        .filter(Column::PropertyId.eq(property_id))
        .all(conn)
        .await?;

    Ok(models.iter().map(entity::Model::booked).collect())
}

async fn insert<C: ConnectionTrait>(conn: &C, input: NewLease) -> PortfolioResult<i32> {
    lock_property(conn, input.property_id).await?;
    check_references(conn, Some(input.tenant_id), Some(input.payment_status_id)).await?;

    let leases = leases_on(conn, input.property_id).await?;
    if let Some(existing) = find_conflicting_lease(input.property_id, &input.term, None, &leases) {
        tracing::warn!(
            property_id = input.property_id,
            conflicting_lease_id = existing.id,
            "Lease create rejected: overlapping term"
        );
        return Err(PortfolioError::Conflict(OVERLAP_ON_CREATE.to_string()));
    }

    let model = entity::ActiveModel {
        id: NotSet,
        tenant_id: Set(input.tenant_id),
        property_id: Set(input.property_id),
        start_date: Set(input.term.start),
        end_date: Set(input.term.end),
        payment_status_id: Set(input.payment_status_id),
    }
    .insert(conn)
    .await?;

    Ok(model.id)
}

async fn apply_patch<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    patch: LeasePatch,
) -> PortfolioResult<bool> {
    let Some(current) = Entity::find_by_id(id).lock_exclusive().one(conn).await? else {
        return Ok(false);
    };

    let property_id = patch.property_id.unwrap_or(current.property_id);
    let term: DateRange = patch.merged_term(current.term())?;

    lock_property(conn, property_id).await?;
    check_references(conn, patch.tenant_id, patch.payment_status_id).await?;

    let leases = leases_on(conn, property_id).await?;
    if let Some(existing) = find_conflicting_lease(property_id, &term, Some(id), &leases) {
        tracing::warn!(
            lease_id = id,
            property_id,
            conflicting_lease_id = existing.id,
            "Lease update rejected: overlapping term"
        );
        return Err(PortfolioError::Conflict(OVERLAP_ON_UPDATE.to_string()));
    }

    let mut model: entity::ActiveModel = current.into();
    if let Some(tenant_id) = patch.tenant_id {
        model.tenant_id = Set(tenant_id);
    }
    if let Some(payment_status_id) = patch.payment_status_id {
        model.payment_status_id = Set(payment_status_id);
    }
    model.property_id = Set(property_id);
    model.start_date = Set(term.start);
    model.end_date = Set(term.end);
    model.update(conn).await?;

    Ok(true)
}

#[async_trait]
impl LeaseRepository for PgLeaseRepository {
    async fn list(&self, query: LeaseQuery) -> PortfolioResult<Vec<Lease>> {
        let mut select = joined();

        if let Some(tenant_id) = query.tenant_id {
            select = select.filter(Column::TenantId.eq(tenant_id));
        }
        if let Some(property_id) = query.property_id {
            select = select.filter(Column::PropertyId.eq(property_id));
        }
        if let Some(needle) = query.status_contains.as_deref() {
            select = select.filter(Expr::cust_with_values(
                "LOWER(payment_statuses.description) LIKE $1",
                [like_pattern(needle)],
            ));
        }

        let order: Order = query.sort.order.into();
        select = match query.sort.field {
            LeaseSortField::Id => select.order_by(Column::Id, order),
            LeaseSortField::TenantName => select.order_by(tenants::entity::Column::Name, order),
            LeaseSortField::PropertyAddress => {
                select.order_by(properties::entity::Column::Address, order)
            }
            LeaseSortField::LeaseStart => select.order_by(Column::StartDate, order),
            LeaseSortField::LeaseEnd => select.order_by(Column::EndDate, order),
            LeaseSortField::Status => select.order_by(payment_status::Column::Description, order),
        };

        let rows = select
            .order_by_asc(Column::Id)
            .into_model::<LeaseRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: i32) -> PortfolioResult<Option<Lease>> {
        let row = joined()
            .filter(Column::Id.eq(id))
            .into_model::<LeaseRow>()
            .one(&self.db)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, input: NewLease) -> PortfolioResult<i32> {
        let property_id = input.property_id;
        let uow = UnitOfWork::begin(&self.db).await?;
        let outcome = insert(uow.conn(), input).await;
        let id = uow.finish(outcome).await?;

        tracing::info!(lease_id = id, property_id, "Created lease");
        Ok(id)
    }

    async fn update(&self, id: i32, patch: LeasePatch) -> PortfolioResult<bool> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let outcome = apply_patch(uow.conn(), id, patch).await;
        let updated = uow.finish(outcome).await?;

        if updated {
            tracing::info!(lease_id = id, "Updated lease");
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
            tracing::info!(lease_id = id, "Deleted lease");
        }
        Ok(deleted)
    }
}
