use async_trait::async_trait;
use chrono::NaiveDate;
use database::postgres::{DatabaseConnection, UnitOfWork};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};

use super::entity::{self, Column, Entity, Relation};
use super::models::{NewProperty, Property, PropertyPatch, PropertyQuery, PropertySortField};
use super::repository::PropertyRepository;
use crate::error::{PortfolioError, PortfolioResult};
use crate::guard::ensure_no_dependents;
use crate::listing::like_pattern;
use crate::lookups::LookupKind;
use crate::lookups::entity::{property_status, property_type};
use crate::{leases, maintenance};

/// PostgreSQL implementation of PropertyRepository
#[derive(Clone)]
pub struct PgPropertyRepository {
    db: DatabaseConnection,
}

impl PgPropertyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Property joined with its type and status
#[derive(Debug, FromQueryResult)]
struct PropertyRow {
    id: i32,
    address: String,
    type_id: i32,
    type_name: String,
    status_id: i32,
    status_name: String,
    purchase_date: NaiveDate,
    price: Decimal,
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Self {
            id: row.id,
            address: row.address,
            type_id: row.type_id,
            type_name: row.type_name,
            status_id: row.status_id,
            status_name: row.status_name,
            purchase_date: row.purchase_date,
            price: row.price,
        }
    }
}

fn joined() -> Select<Entity> {
    Entity::find()
        .select_only()
        .column(Column::Id)
        .column(Column::Address)
        .column_as(Column::PropertyTypeId, "type_id")
        .column_as(property_type::Column::Description, "type_name")
        .column_as(Column::PropertyStatusId, "status_id")
        .column_as(property_status::Column::Description, "status_name")
        .column(Column::PurchaseDate)
        .column(Column::Price)
        .join(JoinType::InnerJoin, Relation::PropertyType.def())
        .join(JoinType::InnerJoin, Relation::PropertyStatus.def())
}

async fn check_references<C: ConnectionTrait>(
    conn: &C,
    type_id: Option<i32>,
    status_id: Option<i32>,
) -> PortfolioResult<()> {
    if let Some(id) = type_id {
        if property_type::Entity::find_by_id(id).one(conn).await?.is_none() {
            return Err(PortfolioError::missing_reference(LookupKind::PropertyType.label(), id));
        }
    }
    if let Some(id) = status_id {
        if property_status::Entity::find_by_id(id).one(conn).await?.is_none() {
            return Err(PortfolioError::missing_reference(LookupKind::PropertyStatus.label(), id));
        }
    }
    Ok(())
}

async fn insert<C: ConnectionTrait>(conn: &C, input: NewProperty) -> PortfolioResult<i32> {
    check_references(conn, Some(input.type_id), Some(input.status_id)).await?;

    let model = entity::ActiveModel {
        id: NotSet,
        address: Set(input.address),
        property_type_id: Set(input.type_id),
        property_status_id: Set(input.status_id),
        purchase_date: Set(input.purchase_date),
        price: Set(input.price),
    }
    .insert(conn)
    .await?;

    Ok(model.id)
}

async fn apply_patch<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    patch: PropertyPatch,
) -> PortfolioResult<bool> {
    let Some(existing) = Entity::find_by_id(id).lock_exclusive().one(conn).await? else {
        return Ok(false);
    };
    check_references(conn, patch.type_id, patch.status_id).await?;

    let mut model: entity::ActiveModel = existing.into();
    if let Some(address) = patch.address {
        model.address = Set(address);
    }
    if let Some(type_id) = patch.type_id {
        model.property_type_id = Set(type_id);
    }
    if let Some(status_id) = patch.status_id {
        model.property_status_id = Set(status_id);
    }
    if let Some(purchase_date) = patch.purchase_date {
        model.purchase_date = Set(purchase_date);
    }
    if let Some(price) = patch.price {
        model.price = Set(price);
    }
    model.update(conn).await?;

    Ok(true)
}

async fn delete_unreferenced<C: ConnectionTrait>(conn: &C, id: i32) -> PortfolioResult<bool> {
    if Entity::find_by_id(id).lock_exclusive().one(conn).await?.is_none() {
        return Ok(false);
    }

    let lease_count = leases::entity::Entity::find()
        .filter(leases::entity::Column::PropertyId.eq(id))
        .count(conn)
        .await?;
    let task_count = maintenance::entity::Entity::find()
        .filter(maintenance::entity::Column::PropertyId.eq(id))
        .count(conn)
        .await?;

    ensure_no_dependents(
        "property",
        id,
        &[(lease_count, "lease(s)"), (task_count, "maintenance task(s)")],
    )?;

    Entity::delete_by_id(id).exec(conn).await?;
    Ok(true)
}

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    async fn list(&self, query: PropertyQuery) -> PortfolioResult<Vec<Property>> {
        let mut select = joined();

        if let Some(needle) = query.type_contains.as_deref() {
            select = select.filter(Expr::cust_with_values(
                "LOWER(property_types.description) LIKE $1",
                [like_pattern(needle)],
            ));
        }
        if let Some(needle) = query.status_contains.as_deref() {
            select = select.filter(Expr::cust_with_values(
                "LOWER(property_statuses.description) LIKE $1",
                [like_pattern(needle)],
            ));
        }

        let order: Order = query.sort.order.into();
        select = match query.sort.field {
            PropertySortField::Id => select.order_by(Column::Id, order),
            PropertySortField::Address => select.order_by(Column::Address, order),
            PropertySortField::Type => select.order_by(property_type::Column::Description, order),
            PropertySortField::Status => {
                select.order_by(property_status::Column::Description, order)
            }
            PropertySortField::PurchaseDate => select.order_by(Column::PurchaseDate, order),
            PropertySortField::Price => select.order_by(Column::Price, order),
        };

        let rows = select
            .order_by_asc(Column::Id)
            .into_model::<PropertyRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: i32) -> PortfolioResult<Option<Property>> {
        let row = joined()
            .filter(Column::Id.eq(id))
            .into_model::<PropertyRow>()
            .one(&self.db)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, input: NewProperty) -> PortfolioResult<i32> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let outcome = insert(uow.conn(), input).await;
        let id = uow.finish(outcome).await?;

        tracing::info!(property_id = id, "Created property");
        Ok(id)
    }

    async fn update(&self, id: i32, patch: PropertyPatch) -> PortfolioResult<bool> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let outcome = apply_patch(uow.conn(), id, patch).await;
        let updated = uow.finish(outcome).await?;

        if updated {
            tracing::info!(property_id = id, "Updated property");
        }
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> PortfolioResult<bool> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let outcome = delete_unreferenced(uow.conn(), id).await;
        let deleted = uow.finish(outcome).await?;

        if deleted {
            tracing::info!(property_id = id, "Deleted property");
        }
        Ok(deleted)
    }
}
