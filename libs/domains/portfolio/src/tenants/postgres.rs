use async_trait::async_trait;
use database::postgres::{DatabaseConnection, UnitOfWork};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QuerySelect, Statement,
};

use super::entity::{self, Entity};
use super::models::{NewTenant, Tenant, TenantPatch, TenantSortField};
use super::repository::TenantRepository;
use crate::error::PortfolioResult;
use crate::guard::ensure_no_dependents;
use crate::leases;
use crate::listing::Sort;

/// Tenants with their lease count; a tenant without leases counts zero.
const TENANT_SELECT: &str = "SELECT t.id, t.name, t.contact_info, COUNT(l.id) AS lease_count \
     FROM tenants t LEFT JOIN leases l ON l.tenant_id = t.id";
const TENANT_GROUP: &str = "GROUP BY t.id, t.name, t.contact_info";

/// PostgreSQL implementation of TenantRepository
#[derive(Clone)]
pub struct PgTenantRepository {
    db: DatabaseConnection,
}

impl PgTenantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct TenantRow {
    id: i32,
    name: String,
    contact_info: String,
    lease_count: i64,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            contact_info: row.contact_info,
            lease_count: row.lease_count,
        }
    }
}

async fn apply_patch<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    patch: TenantPatch,
) -> PortfolioResult<bool> {
    let Some(existing) = Entity::find_by_id(id).lock_exclusive().one(conn).await? else {
        return Ok(false);
    };

    let mut model: entity::ActiveModel = existing.into();
    if let Some(name) = patch.name {
        model.name = Set(name);
    }
    if let Some(contact_info) = patch.contact_info {
        model.contact_info = Set(contact_info);
    }
    model.update(conn).await?;

    Ok(true)
}

async fn delete_unreferenced<C: ConnectionTrait>(conn: &C, id: i32) -> PortfolioResult<bool> {
    if Entity::find_by_id(id).lock_exclusive().one(conn).await?.is_none() {
        return Ok(false);
    }

    let lease_count = leases::entity::Entity::find()
        .filter(leases::entity::Column::TenantId.eq(id))
        .count(conn)
        .await?;
    ensure_no_dependents("tenant", id, &[(lease_count, "lease(s)")])?;

    Entity::delete_by_id(id).exec(conn).await?;
    Ok(true)
}

#[async_trait]
impl TenantRepository for PgTenantRepository {
    async fn list(&self, sort: Sort<TenantSortField>) -> PortfolioResult<Vec<Tenant>> {
        let sql = format!(
            "{} {} ORDER BY {} {}, t.id ASC",
            TENANT_SELECT,
            TENANT_GROUP,
            sort.field.column(),
            sort.order.as_sql()
        );

        let rows = TenantRow::find_by_statement(Statement::from_string(DbBackend::Postgres, sql))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: i32) -> PortfolioResult<Option<Tenant>> {
        let sql = format!("{} WHERE t.id = $1 {}", TENANT_SELECT, TENANT_GROUP);

        let row = TenantRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            vec![id.into()],
        ))
        .one(&self.db)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, input: NewTenant) -> PortfolioResult<i32> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let outcome: PortfolioResult<i32> = entity::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            contact_info: Set(input.contact_info),
        }
        .insert(uow.conn())
        .await
        .map(|model| model.id)
        .map_err(Into::into);
        let id = uow.finish(outcome).await?;

        tracing::info!(tenant_id = id, "Created tenant");
        Ok(id)
    }

    async fn update(&self, id: i32, patch: TenantPatch) -> PortfolioResult<bool> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let outcome = apply_patch(uow.conn(), id, patch).await;
        let updated = uow.finish(outcome).await?;

        if updated {
            tracing::info!(tenant_id = id, "Updated tenant");
        }
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> PortfolioResult<bool> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let outcome = delete_unreferenced(uow.conn(), id).await;
        let deleted = uow.finish(outcome).await?;

        if deleted {
            tracing::info!(tenant_id = id, "Deleted tenant");
        }
        Ok(deleted)
    }
}
