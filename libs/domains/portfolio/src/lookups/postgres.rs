use async_trait::async_trait;
use database::postgres::{ConstraintViolation, DatabaseConnection, UnitOfWork, constraint_violation};
use sea_orm::{ConnectionTrait, DbBackend, DbErr, FromQueryResult, Statement};

use super::models::{Lookup, LookupKind, LookupSortField};
use super::repository::LookupRepository;
use crate::error::{PortfolioError, PortfolioResult};
use crate::guard::ensure_no_dependents;
use crate::listing::Sort;

/// PostgreSQL implementation of LookupRepository.
///
/// Table and column names come from [`LookupKind`] and [`LookupSortField`],
/// never from request input; values are always bound.
#[derive(Clone)]
pub struct PgLookupRepository {
    db: DatabaseConnection,
}

impl PgLookupRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct LookupRow {
    id: i32,
    description: String,
}

impl From<LookupRow> for Lookup {
    fn from(row: LookupRow) -> Self {
        Self {
            id: row.id,
            description: row.description,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    count: i64,
}

fn statement(sql: String, values: Vec<sea_orm::Value>) -> Statement {
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

/// Unique violations on `description` become a readable conflict.
fn map_write_error(kind: LookupKind, description: &str, err: DbErr) -> PortfolioError {
    match constraint_violation(&err) {
        Some(ConstraintViolation::Unique(_)) => kind.duplicate(description),
        _ => err.into(),
    }
}

async fn delete_unreferenced<C: ConnectionTrait>(
    conn: &C,
    kind: LookupKind,
    id: i32,
) -> PortfolioResult<bool> {
    let existing = LookupRow::find_by_statement(statement(
        format!(
            "SELECT id, description FROM {} WHERE id = $1 FOR UPDATE",
            kind.table()
        ),
        vec![id.into()],
    ))
    .one(conn)
    .await?;

    if existing.is_none() {
        return Ok(false);
    }

    let reference = kind.referenced_by();
    let references = CountRow::find_by_statement(statement(
        format!(
            "SELECT COUNT(*) AS count FROM {} WHERE {} = $1",
            reference.table, reference.column
        ),
        vec![id.into()],
    ))
    .one(conn)
    .await?
    .map_or(0, |row| row.count);

    ensure_no_dependents(
        kind.resource(),
        id,
        &[(references.max(0) as u64, reference.noun)],
    )?;

    LookupRow::find_by_statement(statement(
        format!(
            "DELETE FROM {} WHERE id = $1 RETURNING id, description",
            kind.table()
        ),
        vec![id.into()],
    ))
    .one(conn)
    .await?;

    Ok(true)
}

#[async_trait]
impl LookupRepository for PgLookupRepository {
    async fn list(
        &self,
        kind: LookupKind,
        sort: Sort<LookupSortField>,
    ) -> PortfolioResult<Vec<Lookup>> {
        let sql = format!(
            "SELECT id, description FROM {} ORDER BY {} {}, id ASC",
            kind.table(),
            sort.field.column(),
            sort.order.as_sql()
        );

        let rows = LookupRow::find_by_statement(statement(sql, vec![]))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, kind: LookupKind, id: i32) -> PortfolioResult<Option<Lookup>> {
        let sql = format!("SELECT id, description FROM {} WHERE id = $1", kind.table());

        let row = LookupRow::find_by_statement(statement(sql, vec![id.into()]))
            .one(&self.db)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, kind: LookupKind, description: String) -> PortfolioResult<i32> {
        let sql = format!(
            "INSERT INTO {} (description) VALUES ($1) RETURNING id, description",
            kind.table()
        );

        let row = LookupRow::find_by_statement(statement(sql, vec![description.clone().into()]))
            .one(&self.db)
            .await
            .map_err(|e| map_write_error(kind, &description, e))?
            .ok_or_else(|| PortfolioError::Store(format!("{} insert returned no row", kind.resource())))?;

        tracing::info!(lookup = kind.resource(), id = row.id, "Created lookup value");
        Ok(row.id)
    }

    async fn update(
        &self,
        kind: LookupKind,
        id: i32,
        description: String,
    ) -> PortfolioResult<bool> {
        let sql = format!(
            "UPDATE {} SET description = $1 WHERE id = $2 RETURNING id, description",
            kind.table()
        );

        let row = LookupRow::find_by_statement(statement(
            sql,
            vec![description.clone().into(), id.into()],
        ))
        .one(&self.db)
        .await
        .map_err(|e| map_write_error(kind, &description, e))?;

        if row.is_some() {
            tracing::info!(lookup = kind.resource(), id, "Updated lookup value");
        }
        Ok(row.is_some())
    }

    async fn delete(&self, kind: LookupKind, id: i32) -> PortfolioResult<bool> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let outcome = delete_unreferenced(uow.conn(), kind, id).await;
        let deleted = uow.finish(outcome).await?;

        if deleted {
            tracing::info!(lookup = kind.resource(), id, "Deleted lookup value");
        }
        Ok(deleted)
    }
}
