use async_trait::async_trait;

use super::models::{Lookup, LookupKind, LookupSortField};
use crate::error::PortfolioResult;
use crate::guard::ensure_no_dependents;
use crate::listing::Sort;
use crate::store::InMemoryStore;

/// Repository for the lookup tables; `kind` selects the table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LookupRepository: Send + Sync {
    async fn list(&self, kind: LookupKind, sort: Sort<LookupSortField>)
    -> PortfolioResult<Vec<Lookup>>;

    async fn get(&self, kind: LookupKind, id: i32) -> PortfolioResult<Option<Lookup>>;

    /// Insert a value and return its id
    async fn create(&self, kind: LookupKind, description: String) -> PortfolioResult<i32>;

    /// Rename a value; `false` when `id` does not exist
    async fn update(&self, kind: LookupKind, id: i32, description: String)
    -> PortfolioResult<bool>;

    /// Delete an unreferenced value; `false` when `id` does not exist
    async fn delete(&self, kind: LookupKind, id: i32) -> PortfolioResult<bool>;
}

/// In-memory implementation of LookupRepository (for development/testing)
#[derive(Debug, Clone, Default)]
pub struct InMemoryLookupRepository {
    store: InMemoryStore,
}

impl InMemoryLookupRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LookupRepository for InMemoryLookupRepository {
    async fn list(
        &self,
        kind: LookupKind,
        sort: Sort<LookupSortField>,
    ) -> PortfolioResult<Vec<Lookup>> {
        let tables = self.store.read().await;

        let mut rows: Vec<Lookup> = tables
            .lookup(kind)
            .iter()
            .map(|(id, description)| Lookup {
                id,
                description: description.clone(),
            })
            .collect();

        rows.sort_by(|a, b| {
            let ordering = match sort.field {
                LookupSortField::Id => a.id.cmp(&b.id),
                LookupSortField::Description => a.description.cmp(&b.description),
            };
            sort.order.apply(ordering).then(a.id.cmp(&b.id))
        });

        Ok(rows)
    }

    async fn get(&self, kind: LookupKind, id: i32) -> PortfolioResult<Option<Lookup>> {
        let tables = self.store.read().await;
        Ok(tables.lookup(kind).get(id).map(|description| Lookup {
            id,
            description: description.clone(),
        }))
    }

    async fn create(&self, kind: LookupKind, description: String) -> PortfolioResult<i32> {
        let mut tables = self.store.write().await;
        let table = tables.lookup_mut(kind);

        if table.values().any(|d| *d == description) {
            return Err(kind.duplicate(&description));
        }

        let id = table.insert_with(|_| description);
        tracing::info!(lookup = kind.resource(), id, "Created lookup value");
        Ok(id)
    }

    async fn update(
        &self,
        kind: LookupKind,
        id: i32,
        description: String,
    ) -> PortfolioResult<bool> {
        let mut tables = self.store.write().await;
        let table = tables.lookup_mut(kind);

        if !table.contains(id) {
            return Ok(false);
        }
        if table
            .iter()
            .any(|(other, d)| other != id && *d == description)
        {
            return Err(kind.duplicate(&description));
        }

        if let Some(current) = table.get_mut(id) {
            *current = description;
        }
        tracing::info!(lookup = kind.resource(), id, "Updated lookup value");
        Ok(true)
    }

    async fn delete(&self, kind: LookupKind, id: i32) -> PortfolioResult<bool> {
        let mut tables = self.store.write().await;

        if !tables.lookup(kind).contains(id) {
            return Ok(false);
        }

        let references = tables.lookup_references(kind, id);
        ensure_no_dependents(kind.resource(), id, &[(references, kind.referenced_by().noun)])?;

        tables.lookup_mut(kind).remove(id);
        tracing::info!(lookup = kind.resource(), id, "Deleted lookup value");
        Ok(true)
    }
}
