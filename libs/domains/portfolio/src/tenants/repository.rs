use async_trait::async_trait;

use super::entity;
use super::models::{NewTenant, Tenant, TenantPatch, TenantSortField};
use crate::error::PortfolioResult;
use crate::guard::ensure_no_dependents;
use crate::listing::Sort;
use crate::store::{InMemoryStore, Tables};

/// Repository trait for Tenant persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn list(&self, sort: Sort<TenantSortField>) -> PortfolioResult<Vec<Tenant>>;

    async fn get(&self, id: i32) -> PortfolioResult<Option<Tenant>>;

    async fn create(&self, input: NewTenant) -> PortfolioResult<i32>;

    /// Apply a patch; `false` when `id` does not exist
    async fn update(&self, id: i32, patch: TenantPatch) -> PortfolioResult<bool>;

    /// Delete a tenant without leases; `false` when `id` does not exist
    async fn delete(&self, id: i32) -> PortfolioResult<bool>;
}

/// In-memory implementation of TenantRepository (for development/testing)
#[derive(Debug, Clone, Default)]
pub struct InMemoryTenantRepository {
    store: InMemoryStore,
}

impl InMemoryTenantRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn lease_count(tables: &Tables, tenant_id: i32) -> i64 {
    tables
        .leases
        .values()
        .filter(|l| l.tenant_id == tenant_id)
        .count() as i64
}

fn view(tables: &Tables, model: &entity::Model) -> Tenant {
    Tenant {
        id: model.id,
        name: model.name.clone(),
        contact_info: model.contact_info.clone(),
        lease_count: lease_count(tables, model.id),
    }
}

#[async_trait]
impl TenantRepository for InMemoryTenantRepository {
    async fn list(&self, sort: Sort<TenantSortField>) -> PortfolioResult<Vec<Tenant>> {
        let tables = self.store.read().await;

        let mut rows: Vec<Tenant> = tables
            .tenants
            .values()
            .map(|model| view(&tables, model))
            .collect();

        rows.sort_by(|a, b| {
            let ordering = match sort.field {
                TenantSortField::Id => a.id.cmp(&b.id),
                TenantSortField::Name => a.name.cmp(&b.name),
                TenantSortField::ContactInfo => a.contact_info.cmp(&b.contact_info),
            };
            sort.order.apply(ordering).then(a.id.cmp(&b.id))
        });
        Ok(rows)
    }

    async fn get(&self, id: i32) -> PortfolioResult<Option<Tenant>> {
        let tables = self.store.read().await;
        Ok(tables.tenants.get(id).map(|model| view(&tables, model)))
    }

    async fn create(&self, input: NewTenant) -> PortfolioResult<i32> {
        let mut tables = self.store.write().await;

        let id = tables.tenants.insert_with(|id| entity::Model {
            id,
            name: input.name,
            contact_info: input.contact_info,
        });

        tracing::info!(tenant_id = id, "Created tenant");
        Ok(id)
    }

    async fn update(&self, id: i32, patch: TenantPatch) -> PortfolioResult<bool> {
        let mut tables = self.store.write().await;

        let Some(model) = tables.tenants.get_mut(id) else {
            return Ok(false);
        };
        if let Some(name) = patch.name {
            model.name = name;
        }
        if let Some(contact_info) = patch.contact_info {
            model.contact_info = contact_info;
        }

        tracing::info!(tenant_id = id, "Updated tenant");
        Ok(true)
    }

    async fn delete(&self, id: i32) -> PortfolioResult<bool> {
        let mut tables = self.store.write().await;

        if !tables.tenants.contains(id) {
            return Ok(false);
        }
        let leases = lease_count(&tables, id) as u64;
        ensure_no_dependents("tenant", id, &[(leases, "lease(s)")])?;

        tables.tenants.remove(id);
        tracing::info!(tenant_id = id, "Deleted tenant");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leases;
    use crate::listing::SortOrder;
    use chrono::NaiveDate;

    fn new_tenant(name: &str) -> NewTenant {
        NewTenant {
            name: name.to_string(),
            contact_info: format!("{}@example.com", name.to_lowercase()),
        }
    }

    #[tokio::test]
    async fn test_list_sorted_by_name_desc() {
        let repo = InMemoryTenantRepository::new(InMemoryStore::new());
        repo.create(new_tenant("Alice")).await.unwrap();
        repo.create(new_tenant("Carol")).await.unwrap();
        repo.create(new_tenant("Bob")).await.unwrap();

        let rows = repo
            .list(Sort {
                field: TenantSortField::Name,
                order: SortOrder::Desc,
            })
            .await
            .unwrap();
        let names: Vec<_> = rows.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Carol", "Bob", "Alice"]);
    }

    #[tokio::test]
    async fn test_delete_with_lease_is_blocked() {
        let store = InMemoryStore::new();
        let repo = InMemoryTenantRepository::new(store.clone());
        let id = repo.create(new_tenant("Alice")).await.unwrap();

        {
            let mut tables = store.write().await;
            let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            tables.leases.insert_with(|lease_id| leases::entity::Model {
                id: lease_id,
                tenant_id: id,
                property_id: 1,
                start_date: day,
                end_date: day,
                payment_status_id: 1,
            });
        }

        assert_eq!(repo.get(id).await.unwrap().unwrap().lease_count, 1);
        let err = repo.delete(id).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Cannot delete tenant {}: referenced by 1 lease(s)", id)
        );
        assert!(repo.get(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_missing_returns_false() {
        let repo = InMemoryTenantRepository::new(InMemoryStore::new());
        let updated = repo
            .update(
                9,
                TenantPatch {
                    name: Some("X".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!updated);
    }
}
