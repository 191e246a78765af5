use async_trait::async_trait;

use super::entity;
use super::models::{Lease, LeasePatch, LeaseQuery, LeaseSortField, NewLease};
use crate::error::{PortfolioError, PortfolioResult};
use crate::guard::{BookedLease, OVERLAP_ON_CREATE, OVERLAP_ON_UPDATE, find_conflicting_lease};
use crate::listing::{Sort, matches_filter};
use crate::lookups::LookupKind;
use crate::store::{InMemoryStore, Tables};

/// Repository trait for Lease persistence.
///
/// `create` and `update` must run the overlap guard in the same atomic
/// scope as the write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaseRepository: Send + Sync {
    async fn list(&self, query: LeaseQuery) -> PortfolioResult<Vec<Lease>>;

    async fn get(&self, id: i32) -> PortfolioResult<Option<Lease>>;

    async fn create(&self, input: NewLease) -> PortfolioResult<i32>;

    /// Apply a patch; `false` when `id` does not exist
    async fn update(&self, id: i32, patch: LeasePatch) -> PortfolioResult<bool>;

    async fn delete(&self, id: i32) -> PortfolioResult<bool>;
}

pub(crate) fn sort_leases(rows: &mut [Lease], sort: Sort<LeaseSortField>) {
    rows.sort_by(|a, b| {
        let ordering = match sort.field {
            LeaseSortField::Id => a.id.cmp(&b.id),
            LeaseSortField::TenantName => a.tenant_name.cmp(&b.tenant_name),
            LeaseSortField::PropertyAddress => a.property_address.cmp(&b.property_address),
            LeaseSortField::LeaseStart => a.lease_start.cmp(&b.lease_start),
            LeaseSortField::LeaseEnd => a.lease_end.cmp(&b.lease_end),
            LeaseSortField::Status => a.payment_status.cmp(&b.payment_status),
        };
        sort.order.apply(ordering).then(a.id.cmp(&b.id))
    });
}

/// In-memory implementation of LeaseRepository (for development/testing)
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeaseRepository {
    store: InMemoryStore,
}

impl InMemoryLeaseRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn view(tables: &Tables, model: &entity::Model) -> Lease {
    Lease {
        id: model.id,
        tenant_id: model.tenant_id,
        tenant_name: tables
            .tenants
            .get(model.tenant_id)
            .map(|t| t.name.clone())
            .unwrap_or_default(),
        property_id: model.property_id,
        property_address: tables
            .properties
            .get(model.property_id)
            .map(|p| p.address.clone())
            .unwrap_or_default(),
        lease_start: model.start_date,
        lease_end: model.end_date,
        payment_status_id: model.payment_status_id,
        payment_status: tables.describe(LookupKind::PaymentStatus, model.payment_status_id),
    }
}

fn check_references(
    tables: &Tables,
    tenant_id: Option<i32>,
    property_id: Option<i32>,
    payment_status_id: Option<i32>,
) -> PortfolioResult<()> {
    if let Some(id) = tenant_id.filter(|id| !tables.tenants.contains(*id)) {
        return Err(PortfolioError::missing_reference("tenant", id));
    }
    if let Some(id) = property_id.filter(|id| !tables.properties.contains(*id)) {
        return Err(PortfolioError::missing_reference("property", id));
    }
    if let Some(id) = payment_status_id.filter(|id| !tables.payment_statuses.contains(*id)) {
        return Err(PortfolioError::missing_reference(LookupKind::PaymentStatus.label(), id));
    }
    Ok(())
}

fn booked(tables: &Tables) -> Vec<BookedLease> {
    tables.leases.values().map(entity::Model::booked).collect()
}

#[async_trait]
impl LeaseRepository for InMemoryLeaseRepository {
    async fn list(&self, query: LeaseQuery) -> PortfolioResult<Vec<Lease>> {
        let tables = self.store.read().await;

        let mut rows: Vec<Lease> = tables
            .leases
            .values()
            .filter(|l| query.tenant_id.is_none_or(|id| l.tenant_id == id))
            .filter(|l| query.property_id.is_none_or(|id| l.property_id == id))
            .map(|model| view(&tables, model))
            .filter(|l| matches_filter(&l.payment_status, query.status_contains.as_deref()))
            .collect();

        sort_leases(&mut rows, query.sort);
        Ok(rows)
    }

    async fn get(&self, id: i32) -> PortfolioResult<Option<Lease>> {
        let tables = self.store.read().await;
        Ok(tables.leases.get(id).map(|model| view(&tables, model)))
    }

    async fn create(&self, input: NewLease) -> PortfolioResult<i32> {
        let mut tables = self.store.write().await;
        check_references(
            &tables,
            Some(input.tenant_id),
            Some(input.property_id),
            Some(input.payment_status_id),
        )?;

        let leases = booked(&tables);
        if let Some(existing) = find_conflicting_lease(input.property_id, &input.term, None, &leases)
        {
            tracing::warn!(
                property_id = input.property_id,
                conflicting_lease_id = existing.id,
                "Lease create rejected: overlapping term"
            );
            return Err(PortfolioError::Conflict(OVERLAP_ON_CREATE.to_string()));
        }

        let id = tables.leases.insert_with(|id| entity::Model {
            id,
            tenant_id: input.tenant_id,
            property_id: input.property_id,
            start_date: input.term.start,
            end_date: input.term.end,
            payment_status_id: input.payment_status_id,
        });

        tracing::info!(lease_id = id, property_id = input.property_id, "Created lease");
        Ok(id)
    }

    async fn update(&self, id: i32, patch: LeasePatch) -> PortfolioResult<bool> {
        let mut tables = self.store.write().await;

        let Some(current) = tables.leases.get(id).cloned() else {
            return Ok(false);
        };
        check_references(&tables, patch.tenant_id, patch.property_id, patch.payment_status_id)?;

        let property_id = patch.property_id.unwrap_or(current.property_id);
        let term = patch.merged_term(current.term())?;

        let leases = booked(&tables);
        if let Some(existing) = find_conflicting_lease(property_id, &term, Some(id), &leases) {
            tracing::warn!(
                lease_id = id,
                property_id,
                conflicting_lease_id = existing.id,
                "Lease update rejected: overlapping term"
            );
            return Err(PortfolioError::Conflict(OVERLAP_ON_UPDATE.to_string()));
        }

        if let Some(model) = tables.leases.get_mut(id) {
            if let Some(tenant_id) = patch.tenant_id {
                model.tenant_id = tenant_id;
            }
            if let Some(payment_status_id) = patch.payment_status_id {
                model.payment_status_id = payment_status_id;
            }
            model.property_id = property_id;
            model.start_date = term.start;
            model.end_date = term.end;
        }

        tracing::info!(lease_id = id, "Updated lease");
        Ok(true)
    }

    async fn delete(&self, id: i32) -> PortfolioResult<bool> {
        let mut tables = self.store.write().await;

        let deleted = tables.leases.remove(id).is_some();
        if deleted {
            tracing::info!(lease_id = id, "Deleted lease");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::DateRange;
    use crate::{properties, tenants};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Store with one tenant (id 1) and two properties (ids 1 and 2).
    async fn seeded_store() -> InMemoryStore {
        let store = InMemoryStore::new();
        {
            let mut tables = store.write().await;
            tables.tenants.insert_with(|id| tenants::entity::Model {
                id,
                name: "Jane".into(),
                contact_info: "jane@example.com".into(),
            });
            for address in ["1 Main", "2 Main"] {
                tables.properties.insert_with(|id| properties::entity::Model {
                    id,
                    address: address.into(),
                    property_type_id: 1,
                    property_status_id: 1,
                    purchase_date: day("2020-01-01"),
                    price: Decimal::from(100),
                });
            }
        }
        store
    }

    fn new_lease(property_id: i32, start: &str, end: &str) -> NewLease {
        NewLease {
            tenant_id: 1,
            property_id,
            term: DateRange::new(day(start), day(end)).unwrap(),
            payment_status_id: 1,
        }
    }

    #[tokio::test]
    async fn test_shared_end_date_is_rejected() {
        let repo = InMemoryLeaseRepository::new(seeded_store().await);
        repo.create(new_lease(1, "2024-01-01", "2024-12-31")).await.unwrap();

        let err = repo
            .create(new_lease(1, "2024-12-31", "2025-06-30"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), OVERLAP_ON_CREATE);
        assert_eq!(repo.list(LeaseQuery::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_adjacent_and_other_property_are_accepted() {
        let repo = InMemoryLeaseRepository::new(seeded_store().await);
        repo.create(new_lease(1, "2024-01-01", "2024-12-31")).await.unwrap();

        repo.create(new_lease(1, "2025-01-01", "2025-12-31")).await.unwrap();
        repo.create(new_lease(2, "2024-06-01", "2024-06-30")).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_excludes_itself_but_not_neighbours() {
        let repo = InMemoryLeaseRepository::new(seeded_store().await);
        let first = repo.create(new_lease(1, "2024-01-01", "2024-12-31")).await.unwrap();
        repo.create(new_lease(1, "2025-01-01", "2025-12-31")).await.unwrap();

        let shrink = LeasePatch {
            lease_start: Some(day("2024-03-01")),
            ..Default::default()
        };
        assert!(repo.update(first, shrink).await.unwrap());

        let extend = LeasePatch {
            lease_end: Some(day("2025-01-01")),
            ..Default::default()
        };
        let err = repo.update(first, extend).await.unwrap_err();
        assert_eq!(err.to_string(), OVERLAP_ON_UPDATE);

        let lease = repo.get(first).await.unwrap().unwrap();
        assert_eq!(lease.lease_start, day("2024-03-01"));
        assert_eq!(lease.lease_end, day("2024-12-31"));
    }

    #[tokio::test]
    async fn test_moving_to_another_property_is_guarded() {
        let repo = InMemoryLeaseRepository::new(seeded_store().await);
        repo.create(new_lease(1, "2024-01-01", "2024-12-31")).await.unwrap();
        let other = repo.create(new_lease(2, "2024-06-01", "2024-06-30")).await.unwrap();

        let err = repo
            .update(
                other,
                LeasePatch {
                    property_id: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_unknown_tenant_is_conflict() {
        let repo = InMemoryLeaseRepository::new(seeded_store().await);
        let mut lease = new_lease(1, "2024-01-01", "2024-12-31");
        lease.tenant_id = 99;

        assert_eq!(
            repo.create(lease).await.unwrap_err().to_string(),
            "Referenced tenant 99 does not exist"
        );
    }

    #[tokio::test]
    async fn test_list_scoped_and_joined() {
        let repo = InMemoryLeaseRepository::new(seeded_store().await);
        repo.create(new_lease(1, "2024-01-01", "2024-12-31")).await.unwrap();
        repo.create(new_lease(2, "2024-01-01", "2024-12-31")).await.unwrap();

        let rows = repo
            .list(LeaseQuery {
                property_id: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].property_address, "2 Main");
        assert_eq!(rows[0].tenant_name, "Jane");
        assert_eq!(rows[0].payment_status, "Paid");

        let none = repo
            .list(LeaseQuery {
                tenant_id: Some(42),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
