use async_trait::async_trait;

use super::entity;
use super::models::{NewProperty, Property, PropertyPatch, PropertyQuery, PropertySortField};
use crate::error::{PortfolioError, PortfolioResult};
use crate::guard::ensure_no_dependents;
use crate::listing::{Sort, matches_filter};
use crate::lookups::LookupKind;
use crate::store::{InMemoryStore, Tables};

/// Repository trait for Property persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// List properties matching the query's filters, in its sort order
    async fn list(&self, query: PropertyQuery) -> PortfolioResult<Vec<Property>>;

    async fn get(&self, id: i32) -> PortfolioResult<Option<Property>>;

    /// Insert a property and return its id
    async fn create(&self, input: NewProperty) -> PortfolioResult<i32>;

    /// Apply a patch; `false` when `id` does not exist
    async fn update(&self, id: i32, patch: PropertyPatch) -> PortfolioResult<bool>;

    /// Delete a property with no leases or maintenance tasks; `false` when `id` does not exist
    async fn delete(&self, id: i32) -> PortfolioResult<bool>;
}

pub(crate) fn sort_properties(rows: &mut [Property], sort: Sort<PropertySortField>) {
    rows.sort_by(|a, b| {
        let ordering = match sort.field {
            PropertySortField::Id => a.id.cmp(&b.id),
            PropertySortField::Address => a.address.cmp(&b.address),
            PropertySortField::Type => a.type_name.cmp(&b.type_name),
            PropertySortField::Status => a.status_name.cmp(&b.status_name),
            PropertySortField::PurchaseDate => a.purchase_date.cmp(&b.purchase_date),
            PropertySortField::Price => a.price.cmp(&b.price),
        };
        sort.order.apply(ordering).then(a.id.cmp(&b.id))
    });
}

/// In-memory implementation of PropertyRepository (for development/testing)
#[derive(Debug, Clone, Default)]
pub struct InMemoryPropertyRepository {
    store: InMemoryStore,
}

impl InMemoryPropertyRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn view(tables: &Tables, model: &entity::Model) -> Property {
    Property {
        id: model.id,
        address: model.address.clone(),
        type_id: model.property_type_id,
        type_name: tables.describe(LookupKind::PropertyType, model.property_type_id),
        status_id: model.property_status_id,
        status_name: tables.describe(LookupKind::PropertyStatus, model.property_status_id),
        purchase_date: model.purchase_date,
        price: model.price,
    }
}

fn check_references(
    tables: &Tables,
    type_id: Option<i32>,
    status_id: Option<i32>,
) -> PortfolioResult<()> {
    if let Some(id) = type_id.filter(|id| !tables.property_types.contains(*id)) {
        return Err(PortfolioError::missing_reference(LookupKind::PropertyType.label(), id));
    }
    if let Some(id) = status_id.filter(|id| !tables.property_statuses.contains(*id)) {
        return Err(PortfolioError::missing_reference(LookupKind::PropertyStatus.label(), id));
    }
    Ok(())
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn list(&self, query: PropertyQuery) -> PortfolioResult<Vec<Property>> {
        let tables = self.store.read().await;

        let mut rows: Vec<Property> = tables
            .properties
            .values()
            .map(|model| view(&tables, model))
            .filter(|p| {
                matches_filter(&p.type_name, query.type_contains.as_deref())
                    && matches_filter(&p.status_name, query.status_contains.as_deref())
            })
            .collect();

        sort_properties(&mut rows, query.sort);
        Ok(rows)
    }

    async fn get(&self, id: i32) -> PortfolioResult<Option<Property>> {
        let tables = self.store.read().await;
        Ok(tables.properties.get(id).map(|model| view(&tables, model)))
    }

    async fn create(&self, input: NewProperty) -> PortfolioResult<i32> {
        let mut tables = self.store.write().await;
        check_references(&tables, Some(input.type_id), Some(input.status_id))?;

        let id = tables.properties.insert_with(|id| entity::Model {
            id,
            address: input.address,
            property_type_id: input.type_id,
            property_status_id: input.status_id,
            purchase_date: input.purchase_date,
            price: input.price,
        });

        tracing::info!(property_id = id, "Created property");
        Ok(id)
    }

    async fn update(&self, id: i32, patch: PropertyPatch) -> PortfolioResult<bool> {
        let mut tables = self.store.write().await;

        if !tables.properties.contains(id) {
            return Ok(false);
        }
        check_references(&tables, patch.type_id, patch.status_id)?;

        if let Some(model) = tables.properties.get_mut(id) {
            if let Some(address) = patch.address {
                model.address = address;
            }
            if let Some(type_id) = patch.type_id {
                model.property_type_id = type_id;
            }
            if let Some(status_id) = patch.status_id {
                model.property_status_id = status_id;
            }
            if let Some(purchase_date) = patch.purchase_date {
                model.purchase_date = purchase_date;
            }
            if let Some(price) = patch.price {
                model.price = price;
            }
        }

        tracing::info!(property_id = id, "Updated property");
        Ok(true)
    }

    async fn delete(&self, id: i32) -> PortfolioResult<bool> {
        let mut tables = self.store.write().await;

        if !tables.properties.contains(id) {
            return Ok(false);
        }

        let leases = tables.leases.values().filter(|l| l.property_id == id).count() as u64;
        let tasks = tables
            .maintenance
            .values()
            .filter(|m| m.property_id == id)
            .count() as u64;
        ensure_no_dependents(
            "property",
            id,
            &[(leases, "lease(s)"), (tasks, "maintenance task(s)")],
        )?;

        tables.properties.remove(id);
        tracing::info!(property_id = id, "Deleted property");
        Ok(true)
    }
}
