use async_trait::async_trait;

use super::entity;
use super::models::{
    Maintenance, MaintenancePatch, MaintenanceQuery, MaintenanceSortField, NewMaintenance,
};
use crate::error::{PortfolioError, PortfolioResult};
use crate::listing::matches_filter;
use crate::lookups::LookupKind;
use crate::store::{InMemoryStore, Tables};

/// Repository trait for maintenance task persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    async fn list(&self, query: MaintenanceQuery) -> PortfolioResult<Vec<Maintenance>>;

    async fn get(&self, id: i32) -> PortfolioResult<Option<Maintenance>>;

    async fn create(&self, input: NewMaintenance) -> PortfolioResult<i32>;

    /// Apply a patch; `false` when `id` does not exist
    async fn update(&self, id: i32, patch: MaintenancePatch) -> PortfolioResult<bool>;

    async fn delete(&self, id: i32) -> PortfolioResult<bool>;
}

/// In-memory implementation of MaintenanceRepository (for development/testing)
#[derive(Debug, Clone, Default)]
pub struct InMemoryMaintenanceRepository {
    store: InMemoryStore,
}

impl InMemoryMaintenanceRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn view(tables: &Tables, model: &entity::Model) -> Maintenance {
    Maintenance {
        id: model.id,
        description: model.description.clone(),
        status_id: model.maintenance_status_id,
        status: tables.describe(LookupKind::MaintenanceStatus, model.maintenance_status_id),
        scheduled_date: model.scheduled_date,
        property_id: model.property_id,
        property_address: tables
            .properties
            .get(model.property_id)
            .map(|p| p.address.clone())
            .unwrap_or_default(),
    }
}

fn check_references(
    tables: &Tables,
    status_id: Option<i32>,
    property_id: Option<i32>,
) -> PortfolioResult<()> {
    if let Some(id) = status_id.filter(|id| !tables.maintenance_statuses.contains(*id)) {
        return Err(PortfolioError::missing_reference(
            LookupKind::MaintenanceStatus.label(),
            id,
        ));
    }
    if let Some(id) = property_id.filter(|id| !tables.properties.contains(*id)) {
        return Err(PortfolioError::missing_reference("property", id));
    }
    Ok(())
}

#[async_trait]
impl MaintenanceRepository for InMemoryMaintenanceRepository {
    async fn list(&self, query: MaintenanceQuery) -> PortfolioResult<Vec<Maintenance>> {
        let tables = self.store.read().await;

        let mut rows: Vec<Maintenance> = tables
            .maintenance
            .values()
            .map(|model| view(&tables, model))
            .filter(|m| matches_filter(&m.status, query.status_contains.as_deref()))
            .collect();

        let sort = query.sort;
        rows.sort_by(|a, b| {
            let ordering = match sort.field {
                MaintenanceSortField::Id => a.id.cmp(&b.id),
                MaintenanceSortField::Description => a.description.cmp(&b.description),
                MaintenanceSortField::Status => a.status.cmp(&b.status),
                MaintenanceSortField::ScheduledDate => a.scheduled_date.cmp(&b.scheduled_date),
                MaintenanceSortField::PropertyId => a.property_id.cmp(&b.property_id),
            };
            sort.order.apply(ordering).then(a.id.cmp(&b.id))
        });
        Ok(rows)
    }

    async fn get(&self, id: i32) -> PortfolioResult<Option<Maintenance>> {
        let tables = self.store.read().await;
        Ok(tables.maintenance.get(id).map(|model| view(&tables, model)))
    }

    async fn create(&self, input: NewMaintenance) -> PortfolioResult<i32> {
        let mut tables = self.store.write().await;
        check_references(&tables, Some(input.status_id), Some(input.property_id))?;

        let id = tables.maintenance.insert_with(|id| entity::Model {
            id,
            description: input.description,
            maintenance_status_id: input.status_id,
            scheduled_date: input.scheduled_date,
            property_id: input.property_id,
        });

        tracing::info!(maintenance_id = id, property_id = input.property_id, "Created maintenance task");
        Ok(id)
    }

    async fn update(&self, id: i32, patch: MaintenancePatch) -> PortfolioResult<bool> {
        let mut tables = self.store.write().await;

        if !tables.maintenance.contains(id) {
            return Ok(false);
        }
        check_references(&tables, patch.status_id, patch.property_id)?;

        if let Some(model) = tables.maintenance.get_mut(id) {
            if let Some(description) = patch.description {
                model.description = description;
            }
            if let Some(status_id) = patch.status_id {
                model.maintenance_status_id = status_id;
            }
            if let Some(scheduled_date) = patch.scheduled_date {
                model.scheduled_date = scheduled_date;
            }
            if let Some(property_id) = patch.property_id {
                model.property_id = property_id;
            }
        }

        tracing::info!(maintenance_id = id, "Updated maintenance task");
        Ok(true)
    }

    async fn delete(&self, id: i32) -> PortfolioResult<bool> {
        let mut tables = self.store.write().await;

        let deleted = tables.maintenance.remove(id).is_some();
        if deleted {
            tracing::info!(maintenance_id = id, "Deleted maintenance task");
        }
        Ok(deleted)
    }
}
