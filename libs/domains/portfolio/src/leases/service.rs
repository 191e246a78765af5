use std::sync::Arc;
use validator::Validate;

use super::models::{CreateLease, Lease, LeaseFilter, UpdateLease};
use super::repository::LeaseRepository;
use crate::error::{PortfolioError, PortfolioResult};

pub(crate) const RESOURCE: &str = "Lease";

/// Service layer for Lease business logic
#[derive(Clone)]
pub struct LeaseService<R: LeaseRepository> {
    repository: Arc<R>,
}

impl<R: LeaseRepository> LeaseService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_leases(&self, filter: LeaseFilter) -> PortfolioResult<Vec<Lease>> {
        self.repository.list(filter.into_query()?).await
    }

    /// Leases held by one tenant; empty for an unknown tenant
    pub async fn list_by_tenant(
        &self,
        tenant_id: i32,
        filter: LeaseFilter,
    ) -> PortfolioResult<Vec<Lease>> {
        let mut query = filter.into_query()?;
        query.tenant_id = Some(tenant_id);
        self.repository.list(query).await
    }

    /// Leases on one property; empty for an unknown property
    pub async fn list_by_property(
        &self,
        property_id: i32,
        filter: LeaseFilter,
    ) -> PortfolioResult<Vec<Lease>> {
        let mut query = filter.into_query()?;
        query.property_id = Some(property_id);
        self.repository.list(query).await
    }

    pub async fn get_lease(&self, id: i32) -> PortfolioResult<Lease> {
        self.repository
            .get(id)
            .await?
            .ok_or(PortfolioError::not_found(RESOURCE, id))
    }

    pub async fn create_lease(&self, input: CreateLease) -> PortfolioResult<i32> {
        input
            .validate()
            .map_err(|e| PortfolioError::Validation(e.to_string()))?;

        self.repository.create(input.into_new()?).await
    }

    pub async fn update_lease(&self, id: i32, input: UpdateLease) -> PortfolioResult<()> {
        input
            .validate()
            .map_err(|e| PortfolioError::Validation(e.to_string()))?;

        if !self.repository.update(id, input.into_patch()?).await? {
            return Err(PortfolioError::not_found(RESOURCE, id));
        }
        Ok(())
    }

    pub async fn delete_lease(&self, id: i32) -> PortfolioResult<()> {
        if !self.repository.delete(id).await? {
            return Err(PortfolioError::not_found(RESOURCE, id));
        }
        Ok(())
    }
}
