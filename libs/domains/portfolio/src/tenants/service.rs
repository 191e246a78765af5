use std::sync::Arc;
use validator::Validate;

use super::models::{CreateTenant, Tenant, TenantSortField, UpdateTenant};
use super::repository::TenantRepository;
use crate::error::{PortfolioError, PortfolioResult};
use crate::listing::{Sort, SortParams};

pub(crate) const RESOURCE: &str = "Tenant";

/// Service layer for Tenant business logic
#[derive(Clone)]
pub struct TenantService<R: TenantRepository> {
    repository: Arc<R>,
}

impl<R: TenantRepository> TenantService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_tenants(&self, params: SortParams) -> PortfolioResult<Vec<Tenant>> {
        let sort = Sort::<TenantSortField>::parse(params.sort.as_deref(), params.order.as_deref())?;
        self.repository.list(sort).await
    }

    pub async fn get_tenant(&self, id: i32) -> PortfolioResult<Tenant> {
        self.repository
            .get(id)
            .await?
            .ok_or(PortfolioError::not_found(RESOURCE, id))
    }

    pub async fn create_tenant(&self, input: CreateTenant) -> PortfolioResult<i32> {
        input
            .validate()
            .map_err(|e| PortfolioError::Validation(e.to_string()))?;

        self.repository.create(input.into_new()?).await
    }

    pub async fn update_tenant(&self, id: i32, input: UpdateTenant) -> PortfolioResult<()> {
        input
            .validate()
            .map_err(|e| PortfolioError::Validation(e.to_string()))?;

        if !self.repository.update(id, input.into_patch()?).await? {
            return Err(PortfolioError::not_found(RESOURCE, id));
        }
        Ok(())
    }

    /// Delete a tenant that holds no leases
    pub async fn delete_tenant(&self, id: i32) -> PortfolioResult<()> {
        if !self.repository.delete(id).await? {
            return Err(PortfolioError::not_found(RESOURCE, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tenants::repository::MockTenantRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_get_missing_tenant() {
        let mut repo = MockTenantRepository::new();
        repo.expect_get().with(eq(4)).returning(|_| Ok(None));

        let service = TenantService::new(repo);
        let err = service.get_tenant(4).await.unwrap_err();
        assert!(matches!(err, PortfolioError::NotFound { resource: "Tenant", id: 4 }));
    }

    #[tokio::test]
    async fn test_invalid_sort_is_rejected_before_repository() {
        let repo = MockTenantRepository::new();
        let service = TenantService::new(repo);

        let err = service
            .list_tenants(SortParams {
                sort: Some("rent".into()),
                order: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid sort field: rent");
    }

    #[tokio::test]
    async fn test_create_keeps_fields_as_submitted() {
        let mut repo = MockTenantRepository::new();
        repo.expect_create()
            .withf(|t| t.name == " Jane " && t.contact_info == "555-0100")
            .returning(|_| Ok(3));

        let service = TenantService::new(repo);
        let id = service
            .create_tenant(CreateTenant {
                name: Some(" Jane ".into()),
                contact_info: Some("555-0100".into()),
            })
            .await
            .unwrap();
        assert_eq!(id, 3);
    }

    #[tokio::test]
    async fn test_delete_missing_tenant() {
        let mut repo = MockTenantRepository::new();
        repo.expect_delete().with(eq(2)).returning(|_| Ok(false));

        let service = TenantService::new(repo);
        assert_eq!(
            service.delete_tenant(2).await.unwrap_err().to_string(),
            "Tenant not found"
        );
    }
}
