use std::sync::Arc;
use validator::Validate;

use super::models::{CreateMaintenance, Maintenance, MaintenanceFilter, UpdateMaintenance};
use super::repository::MaintenanceRepository;
use crate::error::{PortfolioError, PortfolioResult};

pub(crate) const RESOURCE: &str = "Maintenance";

/// Service layer for maintenance tasks
#[derive(Clone)]
pub struct MaintenanceService<R: MaintenanceRepository> {
    repository: Arc<R>,
}

impl<R: MaintenanceRepository> MaintenanceService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_tasks(&self, filter: MaintenanceFilter) -> PortfolioResult<Vec<Maintenance>> {
        self.repository.list(filter.into_query()?).await
    }

    pub async fn get_task(&self, id: i32) -> PortfolioResult<Maintenance> {
        self.repository
            .get(id)
            .await?
            .ok_or(PortfolioError::not_found(RESOURCE, id))
    }

    pub async fn create_task(&self, input: CreateMaintenance) -> PortfolioResult<i32> {
        input
            .validate()
            .map_err(|e| PortfolioError::Validation(e.to_string()))?;

        self.repository.create(input.into_new()?).await
    }

    pub async fn update_task(&self, id: i32, input: UpdateMaintenance) -> PortfolioResult<()> {
        input
            .validate()
            .map_err(|e| PortfolioError::Validation(e.to_string()))?;

        if !self.repository.update(id, input.into_patch()?).await? {
            return Err(PortfolioError::not_found(RESOURCE, id));
        }
        Ok(())
    }

    pub async fn delete_task(&self, id: i32) -> PortfolioResult<()> {
        if !self.repository.delete(id).await? {
            return Err(PortfolioError::not_found(RESOURCE, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maintenance::repository::MockMaintenanceRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_get_missing_task() {
        let mut repo = MockMaintenanceRepository::new();
        repo.expect_get().with(eq(1)).returning(|_| Ok(None));

        let service = MaintenanceService::new(repo);
        assert_eq!(
            service.get_task(1).await.unwrap_err().to_string(),
            "Maintenance not found"
        );
    }

    #[tokio::test]
    async fn test_create_parses_date() {
        let mut repo = MockMaintenanceRepository::new();
        repo.expect_create()
            .withf(|m| m.scheduled_date.to_string() == "2024-09-15" && m.description == "Fix roof")
            .returning(|_| Ok(4));

        let service = MaintenanceService::new(repo);
        let id = service
            .create_task(CreateMaintenance {
                description: Some("Fix roof".into()),
                status_id: Some(1),
                scheduled_date: Some("2024-09-15".into()),
                property_id: Some(1),
            })
            .await
            .unwrap();
        assert_eq!(id, 4);
    }

    #[tokio::test]
    async fn test_empty_update_reports_no_data() {
        let repo = MockMaintenanceRepository::new();
        let service = MaintenanceService::new(repo);

        let err = service
            .update_task(1, UpdateMaintenance::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No data provided");
    }
}
