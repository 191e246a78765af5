use std::sync::Arc;
use validator::Validate;

use super::models::{Lookup, LookupInput, LookupKind, LookupSortField};
use super::repository::LookupRepository;
use crate::error::{PortfolioError, PortfolioResult};
use crate::input::{no_data, text};
use crate::listing::{Sort, SortParams};

/// Service for one lookup table
#[derive(Clone)]
pub struct LookupService<R: LookupRepository> {
    kind: LookupKind,
    repository: Arc<R>,
}

impl<R: LookupRepository> LookupService<R> {
    pub fn new(kind: LookupKind, repository: R) -> Self {
        Self {
            kind,
            repository: Arc::new(repository),
        }
    }

    pub fn kind(&self) -> LookupKind {
        self.kind
    }

    pub async fn list(&self, params: SortParams) -> PortfolioResult<Vec<Lookup>> {
        let sort = Sort::<LookupSortField>::parse(params.sort.as_deref(), params.order.as_deref())?;
        self.repository.list(self.kind, sort).await
    }

    pub async fn get(&self, id: i32) -> PortfolioResult<Lookup> {
        self.repository
            .get(self.kind, id)
            .await?
            .ok_or(PortfolioError::not_found(self.kind.resource(), id))
    }

    pub async fn create(&self, input: LookupInput) -> PortfolioResult<i32> {
        let description = self.description(input)?;
        self.repository.create(self.kind, description).await
    }

    pub async fn update(&self, id: i32, input: LookupInput) -> PortfolioResult<()> {
        let description = self.description(input)?;

        if !self.repository.update(self.kind, id, description).await? {
            return Err(PortfolioError::not_found(self.kind.resource(), id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> PortfolioResult<()> {
        if !self.repository.delete(self.kind, id).await? {
            return Err(PortfolioError::not_found(self.kind.resource(), id));
        }
        Ok(())
    }

    fn description(&self, input: LookupInput) -> PortfolioResult<String> {
        input
            .validate()
            .map_err(|e| PortfolioError::Validation(e.to_string()))?;

        let description = input.description.ok_or_else(no_data)?;
        text(description, "description")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookups::repository::MockLookupRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_create_keeps_description_as_submitted() {
        let mut repo = MockLookupRepository::new();
        repo.expect_create()
            .with(eq(LookupKind::PaymentStatus), eq("  Waived ".to_string()))
            .returning(|_, _| Ok(4));

        let service = LookupService::new(LookupKind::PaymentStatus, repo);
        let id = service
            .create(LookupInput {
                description: Some("  Waived ".into()),
            })
            .await
            .unwrap();
        assert_eq!(id, 4);
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected_before_repository() {
        let repo = MockLookupRepository::new();
        let service = LookupService::new(LookupKind::PaymentStatus, repo);

        let err = service.create(LookupInput::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "No data provided");

        let err = service
            .update(1, LookupInput { description: Some(" ".into()) })
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::Validation(_)));
    }

    #[tokio::test]
    async fn test_missing_row_maps_to_not_found() {
        let mut repo = MockLookupRepository::new();
        repo.expect_get().returning(|_, _| Ok(None));
        repo.expect_delete().returning(|_, _| Ok(false));

        let service = LookupService::new(LookupKind::MaintenanceStatus, repo);

        let err = service.get(9).await.unwrap_err();
        assert_eq!(err.to_string(), "MaintenanceStatus not found");
        assert!(matches!(
            service.delete(9).await,
            Err(PortfolioError::NotFound { id: 9, .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_sort_is_rejected_before_repository() {
        let repo = MockLookupRepository::new();
        let service = LookupService::new(LookupKind::PropertyType, repo);

        let err = service
            .list(SortParams {
                sort: Some("price".into()),
                order: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::Validation(_)));
    }
}
