use std::sync::Arc;
use validator::Validate;

use super::models::{CreateProperty, Property, PropertyFilter, UpdateProperty};
use super::repository::PropertyRepository;
use crate::error::{PortfolioError, PortfolioResult};

pub(crate) const RESOURCE: &str = "Property";

/// Service layer for Property business logic
#[derive(Clone)]
pub struct PropertyService<R: PropertyRepository> {
    repository: Arc<R>,
}

impl<R: PropertyRepository> PropertyService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_properties(&self, filter: PropertyFilter) -> PortfolioResult<Vec<Property>> {
        self.repository.list(filter.into_query()?).await
    }

    pub async fn get_property(&self, id: i32) -> PortfolioResult<Property> {
        self.repository
            .get(id)
            .await?
            .ok_or(PortfolioError::not_found(RESOURCE, id))
    }

    /// Validate and insert; returns the new id
    pub async fn create_property(&self, input: CreateProperty) -> PortfolioResult<i32> {
        input
            .validate()
            .map_err(|e| PortfolioError::Validation(e.to_string()))?;

        self.repository.create(input.into_new()?).await
    }

    pub async fn update_property(&self, id: i32, input: UpdateProperty) -> PortfolioResult<()> {
        input
            .validate()
            .map_err(|e| PortfolioError::Validation(e.to_string()))?;

        if !self.repository.update(id, input.into_patch()?).await? {
            return Err(PortfolioError::not_found(RESOURCE, id));
        }
        Ok(())
    }

    /// Delete a property that has no leases or maintenance tasks
    pub async fn delete_property(&self, id: i32) -> PortfolioResult<()> {
        if !self.repository.delete(id).await? {
            return Err(PortfolioError::not_found(RESOURCE, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::repository::MockPropertyRepository;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_create_passes_checked_values() {
        let mut repo = MockPropertyRepository::new();
        repo.expect_create()
            .withf(|new| new.address == "5 Elm Road" && new.price == Decimal::new(12_050, 2))
            .returning(|_| Ok(11));

        let service = PropertyService::new(repo);
        let id = service
            .create_property(CreateProperty {
                address: Some("5 Elm Road ".into()),
                type_id: Some(1),
                status_id: Some(1),
                purchase_date: Some("2019-09-09".into()),
                price: Some(Decimal::new(120_499, 3)),
            })
            .await
            .unwrap();
        assert_eq!(id, 11);
    }

    #[tokio::test]
    async fn test_missing_fields_never_reach_repository() {
        let repo = MockPropertyRepository::new();
        let service = PropertyService::new(repo);

        let err = service
            .create_property(CreateProperty {
                address: Some("5 Elm Road".into()),
                price: Some(Decimal::ONE),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: typeId, statusId, purchaseDate"
        );
    }

    #[tokio::test]
    async fn test_update_missing_property_is_not_found() {
        let mut repo = MockPropertyRepository::new();
        repo.expect_update()
            .with(eq(8), mockall::predicate::always())
            .returning(|_, _| Ok(false));

        let service = PropertyService::new(repo);
        let err = service
            .update_property(
                8,
                UpdateProperty {
                    address: Some("New".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Property not found");
    }

    #[tokio::test]
    async fn test_delete_conflict_is_propagated() {
        let mut repo = MockPropertyRepository::new();
        repo.expect_delete().with(eq(3)).returning(|_| {
            Err(PortfolioError::Conflict(
                "Cannot delete property 3: referenced by 1 lease(s)".into(),
            ))
        });

        let service = PropertyService::new(repo);
        assert!(matches!(
            service.delete_property(3).await,
            Err(PortfolioError::Conflict(_))
        ));
    }
}
