//! Get Namespace By ID Use Case

use std::sync::Arc;

use crate::domain::gateways::NamespaceRepository;
use crate::domain::models::namespace::{Namespace, NamespaceId};
use crate::shared::errors::UseCaseError;

/// Use case for getting a namespace by ID
pub struct GetNamespaceUseCase {
    namespace_repository: Arc<dyn NamespaceRepository>,
}

impl GetNamespaceUseCase {
    /// Create a new GetNamespaceUseCase
    #[must_use]
    pub fn new(namespace_repository: Arc<dyn NamespaceRepository>) -> Self {
        Self {
            namespace_repository,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the namespace doesn't exist.
    pub async fn execute(&self, id: &NamespaceId) -> Result<Namespace, UseCaseError> {
        tracing::debug!(namespace_id = %id, "Getting namespace by ID");

        let namespace = self
            .namespace_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(namespace_id = %id, "Namespace not found");
                UseCaseError::NotFound {
                    resource: "Namespace".to_string(),
                    id: id.to_string(),
                }
            })?;

        Ok(namespace)
    }
}
