//! List Namespaces Use Case

use std::sync::Arc;

use crate::domain::gateways::NamespaceRepository;
use crate::domain::models::namespace::Namespace;
use crate::shared::errors::UseCaseError;

/// Use case for listing all namespaces
pub struct ListNamespacesUseCase {
    namespace_repository: Arc<dyn NamespaceRepository>,
}

impl ListNamespacesUseCase {
    /// Create a new ListNamespacesUseCase
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
    /// Returns `UseCaseError::Repository` if there's a storage error.
    pub async fn execute(&self) -> Result<Vec<Namespace>, UseCaseError> {
        tracing::debug!("Listing namespaces");

        let namespaces = self.namespace_repository.find_all().await?;

        tracing::debug!(count = namespaces.len(), "Found namespaces");
        Ok(namespaces)
    }
}
