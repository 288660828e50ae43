//! Suggest CIDR Use Case
//!
//! Finds the next free aligned block of a requested size inside a
//! namespace's root range. Runs under the namespace lock so a suggestion
//! taken straight into a create cannot race another registration.

use std::sync::Arc;

use crate::application::coordinator::AllocationCoordinator;
use crate::domain::gateways::{NamespaceRepository, SubnetRepository};
use crate::domain::models::cidr::Cidr;
use crate::domain::models::namespace::NamespaceId;
use crate::domain::services::overlap_index::OverlapIndex;
use crate::shared::errors::UseCaseError;

/// Use case for suggesting the next free CIDR block
pub struct SuggestCidrUseCase {
    namespace_repository: Arc<dyn NamespaceRepository>,
    subnet_repository: Arc<dyn SubnetRepository>,
    coordinator: Arc<AllocationCoordinator>,
}

impl SuggestCidrUseCase {
    /// Create a new SuggestCidrUseCase
    #[must_use]
    pub fn new(
        namespace_repository: Arc<dyn NamespaceRepository>,
        subnet_repository: Arc<dyn SubnetRepository>,
        coordinator: Arc<AllocationCoordinator>,
    ) -> Self {
        Self {
            namespace_repository,
            subnet_repository,
            coordinator,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the namespace doesn't exist or no
    /// free aligned `/prefix` block remains inside its root range.
    pub async fn execute(
        &self,
        namespace_id: &NamespaceId,
        prefix: u8,
    ) -> Result<Cidr, UseCaseError> {
        tracing::debug!(namespace_id = %namespace_id, prefix, "Suggesting next free CIDR");

        let namespace = self
            .namespace_repository
            .find_by_id(namespace_id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound {
                resource: "Namespace".to_string(),
                id: namespace_id.to_string(),
            })?;

        let _guard = self.coordinator.lock_namespace(namespace_id).await;

        let subnets = self.subnet_repository.find_by_namespace(namespace_id).await?;
        let index = OverlapIndex::from_subnets(&subnets);

        index
            .suggest_next_free(namespace.root_cidr(), prefix)
            .inspect(|suggestion| {
                tracing::info!(namespace_id = %namespace_id, cidr = %suggestion, "Suggested CIDR");
            })
            .ok_or_else(|| {
                tracing::warn!(namespace_id = %namespace_id, prefix, "Root range exhausted");
                UseCaseError::NotFound {
                    resource: format!("free /{prefix} block"),
                    id: namespace_id.to_string(),
                }
            })
    }
}
