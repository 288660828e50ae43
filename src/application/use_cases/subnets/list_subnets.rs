//! List Subnets Use Case
//!
//! Lists subnets, optionally scoped to one namespace, each with its live
//! pool counters.

use std::sync::Arc;

use crate::domain::gateways::{IpAddressRepository, SubnetRepository};
use crate::domain::models::ip_address::PoolCounts;
use crate::domain::models::namespace::NamespaceId;
use crate::domain::models::subnet::Subnet;
use crate::shared::errors::UseCaseError;

/// Use case for listing subnets with their pool counters
pub struct ListSubnetsUseCase {
    subnet_repository: Arc<dyn SubnetRepository>,
    ip_repository: Arc<dyn IpAddressRepository>,
}

impl ListSubnetsUseCase {
    /// Create a new ListSubnetsUseCase
    #[must_use]
    pub fn new(
        subnet_repository: Arc<dyn SubnetRepository>,
        ip_repository: Arc<dyn IpAddressRepository>,
    ) -> Self {
        Self {
            subnet_repository,
            ip_repository,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Repository` if there's a storage error.
    pub async fn execute(
        &self,
        namespace_id: Option<&NamespaceId>,
    ) -> Result<Vec<(Subnet, PoolCounts)>, UseCaseError> {
        tracing::debug!("Listing subnets");

        let subnets = match namespace_id {
            Some(ns) => self.subnet_repository.find_by_namespace(ns).await?,
            None => self.subnet_repository.find_all().await?,
        };

        let mut results = Vec::with_capacity(subnets.len());
        for subnet in subnets {
            let counts = self.ip_repository.count_by_status(subnet.id()).await?;
            results.push((subnet, counts));
        }

        tracing::debug!(count = results.len(), "Found subnets");
        Ok(results)
    }
}
