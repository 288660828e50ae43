//! List Subnet IPs Use Case
//!
//! Lists a subnet's pool entries in ascending address order, optionally
//! filtered by status.

use std::sync::Arc;

use crate::domain::gateways::{IpAddressRepository, SubnetRepository};
use crate::domain::models::ip_address::{IpAddress, IpStatus};
use crate::domain::models::subnet::SubnetId;
use crate::shared::errors::UseCaseError;

/// Use case for listing a subnet's pool entries
pub struct ListSubnetIpsUseCase {
    subnet_repository: Arc<dyn SubnetRepository>,
    ip_repository: Arc<dyn IpAddressRepository>,
}

impl ListSubnetIpsUseCase {
    /// Create a new ListSubnetIpsUseCase
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
    /// Returns `UseCaseError::NotFound` if the subnet doesn't exist.
    pub async fn execute(
        &self,
        subnet_id: &SubnetId,
        status: Option<IpStatus>,
    ) -> Result<Vec<IpAddress>, UseCaseError> {
        tracing::debug!(subnet_id = %subnet_id, status = ?status, "Listing subnet IPs");

        if self.subnet_repository.find_by_id(subnet_id).await?.is_none() {
            return Err(UseCaseError::NotFound {
                resource: "Subnet".to_string(),
                id: subnet_id.to_string(),
            });
        }

        let entries = self.ip_repository.find_by_subnet(subnet_id, status).await?;
        tracing::debug!(count = entries.len(), "Found pool entries");
        Ok(entries)
    }
}
