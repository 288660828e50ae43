//! Get Subnet By ID Use Case
//!
//! Returns the subnet together with its live pool counters, so callers can
//! display utilization without a second round trip. The counters are read
//! from the store on demand and never cached.

use std::sync::Arc;

use crate::domain::gateways::{IpAddressRepository, SubnetRepository};
use crate::domain::models::ip_address::PoolCounts;
use crate::domain::models::subnet::{Subnet, SubnetId};
use crate::shared::errors::UseCaseError;

/// Use case for getting a subnet with its pool counters
pub struct GetSubnetUseCase {
    subnet_repository: Arc<dyn SubnetRepository>,
    ip_repository: Arc<dyn IpAddressRepository>,
}

impl GetSubnetUseCase {
    /// Create a new GetSubnetUseCase
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
    pub async fn execute(&self, id: &SubnetId) -> Result<(Subnet, PoolCounts), UseCaseError> {
        tracing::debug!(subnet_id = %id, "Getting subnet by ID");

        let subnet = self
            .subnet_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(subnet_id = %id, "Subnet not found");
                UseCaseError::NotFound {
                    resource: "Subnet".to_string(),
                    id: id.to_string(),
                }
            })?;

        let counts = self.ip_repository.count_by_status(id).await?;
        Ok((subnet, counts))
    }
}
