//! Allocate IP Use Case
//!
//! Takes the lowest-numbered free address of a subnet and marks it active,
//! optionally linking it to a device by hostname. The find-and-transition
//! runs under the subnet lock, so concurrent allocations always receive
//! distinct addresses.

use std::sync::Arc;

use crate::application::coordinator::AllocationCoordinator;
use crate::domain::gateways::{DeviceRepository, IpAddressRepository, SubnetRepository};
use crate::domain::models::ip_address::IpAddress;
use crate::domain::models::subnet::SubnetId;
use crate::shared::errors::{DomainError, UseCaseError};

/// Use case for allocating the next free address of a subnet
pub struct AllocateIpUseCase {
    subnet_repository: Arc<dyn SubnetRepository>,
    ip_repository: Arc<dyn IpAddressRepository>,
    device_repository: Arc<dyn DeviceRepository>,
    coordinator: Arc<AllocationCoordinator>,
}

impl AllocateIpUseCase {
    /// Create a new AllocateIpUseCase
    #[must_use]
    pub fn new(
        subnet_repository: Arc<dyn SubnetRepository>,
        ip_repository: Arc<dyn IpAddressRepository>,
        device_repository: Arc<dyn DeviceRepository>,
        coordinator: Arc<AllocationCoordinator>,
    ) -> Self {
        Self {
            subnet_repository,
            ip_repository,
            device_repository,
            coordinator,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the subnet doesn't exist and
    /// `DomainError::PoolExhausted` when no free address remains.
    pub async fn execute(
        &self,
        subnet_id: &SubnetId,
        hostname: Option<String>,
    ) -> Result<IpAddress, UseCaseError> {
        tracing::info!(subnet_id = %subnet_id, hostname = ?hostname, "Allocating IP address");

        let subnet = self
            .subnet_repository
            .find_by_id(subnet_id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound {
                resource: "Subnet".to_string(),
                id: subnet_id.to_string(),
            })?;

        let _guard = self.coordinator.lock_subnet(subnet_id).await;

        let free = self
            .ip_repository
            .find_lowest_free(subnet_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(subnet_id = %subnet_id, cidr = %subnet.cidr(), "Pool exhausted");
                DomainError::PoolExhausted {
                    subnet: subnet.cidr().to_string(),
                }
            })?;

        let device_id = match hostname {
            Some(name) => {
                let device = self.device_repository.upsert_by_name(&name).await?;
                Some(*device.id())
            }
            None => None,
        };

        let allocated = free.allocate(device_id)?;
        let stored = self.ip_repository.update(&allocated).await?;

        tracing::info!(
            subnet_id = %subnet_id,
            address = %stored.address(),
            "Address allocated"
        );
        Ok(stored)
    }
}
