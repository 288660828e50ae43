//! Reserve IP Use Case
//!
//! Marks an address reserved so automatic allocation skips it. The caller
//! may pin a specific address or let the engine pick the lowest free one.
//! Reservations never link a device.

use std::net::Ipv4Addr;
use std::sync::Arc;

use crate::application::coordinator::AllocationCoordinator;
use crate::domain::gateways::{IpAddressRepository, SubnetRepository};
use crate::domain::models::ip_address::IpAddress;
use crate::domain::models::subnet::SubnetId;
use crate::shared::errors::{DomainError, UseCaseError};

/// Use case for reserving an address in a subnet's pool
pub struct ReserveIpUseCase {
    subnet_repository: Arc<dyn SubnetRepository>,
    ip_repository: Arc<dyn IpAddressRepository>,
    coordinator: Arc<AllocationCoordinator>,
}

impl ReserveIpUseCase {
    /// Create a new ReserveIpUseCase
    #[must_use]
    pub fn new(
        subnet_repository: Arc<dyn SubnetRepository>,
        ip_repository: Arc<dyn IpAddressRepository>,
        coordinator: Arc<AllocationCoordinator>,
    ) -> Self {
        Self {
            subnet_repository,
            ip_repository,
            coordinator,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AddressNotInSubnet` when a pinned address is not
    /// a usable host of the subnet, `DomainError::AddressNotFree` when it is
    /// already taken, and `DomainError::PoolExhausted` when no address was
    /// pinned and none are free.
    pub async fn execute(
        &self,
        subnet_id: &SubnetId,
        address: Option<Ipv4Addr>,
        description: Option<String>,
    ) -> Result<IpAddress, UseCaseError> {
        tracing::info!(subnet_id = %subnet_id, address = ?address, "Reserving IP address");

        let subnet = self
            .subnet_repository
            .find_by_id(subnet_id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound {
                resource: "Subnet".to_string(),
                id: subnet_id.to_string(),
            })?;

        let _guard = self.coordinator.lock_subnet(subnet_id).await;

        let entry = match address {
            Some(addr) => {
                // network and broadcast never have pool records, so this
                // check also rejects them
                if !subnet.cidr().is_usable_host(addr) {
                    return Err(DomainError::AddressNotInSubnet(addr.to_string()).into());
                }
                self.ip_repository
                    .find_by_address(subnet_id, addr)
                    .await?
                    .ok_or_else(|| DomainError::AddressNotInSubnet(addr.to_string()))?
            }
            None => self
                .ip_repository
                .find_lowest_free(subnet_id)
                .await?
                .ok_or_else(|| DomainError::PoolExhausted {
                    subnet: subnet.cidr().to_string(),
                })?,
        };

        let reserved = entry.reserve(description)?;
        let stored = self.ip_repository.update(&reserved).await?;

        tracing::info!(
            subnet_id = %subnet_id,
            address = %stored.address(),
            "Address reserved"
        );
        Ok(stored)
    }
}
