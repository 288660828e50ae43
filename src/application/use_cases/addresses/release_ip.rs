//! Release IP Use Case
//!
//! Returns an active or reserved address to the free pool. The device link
//! and description are cleared; the device record itself stays. Releasing
//! an address that is already free fails, so double releases surface
//! instead of being silently absorbed.

use std::sync::Arc;

use crate::application::coordinator::AllocationCoordinator;
use crate::domain::gateways::IpAddressRepository;
use crate::domain::models::ip_address::{IpAddress, IpAddressId};
use crate::shared::errors::UseCaseError;

/// Use case for releasing an address back to the pool
pub struct ReleaseIpUseCase {
    ip_repository: Arc<dyn IpAddressRepository>,
    coordinator: Arc<AllocationCoordinator>,
}

impl ReleaseIpUseCase {
    /// Create a new ReleaseIpUseCase
    #[must_use]
    pub fn new(
        ip_repository: Arc<dyn IpAddressRepository>,
        coordinator: Arc<AllocationCoordinator>,
    ) -> Self {
        Self {
            ip_repository,
            coordinator,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if no pool entry has this ID and
    /// `DomainError::AddressNotActive` when the entry is already free.
    pub async fn execute(&self, id: &IpAddressId) -> Result<IpAddress, UseCaseError> {
        tracing::info!(ip_id = %id, "Releasing IP address");

        let entry = self
            .ip_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound {
                resource: "IPAddress".to_string(),
                id: id.to_string(),
            })?;

        let _guard = self.coordinator.lock_subnet(entry.subnet_id()).await;

        // re-read under the lock; a concurrent release may have won
        let entry = self
            .ip_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound {
                resource: "IPAddress".to_string(),
                id: id.to_string(),
            })?;

        let released = entry.release()?;
        let stored = self.ip_repository.update(&released).await?;

        tracing::info!(ip_id = %id, address = %stored.address(), "Address released");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::addresses::AllocateIpUseCase;
    use crate::application::use_cases::namespaces::{
        CreateNamespaceInput, CreateNamespaceUseCase,
    };
    use crate::application::use_cases::subnets::{CreateSubnetInput, CreateSubnetUseCase};
    use crate::domain::models::ip_address::IpStatus;
    use crate::domain::models::subnet::SubnetId;
    use crate::infrastructure::driven_adapters::store::InMemoryStore;
    use crate::shared::errors::DomainError;

    struct Fixture {
        store: Arc<InMemoryStore>,
        coordinator: Arc<AllocationCoordinator>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: Arc::new(InMemoryStore::new()),
                coordinator: Arc::new(AllocationCoordinator::new()),
            }
        }

        async fn subnet(&self, cidr: &str) -> SubnetId {
            let ns = CreateNamespaceUseCase::new(self.store.clone())
                .execute(CreateNamespaceInput {
                    name: "prod".to_string(),
                    root_cidr: "10.0.0.0/8".to_string(),
                })
                .await
                .unwrap();
            let subnet = CreateSubnetUseCase::new(
                self.store.clone(),
                self.store.clone(),
                self.store.clone(),
                self.coordinator.clone(),
            )
            .execute(CreateSubnetInput {
                namespace_id: *ns.id(),
                cidr: cidr.to_string(),
                label: "lan".to_string(),
                vlan_id: None,
                location: None,
            })
            .await
            .unwrap();
            *subnet.id()
        }

        fn allocate(&self) -> AllocateIpUseCase {
            AllocateIpUseCase::new(
                self.store.clone(),
                self.store.clone(),
                self.store.clone(),
                self.coordinator.clone(),
            )
        }

        fn release(&self) -> ReleaseIpUseCase {
            ReleaseIpUseCase::new(self.store.clone(), self.coordinator.clone())
        }
    }

    #[tokio::test]
    async fn released_address_becomes_the_next_allocation() {
        let fixture = Fixture::new();
        let subnet = fixture.subnet("10.0.1.0/24").await;

        let first = fixture
            .allocate()
            .execute(&subnet, Some("web-01".to_string()))
            .await
            .unwrap();
        fixture.allocate().execute(&subnet, None).await.unwrap();

        let released = fixture.release().execute(first.id()).await.unwrap();
        assert_eq!(released.status(), IpStatus::Free);
        assert!(released.device_id().is_none());

        // lowest-free again after the release
        let next = fixture.allocate().execute(&subnet, None).await.unwrap();
        assert_eq!(next.address(), first.address());
    }

    #[tokio::test]
    async fn double_release_is_a_conflict() {
        let fixture = Fixture::new();
        let subnet = fixture.subnet("10.0.1.0/24").await;

        let ip = fixture.allocate().execute(&subnet, None).await.unwrap();
        fixture.release().execute(ip.id()).await.unwrap();

        let err = fixture.release().execute(ip.id()).await.unwrap_err();
        assert!(matches!(
            err,
            UseCaseError::Domain(DomainError::AddressNotActive(_))
        ));
    }

    #[tokio::test]
    async fn unknown_entry_is_not_found() {
        let fixture = Fixture::new();
        let result = fixture.release().execute(&IpAddressId::new()).await;
        assert!(matches!(
            result.unwrap_err(),
            UseCaseError::NotFound { .. }
        ));
    }
}
