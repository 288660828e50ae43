//! Get Utilization Use Case
//!
//! Computes utilization of a subnet's pool on demand:
//! `allocated / total_usable * 100`, where allocated counts every entry
//! whose status is not free. Nothing is cached, so the figure can never go
//! stale relative to the pool.

use std::sync::Arc;

use crate::domain::gateways::{IpAddressRepository, SubnetRepository};
use crate::domain::models::ip_address::PoolCounts;
use crate::domain::models::subnet::SubnetId;
use crate::shared::errors::UseCaseError;

/// Use case for computing a subnet's utilization
pub struct GetUtilizationUseCase {
    subnet_repository: Arc<dyn SubnetRepository>,
    ip_repository: Arc<dyn IpAddressRepository>,
}

impl GetUtilizationUseCase {
    /// Create a new GetUtilizationUseCase
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
    pub async fn execute(&self, subnet_id: &SubnetId) -> Result<PoolCounts, UseCaseError> {
        tracing::debug!(subnet_id = %subnet_id, "Computing utilization");

        if self.subnet_repository.find_by_id(subnet_id).await?.is_none() {
            return Err(UseCaseError::NotFound {
                resource: "Subnet".to_string(),
                id: subnet_id.to_string(),
            });
        }

        let counts = self.ip_repository.count_by_status(subnet_id).await?;
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::coordinator::AllocationCoordinator;
    use crate::application::use_cases::addresses::{AllocateIpUseCase, ReserveIpUseCase};
    use crate::application::use_cases::namespaces::{
        CreateNamespaceInput, CreateNamespaceUseCase,
    };
    use crate::application::use_cases::subnets::{CreateSubnetInput, CreateSubnetUseCase};
    use crate::infrastructure::driven_adapters::store::InMemoryStore;

    #[tokio::test]
    async fn utilization_tracks_allocations_and_reservations() {
        let store = Arc::new(InMemoryStore::new());
        let coordinator = Arc::new(AllocationCoordinator::new());

        let ns = CreateNamespaceUseCase::new(store.clone())
            .execute(CreateNamespaceInput {
                name: "prod".to_string(),
                root_cidr: "10.0.0.0/8".to_string(),
            })
            .await
            .unwrap();
        let subnet = CreateSubnetUseCase::new(
            store.clone(),
            store.clone(),
            store.clone(),
            coordinator.clone(),
        )
        .execute(CreateSubnetInput {
            namespace_id: *ns.id(),
            cidr: "10.0.0.0/28".to_string(),
            label: "lan".to_string(),
            vlan_id: None,
            location: None,
        })
        .await
        .unwrap();

        let use_case = GetUtilizationUseCase::new(store.clone(), store.clone());
        let counts = use_case.execute(subnet.id()).await.unwrap();
        assert_eq!(counts.total_usable(), 14);
        assert_eq!(counts.utilization_percent(), 0.0);

        let allocate =
            AllocateIpUseCase::new(store.clone(), store.clone(), store.clone(), coordinator.clone());
        for _ in 0..6 {
            allocate.execute(subnet.id(), None).await.unwrap();
        }
        ReserveIpUseCase::new(store.clone(), store.clone(), coordinator.clone())
            .execute(subnet.id(), None, None)
            .await
            .unwrap();

        let counts = use_case.execute(subnet.id()).await.unwrap();
        assert_eq!(counts.active, 6);
        assert_eq!(counts.reserved, 1);
        assert_eq!(counts.utilization_percent(), 50.0);
    }

    #[tokio::test]
    async fn unknown_subnet_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let use_case = GetUtilizationUseCase::new(store.clone(), store);
        let result = use_case.execute(&SubnetId::new()).await;
        assert!(matches!(
            result.unwrap_err(),
            UseCaseError::NotFound { .. }
        ));
    }
}
