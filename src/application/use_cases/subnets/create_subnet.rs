//! Create Subnet Use Case
//!
//! Validates a subnet creation request against its namespace's root range
//! and overlap index, then persists the subnet and materializes its address
//! pool. The whole validate-and-commit sequence runs under the namespace
//! lock, so two competing requests with overlapping ranges cannot both
//! succeed.

use std::sync::Arc;

use crate::application::coordinator::AllocationCoordinator;
use crate::domain::gateways::{IpAddressRepository, NamespaceRepository, SubnetRepository};
use crate::domain::models::cidr::Cidr;
use crate::domain::models::ip_address::IpAddress;
use crate::domain::models::namespace::NamespaceId;
use crate::domain::models::subnet::{CreateSubnetData, Subnet};
use crate::domain::services::overlap_index::OverlapIndex;
use crate::shared::errors::{DomainError, UseCaseError};

/// Input for subnet creation; the CIDR arrives as text and is validated here
#[derive(Debug, Clone)]
pub struct CreateSubnetInput {
    pub namespace_id: NamespaceId,
    pub cidr: String,
    pub label: String,
    pub vlan_id: Option<u16>,
    pub location: Option<String>,
}

/// Use case for creating a new subnet
pub struct CreateSubnetUseCase {
    namespace_repository: Arc<dyn NamespaceRepository>,
    subnet_repository: Arc<dyn SubnetRepository>,
    ip_repository: Arc<dyn IpAddressRepository>,
    coordinator: Arc<AllocationCoordinator>,
}

impl CreateSubnetUseCase {
    /// Create a new CreateSubnetUseCase
    #[must_use]
    pub fn new(
        namespace_repository: Arc<dyn NamespaceRepository>,
        subnet_repository: Arc<dyn SubnetRepository>,
        ip_repository: Arc<dyn IpAddressRepository>,
        coordinator: Arc<AllocationCoordinator>,
    ) -> Self {
        Self {
            namespace_repository,
            subnet_repository,
            ip_repository,
            coordinator,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the namespace doesn't exist, and
    /// `UseCaseError::Domain` with `MalformedCidr`, `OutOfScope`,
    /// `CidrOverlap` or `InvalidVlan` when validation fails.
    pub async fn execute(&self, input: CreateSubnetInput) -> Result<Subnet, UseCaseError> {
        tracing::info!(
            namespace_id = %input.namespace_id,
            cidr = %input.cidr,
            label = %input.label,
            "Creating subnet"
        );

        let namespace = self
            .namespace_repository
            .find_by_id(&input.namespace_id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound {
                resource: "Namespace".to_string(),
                id: input.namespace_id.to_string(),
            })?;

        let _guard = self.coordinator.lock_namespace(&input.namespace_id).await;

        let cidr = Cidr::parse(&input.cidr)?;

        let root = namespace.root_cidr();
        if !cidr.range().within(&root.range()) {
            tracing::warn!(cidr = %cidr, root = %root, "Subnet outside namespace root");
            return Err(DomainError::OutOfScope {
                candidate: cidr.to_string(),
                root: root.to_string(),
            }
            .into());
        }

        let existing = self
            .subnet_repository
            .find_by_namespace(&input.namespace_id)
            .await?;
        let index = OverlapIndex::from_subnets(&existing);
        if let Some(conflict) = index.find_overlap(&cidr.range()) {
            tracing::warn!(
                cidr = %cidr,
                conflicting_subnet = %conflict.subnet_id,
                conflicting_cidr = %conflict.cidr,
                "Subnet overlaps existing range"
            );
            return Err(DomainError::CidrOverlap {
                candidate: cidr.to_string(),
                conflicting_id: conflict.subnet_id.to_string(),
                conflicting_cidr: conflict.cidr.to_string(),
            }
            .into());
        }

        let subnet = Subnet::new(CreateSubnetData {
            namespace_id: input.namespace_id,
            cidr,
            label: input.label,
            vlan_id: input.vlan_id,
            location: input.location,
        })?;

        let created = self.subnet_repository.create(&subnet).await?;

        // materialize the pool: every usable host, all free
        let entries: Vec<IpAddress> = cidr
            .usable_hosts()
            .map(|addr| IpAddress::new_free(*created.id(), addr))
            .collect();
        let pool_size = entries.len();
        self.ip_repository.create_pool(entries).await?;

        tracing::info!(
            subnet_id = %created.id(),
            cidr = %created.cidr(),
            pool_size,
            "Subnet created successfully"
        );

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::namespaces::{
        CreateNamespaceInput, CreateNamespaceUseCase,
    };
    use crate::domain::models::ip_address::IpStatus;
    use crate::infrastructure::driven_adapters::store::InMemoryStore;

    struct Fixture {
        store: Arc<InMemoryStore>,
        use_case: CreateSubnetUseCase,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(InMemoryStore::new());
            let coordinator = Arc::new(AllocationCoordinator::new());
            let use_case = CreateSubnetUseCase::new(
                store.clone(),
                store.clone(),
                store.clone(),
                coordinator,
            );
            Self { store, use_case }
        }

        async fn namespace(&self, name: &str, root: &str) -> NamespaceId {
            let ns = CreateNamespaceUseCase::new(self.store.clone())
                .execute(CreateNamespaceInput {
                    name: name.to_string(),
                    root_cidr: root.to_string(),
                })
                .await
                .unwrap();
            *ns.id()
        }

        fn input(&self, namespace_id: NamespaceId, cidr: &str) -> CreateSubnetInput {
            CreateSubnetInput {
                namespace_id,
                cidr: cidr.to_string(),
                label: "lan".to_string(),
                vlan_id: None,
                location: None,
            }
        }
    }

    #[tokio::test]
    async fn creates_subnet_and_materializes_free_pool() {
        let fixture = Fixture::new();
        let ns = fixture.namespace("prod", "10.0.0.0/8").await;

        let subnet = fixture
            .use_case
            .execute(fixture.input(ns, "10.0.1.0/24"))
            .await
            .unwrap();

        let pool = fixture
            .store
            .find_by_subnet(subnet.id(), None)
            .await
            .unwrap();
        assert_eq!(pool.len(), 254);
        assert!(pool.iter().all(|ip| ip.status() == IpStatus::Free));
        assert_eq!(pool[0].address().to_string(), "10.0.1.1");
        assert_eq!(pool[253].address().to_string(), "10.0.1.254");
    }

    #[tokio::test]
    async fn rejects_overlap_within_the_namespace() {
        let fixture = Fixture::new();
        let ns = fixture.namespace("prod", "10.0.0.0/8").await;

        let first = fixture
            .use_case
            .execute(fixture.input(ns, "10.0.1.0/24"))
            .await
            .unwrap();

        let err = fixture
            .use_case
            .execute(fixture.input(ns, "10.0.1.128/25"))
            .await
            .unwrap_err();

        match err {
            UseCaseError::Domain(DomainError::CidrOverlap {
                conflicting_id,
                conflicting_cidr,
                ..
            }) => {
                assert_eq!(conflicting_id, first.id().to_string());
                assert_eq!(conflicting_cidr, "10.0.1.0/24");
            }
            other => panic!("expected CidrOverlap, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn accepts_disjoint_sibling_subnet() {
        let fixture = Fixture::new();
        let ns = fixture.namespace("prod", "10.0.0.0/8").await;

        fixture
            .use_case
            .execute(fixture.input(ns, "10.0.1.0/24"))
            .await
            .unwrap();
        assert!(fixture
            .use_case
            .execute(fixture.input(ns, "10.1.0.0/24"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn namespaces_do_not_overlap_check_against_each_other() {
        let fixture = Fixture::new();
        let prod = fixture.namespace("prod", "10.0.0.0/8").await;
        let dev = fixture.namespace("dev", "10.0.0.0/8").await;

        fixture
            .use_case
            .execute(fixture.input(prod, "10.0.1.0/24"))
            .await
            .unwrap();
        // the identical range is fine in another namespace
        assert!(fixture
            .use_case
            .execute(fixture.input(dev, "10.0.1.0/24"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn rejects_subnet_outside_the_root_range() {
        let fixture = Fixture::new();
        let ns = fixture.namespace("prod", "10.0.0.0/8").await;

        let err = fixture
            .use_case
            .execute(fixture.input(ns, "192.168.0.0/24"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UseCaseError::Domain(DomainError::OutOfScope { .. })
        ));
    }

    #[tokio::test]
    async fn rejects_malformed_cidr() {
        let fixture = Fixture::new();
        let ns = fixture.namespace("prod", "10.0.0.0/8").await;

        let err = fixture
            .use_case
            .execute(fixture.input(ns, "10.0.1.0"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UseCaseError::Domain(DomainError::MalformedCidr(_))
        ));
    }

    #[tokio::test]
    async fn rejects_invalid_vlan() {
        let fixture = Fixture::new();
        let ns = fixture.namespace("prod", "10.0.0.0/8").await;

        let mut input = fixture.input(ns, "10.0.1.0/24");
        input.vlan_id = Some(4095);
        let err = fixture.use_case.execute(input).await.unwrap_err();
        assert!(matches!(
            err,
            UseCaseError::Domain(DomainError::InvalidVlan(4095))
        ));
    }

    #[tokio::test]
    async fn normalizes_host_bits_in_the_request() {
        let fixture = Fixture::new();
        let ns = fixture.namespace("prod", "10.0.0.0/8").await;

        let subnet = fixture
            .use_case
            .execute(fixture.input(ns, "10.0.1.5/24"))
            .await
            .unwrap();
        assert_eq!(subnet.cidr().to_string(), "10.0.1.0/24");
    }

    #[tokio::test]
    async fn slash_30_pool_has_two_usable_addresses() {
        let fixture = Fixture::new();
        let ns = fixture.namespace("prod", "10.0.0.0/8").await;

        let subnet = fixture
            .use_case
            .execute(fixture.input(ns, "10.0.0.0/30"))
            .await
            .unwrap();
        let pool = fixture
            .store
            .find_by_subnet(subnet.id(), None)
            .await
            .unwrap();
        assert_eq!(pool.len(), 2);
    }
}
