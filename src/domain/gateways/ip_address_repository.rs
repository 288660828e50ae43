//! IP Address Repository Gateway
//!
//! Abstract trait defining the contract for address pool persistence. The
//! pool for a subnet is created once, at subnet creation time, and after
//! that only entry statuses change.

use std::net::Ipv4Addr;

use async_trait::async_trait;

use crate::domain::models::ip_address::{IpAddress, IpAddressId, IpStatus, PoolCounts};
use crate::domain::models::subnet::SubnetId;
use crate::shared::errors::RepositoryError;

/// Repository trait for IP address pool persistence operations
#[async_trait]
pub trait IpAddressRepository: Send + Sync {
    /// Materialize a subnet's pool: insert all entries in one batch
    async fn create_pool(&self, entries: Vec<IpAddress>) -> Result<(), RepositoryError>;

    /// Find a pool entry by its record ID
    async fn find_by_id(&self, id: &IpAddressId) -> Result<Option<IpAddress>, RepositoryError>;

    /// Find a pool entry by subnet and address value
    async fn find_by_address(
        &self,
        subnet_id: &SubnetId,
        address: Ipv4Addr,
    ) -> Result<Option<IpAddress>, RepositoryError>;

    /// Find the lowest-numbered free entry of a subnet, if any
    async fn find_lowest_free(
        &self,
        subnet_id: &SubnetId,
    ) -> Result<Option<IpAddress>, RepositoryError>;

    /// List a subnet's pool entries in ascending address order, optionally
    /// filtered by status
    async fn find_by_subnet(
        &self,
        subnet_id: &SubnetId,
        status: Option<IpStatus>,
    ) -> Result<Vec<IpAddress>, RepositoryError>;

    /// Persist a status transition of one entry
    async fn update(&self, ip: &IpAddress) -> Result<IpAddress, RepositoryError>;

    /// Count a subnet's entries per status
    async fn count_by_status(&self, subnet_id: &SubnetId) -> Result<PoolCounts, RepositoryError>;
}
