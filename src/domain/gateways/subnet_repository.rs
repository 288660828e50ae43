//! Subnet Repository Gateway
//!
//! Abstract trait defining the contract for subnet persistence operations.

use async_trait::async_trait;

use crate::domain::models::namespace::NamespaceId;
use crate::domain::models::subnet::{Subnet, SubnetId};
use crate::shared::errors::RepositoryError;

/// Repository trait for Subnet persistence operations
#[async_trait]
pub trait SubnetRepository: Send + Sync {
    /// Find a subnet by its ID
    async fn find_by_id(&self, id: &SubnetId) -> Result<Option<Subnet>, RepositoryError>;

    /// Find all subnets of a namespace, sorted by network address ascending
    async fn find_by_namespace(
        &self,
        namespace_id: &NamespaceId,
    ) -> Result<Vec<Subnet>, RepositoryError>;

    /// Find all subnets, sorted by network address ascending
    async fn find_all(&self) -> Result<Vec<Subnet>, RepositoryError>;

    /// Create a new subnet
    async fn create(&self, subnet: &Subnet) -> Result<Subnet, RepositoryError>;
}
