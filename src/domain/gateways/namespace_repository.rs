//! Namespace Repository Gateway
//!
//! Abstract trait defining the contract for namespace persistence operations.

use async_trait::async_trait;

use crate::domain::models::namespace::{Namespace, NamespaceId};
use crate::shared::errors::RepositoryError;

/// Repository trait for Namespace persistence operations
#[async_trait]
pub trait NamespaceRepository: Send + Sync {
    /// Find a namespace by its ID
    async fn find_by_id(&self, id: &NamespaceId) -> Result<Option<Namespace>, RepositoryError>;

    /// Find a namespace by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<Namespace>, RepositoryError>;

    /// Find all namespaces, sorted by name ascending
    async fn find_all(&self) -> Result<Vec<Namespace>, RepositoryError>;

    /// Create a new namespace
    async fn create(&self, namespace: &Namespace) -> Result<Namespace, RepositoryError>;
}
