//! Namespace Domain Model
//!
//! An isolated address-space scope (a VRF or environment) with its own root
//! range. Subnets in different namespaces never overlap-check against each
//! other.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::models::cidr::Cidr;

/// Newtype wrapper for Namespace ID providing type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamespaceId(Uuid);

impl NamespaceId {
    /// Create a new random NamespaceId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a NamespaceId from an existing UUID
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NamespaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for NamespaceId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Data required to create a new Namespace
#[derive(Debug, Clone)]
pub struct CreateNamespaceData {
    pub name: String,
    pub root_cidr: Cidr,
}

/// Namespace domain entity
#[derive(Debug, Clone)]
pub struct Namespace {
    id: NamespaceId,
    name: String,
    root_cidr: Cidr,
    created_at: DateTime<Utc>,
}

impl Namespace {
    /// Create a new Namespace from creation data
    #[must_use]
    pub fn new(data: CreateNamespaceData) -> Self {
        Self {
            id: NamespaceId::new(),
            name: data.name,
            root_cidr: data.root_cidr,
            created_at: Utc::now(),
        }
    }

    /// Restore a Namespace from persisted data
    #[must_use]
    pub fn restore(
        id: NamespaceId,
        name: String,
        root_cidr: Cidr,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            root_cidr,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> &NamespaceId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn root_cidr(&self) -> &Cidr {
        &self.root_cidr
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
