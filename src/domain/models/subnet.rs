//! Subnet Domain Model
//!
//! A subnet belongs to exactly one namespace and owns an address pool. Within
//! a namespace no two subnet ranges may intersect; a subnet is never moved
//! between namespaces.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::models::cidr::Cidr;
use crate::domain::models::namespace::NamespaceId;
use crate::shared::errors::DomainError;

/// Valid VLAN tag range per IEEE 802.1Q
pub const VLAN_MIN: u16 = 1;
pub const VLAN_MAX: u16 = 4094;

/// Newtype wrapper for Subnet ID providing type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubnetId(Uuid);

impl SubnetId {
    /// Create a new random SubnetId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a SubnetId from an existing UUID
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

impl Default for SubnetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubnetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SubnetId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Data required to create a new Subnet
#[derive(Debug, Clone)]
pub struct CreateSubnetData {
    pub namespace_id: NamespaceId,
    pub cidr: Cidr,
    pub label: String,
    pub vlan_id: Option<u16>,
    pub location: Option<String>,
}

/// Subnet domain entity
#[derive(Debug, Clone)]
pub struct Subnet {
    id: SubnetId,
    namespace_id: NamespaceId,
    cidr: Cidr,
    label: String,
    vlan_id: Option<u16>,
    location: Option<String>,
    created_at: DateTime<Utc>,
}

impl Subnet {
    /// Create a new Subnet from creation data
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidVlan` when a VLAN tag is present and
    /// outside 1-4094.
    pub fn new(data: CreateSubnetData) -> Result<Self, DomainError> {
        if let Some(vlan) = data.vlan_id {
            if !(VLAN_MIN..=VLAN_MAX).contains(&vlan) {
                return Err(DomainError::InvalidVlan(vlan));
            }
        }
        Ok(Self {
            id: SubnetId::new(),
            namespace_id: data.namespace_id,
            cidr: data.cidr,
            label: data.label,
            vlan_id: data.vlan_id,
            location: data.location,
            created_at: Utc::now(),
        })
    }

    /// Restore a Subnet from persisted data
    #[must_use]
    pub fn restore(
        id: SubnetId,
        namespace_id: NamespaceId,
        cidr: Cidr,
        label: String,
        vlan_id: Option<u16>,
        location: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            namespace_id,
            cidr,
            label,
            vlan_id,
            location,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> &SubnetId {
        &self.id
    }

    #[must_use]
    pub fn namespace_id(&self) -> &NamespaceId {
        &self.namespace_id
    }

    #[must_use]
    pub fn cidr(&self) -> &Cidr {
        &self.cidr
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn vlan_id(&self) -> Option<u16> {
        self.vlan_id
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
