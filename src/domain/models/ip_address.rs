//! IP Address Domain Model
//!
//! One record per usable address of a subnet. Network and broadcast addresses
//! are never materialized as records, so no operation can ever target them.
//!
//! The address state machine is `free -> active` (allocate),
//! `free -> reserved` (reserve) and `active|reserved -> free` (release);
//! there is no direct edge between `active` and `reserved`.

use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::device::DeviceId;
use crate::domain::models::subnet::SubnetId;
use crate::shared::errors::DomainError;

/// Newtype wrapper for IP Address record ID providing type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpAddressId(Uuid);

impl IpAddressId {
    /// Create a new random IpAddressId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an IpAddressId from an existing UUID
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

impl Default for IpAddressId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for IpAddressId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for IpAddressId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Lifecycle status of a pool address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpStatus {
    Free,
    Active,
    Reserved,
}

impl IpStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Active => "active",
            Self::Reserved => "reserved",
        }
    }
}

impl std::str::FromStr for IpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "active" => Ok(Self::Active),
            "reserved" => Ok(Self::Reserved),
            other => Err(format!("unknown IP status '{other}'")),
        }
    }
}

impl std::fmt::Display for IpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// IP address pool entry
#[derive(Debug, Clone)]
pub struct IpAddress {
    id: IpAddressId,
    subnet_id: SubnetId,
    address: Ipv4Addr,
    status: IpStatus,
    device_id: Option<DeviceId>,
    description: Option<String>,
    updated_at: DateTime<Utc>,
}

impl IpAddress {
    /// Create a fresh, free pool entry for `address`
    #[must_use]
    pub fn new_free(subnet_id: SubnetId, address: Ipv4Addr) -> Self {
        Self {
            id: IpAddressId::new(),
            subnet_id,
            address,
            status: IpStatus::Free,
            device_id: None,
            description: None,
            updated_at: Utc::now(),
        }
    }

    /// Restore an IpAddress from persisted data
    #[must_use]
    pub fn restore(
        id: IpAddressId,
        subnet_id: SubnetId,
        address: Ipv4Addr,
        status: IpStatus,
        device_id: Option<DeviceId>,
        description: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            subnet_id,
            address,
            status,
            device_id,
            description,
            updated_at,
        }
    }

    /// Transition `free -> active`, optionally linking a device.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AddressNotFree` when the address is already
    /// active or reserved.
    pub fn allocate(self, device_id: Option<DeviceId>) -> Result<Self, DomainError> {
        if self.status != IpStatus::Free {
            return Err(DomainError::AddressNotFree(self.address.to_string()));
        }
        Ok(Self {
            status: IpStatus::Active,
            device_id,
            updated_at: Utc::now(),
            ..self
        })
    }

    /// Transition `free -> reserved`. Reservations never hold a device link.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AddressNotFree` when the address is already
    /// active or reserved.
    pub fn reserve(self, description: Option<String>) -> Result<Self, DomainError> {
        if self.status != IpStatus::Free {
            return Err(DomainError::AddressNotFree(self.address.to_string()));
        }
        Ok(Self {
            status: IpStatus::Reserved,
            description,
            updated_at: Utc::now(),
            ..self
        })
    }

    /// Transition `active|reserved -> free`, clearing the device link and
    /// description. The device entity itself is untouched.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AddressNotActive` when the address is already
    /// free (double-release is not idempotent).
    pub fn release(self) -> Result<Self, DomainError> {
        if self.status == IpStatus::Free {
            return Err(DomainError::AddressNotActive(self.address.to_string()));
        }
        Ok(Self {
            status: IpStatus::Free,
            device_id: None,
            description: None,
            updated_at: Utc::now(),
            ..self
        })
    }

    #[must_use]
    pub fn id(&self) -> &IpAddressId {
        &self.id
    }

    #[must_use]
    pub fn subnet_id(&self) -> &SubnetId {
        &self.subnet_id
    }

    #[must_use]
    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    #[must_use]
    pub fn status(&self) -> IpStatus {
        self.status
    }

    #[must_use]
    pub fn device_id(&self) -> Option<&DeviceId> {
        self.device_id.as_ref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Live pool counters for one subnet, computed from the store on demand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolCounts {
    pub free: u64,
    pub active: u64,
    pub reserved: u64,
}

impl PoolCounts {
    /// Total usable addresses in the pool
    #[must_use]
    pub fn total_usable(&self) -> u64 {
        self.free + self.active + self.reserved
    }

    /// Addresses currently not free
    #[must_use]
    pub fn allocated(&self) -> u64 {
        self.active + self.reserved
    }

    /// Utilization percentage, rounded to two decimals for display
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn utilization_percent(&self) -> f64 {
        let total = self.total_usable();
        if total == 0 {
            return 0.0;
        }
        let raw = self.allocated() as f64 / total as f64 * 100.0;
        (raw * 100.0).round() / 100.0
    }
}
