//! Device Domain Model
//!
//! A named endpoint that may hold any number of active addresses
//! (multi-homed). Devices are durable: releasing an address removes the
//! link but never deletes the device record.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Newtype wrapper for Device ID providing type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(Uuid);

impl DeviceId {
    /// Create a new random DeviceId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a DeviceId from an existing UUID
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

impl Default for DeviceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for DeviceId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Device domain entity
#[derive(Debug, Clone)]
pub struct Device {
    id: DeviceId,
    name: String,
    created_at: DateTime<Utc>,
}

impl Device {
    /// Create a new Device with the given name
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            id: DeviceId::new(),
            name,
            created_at: Utc::now(),
        }
    }

    /// Restore a Device from persisted data
    #[must_use]
    pub fn restore(id: DeviceId, name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
