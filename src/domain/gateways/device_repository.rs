//! Device Repository Gateway
//!
//! Abstract trait defining the contract for device persistence operations.
//! Devices are referenced by pool entries but never owned by them; no
//! operation here deletes a device.

use async_trait::async_trait;

use crate::domain::models::device::{Device, DeviceId};
use crate::shared::errors::RepositoryError;

/// Repository trait for Device persistence operations
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Find a device by its ID
    async fn find_by_id(&self, id: &DeviceId) -> Result<Option<Device>, RepositoryError>;

    /// Find a device by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<Device>, RepositoryError>;

    /// Return the device with the given name, creating it if missing.
    /// Explicit upsert-by-name; allocation uses this for dynamic
    /// provisioning.
    async fn upsert_by_name(&self, name: &str) -> Result<Device, RepositoryError>;
}
