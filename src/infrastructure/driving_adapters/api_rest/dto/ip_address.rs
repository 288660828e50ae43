//! IP Address DTOs
//!
//! Data transfer objects for allocation, reservation and release endpoints.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::ip_address::IpAddress;

lazy_static! {
    /// RFC 1123 style hostname labels joined by dots
    static ref HOSTNAME_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)*$"
    )
    .expect("valid regex");
}

/// Validates a device hostname
fn validate_hostname(hostname: &str) -> Result<(), validator::ValidationError> {
    if HOSTNAME_REGEX.is_match(hostname) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("hostname");
        error.message = Some("Invalid hostname (RFC 1123 labels separated by dots)".into());
        Err(error)
    }
}

/// DTO for allocating the next free address
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AllocateIpDto {
    #[validate(length(min = 1, max = 253, message = "hostname must be between 1 and 253 characters"))]
    #[validate(custom(function = "validate_hostname"))]
    pub hostname: Option<String>,
}

/// DTO for reserving an address
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReserveIpDto {
    /// Specific address to pin; omitted means lowest free
    pub address: Option<String>,

    #[validate(length(max = 255, message = "description must be at most 255 characters"))]
    pub description: Option<String>,
}

/// Pool entry response DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpResponseDto {
    pub id: String,
    pub subnet_id: String,
    pub address: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<IpAddress> for IpResponseDto {
    fn from(ip: IpAddress) -> Self {
        Self {
            id: ip.id().to_string(),
            subnet_id: ip.subnet_id().to_string(),
            address: ip.address().to_string(),
            status: ip.status().to_string(),
            device_id: ip.device_id().map(ToString::to_string),
            description: ip.description().map(str::to_string),
            updated_at: ip.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostname_validation() {
        assert!(validate_hostname("web-01").is_ok());
        assert!(validate_hostname("db.internal.example.com").is_ok());
        assert!(validate_hostname("-bad").is_err());
        assert!(validate_hostname("no spaces").is_err());
    }

    #[test]
    fn empty_allocate_dto_is_valid() {
        assert!(AllocateIpDto::default().validate().is_ok());
    }
}
