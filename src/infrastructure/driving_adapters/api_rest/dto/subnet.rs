//! Subnet DTOs
//!
//! Data transfer objects for subnet API endpoints. Responses always carry
//! the live pool counters next to the subnet itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::ip_address::PoolCounts;
use crate::domain::models::subnet::Subnet;
use crate::infrastructure::driving_adapters::api_rest::dto::namespace::validate_name;

/// DTO for registering a new subnet
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubnetDto {
    pub namespace_id: String,

    #[validate(length(min = 1, max = 18, message = "cidr must be a dotted-quad CIDR"))]
    pub cidr: String,

    #[validate(length(min = 1, max = 100, message = "label must be between 1 and 100 characters"))]
    #[validate(custom(function = "validate_name"))]
    pub label: String,

    pub vlan_id: Option<u16>,

    #[validate(length(max = 100, message = "location must be at most 100 characters"))]
    pub location: Option<String>,
}

/// Subnet response DTO with its pool counters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetResponseDto {
    pub id: String,
    pub namespace_id: String,
    pub cidr: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub total_usable: u64,
    pub free: u64,
    pub active: u64,
    pub reserved: u64,
    pub utilization_percent: f64,
    pub created_at: DateTime<Utc>,
}

impl From<(Subnet, PoolCounts)> for SubnetResponseDto {
    fn from((subnet, counts): (Subnet, PoolCounts)) -> Self {
        Self {
            id: subnet.id().to_string(),
            namespace_id: subnet.namespace_id().to_string(),
            cidr: subnet.cidr().to_string(),
            label: subnet.label().to_string(),
            vlan_id: subnet.vlan_id(),
            location: subnet.location().map(str::to_string),
            total_usable: counts.total_usable(),
            free: counts.free,
            active: counts.active,
            reserved: counts.reserved,
            utilization_percent: counts.utilization_percent(),
            created_at: subnet.created_at(),
        }
    }
}

/// Response DTO for the utilization endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilizationResponseDto {
    pub subnet_id: String,
    pub total_usable: u64,
    pub free: u64,
    pub active: u64,
    pub reserved: u64,
    pub allocated: u64,
    pub utilization_percent: f64,
}

impl UtilizationResponseDto {
    #[must_use]
    pub fn new(subnet_id: String, counts: PoolCounts) -> Self {
        Self {
            subnet_id,
            total_usable: counts.total_usable(),
            free: counts.free,
            active: counts.active,
            reserved: counts.reserved,
            allocated: counts.allocated(),
            utilization_percent: counts.utilization_percent(),
        }
    }
}
