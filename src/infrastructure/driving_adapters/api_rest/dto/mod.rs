//! Data Transfer Objects
//!
//! Request and response DTOs for the REST API.

pub mod ip_address;
pub mod namespace;
pub mod subnet;

pub use ip_address::{AllocateIpDto, IpResponseDto, ReserveIpDto};
pub use namespace::{CreateNamespaceDto, NamespaceResponseDto, SuggestCidrResponseDto};
pub use subnet::{CreateSubnetDto, SubnetResponseDto, UtilizationResponseDto};
