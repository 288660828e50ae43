//! Domain Layer
//!
//! Contains the core business logic, domain models, and gateway traits (ports).
//! This layer has no dependencies on infrastructure.

pub mod gateways;
pub mod models;
pub mod services;

pub use gateways::{
    DeviceRepository, IpAddressRepository, NamespaceRepository, SubnetRepository,
};
pub use models::{Cidr, Device, IpAddress, IpStatus, Namespace, Subnet};
pub use services::OverlapIndex;
