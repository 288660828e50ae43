//! Gateway Traits (Ports)
//!
//! Abstract interfaces defining contracts for external dependencies.
//! These are implemented by driven adapters in the infrastructure layer.

pub mod device_repository;
pub mod ip_address_repository;
pub mod namespace_repository;
pub mod subnet_repository;

pub use device_repository::DeviceRepository;
pub use ip_address_repository::IpAddressRepository;
pub use namespace_repository::NamespaceRepository;
pub use subnet_repository::SubnetRepository;
