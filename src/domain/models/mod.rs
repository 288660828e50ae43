//! Domain Models
//!
//! Pure domain entities and value objects representing business concepts.

pub mod cidr;
pub mod device;
pub mod ip_address;
pub mod namespace;
pub mod subnet;

pub use cidr::{Cidr, IpRange};
pub use device::{Device, DeviceId};
pub use ip_address::{IpAddress, IpAddressId, IpStatus, PoolCounts};
pub use namespace::{CreateNamespaceData, Namespace, NamespaceId};
pub use subnet::{CreateSubnetData, Subnet, SubnetId};
