//! Address Use Cases
//!
//! Business logic for the address lifecycle: allocate, reserve and release.

mod allocate_ip;
mod list_subnet_ips;
mod release_ip;
mod reserve_ip;

pub use allocate_ip::AllocateIpUseCase;
pub use list_subnet_ips::ListSubnetIpsUseCase;
pub use release_ip::ReleaseIpUseCase;
pub use reserve_ip::ReserveIpUseCase;
