//! Subnet Use Cases
//!
//! Business logic for registering subnets and reading their pool state.

mod create_subnet;
mod get_subnet;
mod get_utilization;
mod list_subnets;

pub use create_subnet::{CreateSubnetInput, CreateSubnetUseCase};
pub use get_subnet::GetSubnetUseCase;
pub use get_utilization::GetUtilizationUseCase;
pub use list_subnets::ListSubnetsUseCase;
