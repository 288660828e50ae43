//! HTTP Handlers
//!
//! Route builders and handler functions, one module per resource.

pub mod health;
pub mod ips;
pub mod namespaces;
pub mod subnets;
