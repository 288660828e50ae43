//! IPAM Core
//!
//! A Rust-based IPv4 address management engine following Clean/Hexagonal
//! Architecture principles: namespaces with root CIDR scopes, overlap-checked
//! subnet registration, materialized address pools and a serialized
//! allocation path.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
