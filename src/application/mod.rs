//! Application Layer
//!
//! Contains use cases that orchestrate business logic and the allocation
//! coordinator that serializes mutating operations.
//! Use cases depend on domain gateways (abstractions), not concrete implementations.

pub mod coordinator;
pub mod use_cases;
