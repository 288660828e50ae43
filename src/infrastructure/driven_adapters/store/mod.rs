//! Store Adapters
//!
//! Driven-side implementations of the repository gateways.

pub mod in_memory;

pub use in_memory::InMemoryStore;
