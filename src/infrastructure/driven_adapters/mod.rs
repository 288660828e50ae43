//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - The backing store
//! - Configuration

pub mod config;
pub mod store;

pub use config::AppConfig;
pub use store::InMemoryStore;
