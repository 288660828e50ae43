//! Domain Services
//!
//! Stateless domain logic that spans more than one entity.

pub mod overlap_index;

pub use overlap_index::OverlapIndex;
