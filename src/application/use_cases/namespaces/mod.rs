//! Namespace Use Cases
//!
//! Business logic for managing allocation namespaces and CIDR planning.

mod create_namespace;
mod get_namespace;
mod list_namespaces;
mod suggest_cidr;

pub use create_namespace::{CreateNamespaceInput, CreateNamespaceUseCase};
pub use get_namespace::GetNamespaceUseCase;
pub use list_namespaces::ListNamespacesUseCase;
pub use suggest_cidr::SuggestCidrUseCase;
