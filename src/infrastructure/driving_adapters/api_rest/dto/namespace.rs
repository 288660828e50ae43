//! Namespace DTOs
//!
//! Data transfer objects for namespace API endpoints. CIDR strings are
//! passed through to the domain, which owns the real parsing rules; the
//! DTO layer only enforces shape and length.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::namespace::Namespace;

lazy_static! {
    /// Names are DNS-label-like: letters, digits, hyphens and underscores
    static ref NAME_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("valid regex");
}

/// Validates a namespace or subnet label name
pub(crate) fn validate_name(name: &str) -> Result<(), validator::ValidationError> {
    if NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("name");
        error.message =
            Some("Name must start with a letter or digit and contain only [A-Za-z0-9_-]".into());
        Err(error)
    }
}

/// DTO for creating a new namespace
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNamespaceDto {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(length(min = 1, max = 18, message = "rootCidr must be a dotted-quad CIDR"))]
    pub root_cidr: String,
}

/// Namespace response DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceResponseDto {
    pub id: String,
    pub name: String,
    pub root_cidr: String,
    pub created_at: DateTime<Utc>,
}

impl From<Namespace> for NamespaceResponseDto {
    fn from(namespace: Namespace) -> Self {
        Self {
            id: namespace.id().to_string(),
            name: namespace.name().to_string(),
            root_cidr: namespace.root_cidr().to_string(),
            created_at: namespace.created_at(),
        }
    }
}

/// Response DTO for a CIDR suggestion
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestCidrResponseDto {
    pub namespace_id: String,
    pub prefix: u8,
    pub cidr: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_validation_accepts_hostname_like_labels() {
        assert!(validate_name("prod").is_ok());
        assert!(validate_name("campus-a_2").is_ok());
        assert!(validate_name("-leading-hyphen").is_err());
        assert!(validate_name("spaces here").is_err());
    }

    #[test]
    fn create_dto_rejects_empty_name() {
        let dto = CreateNamespaceDto {
            name: String::new(),
            root_cidr: "10.0.0.0/8".to_string(),
        };
        assert!(dto.validate().is_err());
    }
}
