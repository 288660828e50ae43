//! Error Types
//!
//! Layered error types with proper HTTP status code mapping. `DomainError`
//! carries the engine's validation and conflict taxonomy; every variant keeps
//! enough context (conflicting subnet, offending address) for the caller to
//! act on.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Domain-level errors representing business rule violations
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Malformed CIDR '{0}': expected four dot-separated octets followed by /0-32")]
    MalformedCidr(String),

    #[error("CIDR {candidate} is not contained in the namespace root {root}")]
    OutOfScope { candidate: String, root: String },

    #[error("CIDR {candidate} overlaps existing subnet {conflicting_id} ({conflicting_cidr})")]
    CidrOverlap {
        candidate: String,
        conflicting_id: String,
        conflicting_cidr: String,
    },

    #[error("VLAN id {0} is outside the valid range 1-4094")]
    InvalidVlan(u16),

    #[error("No free addresses remain in subnet {subnet}")]
    PoolExhausted { subnet: String },

    #[error("Address {0} is not free")]
    AddressNotFree(String),

    #[error("Address {0} is not a usable address of this subnet")]
    AddressNotInSubnet(String),

    #[error("Address {0} is not allocated or reserved")]
    AddressNotActive(String),
}

/// Repository-level errors for data access failures
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Data mapping error: {0}")]
    Mapping(String),
}

/// Use case-level errors for application logic failures
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: String, id: String },

    #[error("{resource} named '{name}' already exists")]
    DuplicateName { resource: String, name: String },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl UseCaseError {
    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::DuplicateName { .. } => StatusCode::CONFLICT,
            Self::Domain(domain) => match domain {
                DomainError::MalformedCidr(_) | DomainError::InvalidVlan(_) => {
                    StatusCode::BAD_REQUEST
                }
                DomainError::OutOfScope { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                DomainError::AddressNotInSubnet(_) => StatusCode::NOT_FOUND,
                DomainError::CidrOverlap { .. }
                | DomainError::PoolExhausted { .. }
                | DomainError::AddressNotFree(_)
                | DomainError::AddressNotActive(_) => StatusCode::CONFLICT,
            },
            Self::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::DuplicateName { .. } => "DUPLICATE_NAME",
            Self::Domain(domain) => match domain {
                DomainError::MalformedCidr(_) => "MALFORMED_CIDR",
                DomainError::OutOfScope { .. } => "OUT_OF_SCOPE",
                DomainError::CidrOverlap { .. } => "CIDR_OVERLAP",
                DomainError::InvalidVlan(_) => "INVALID_VLAN",
                DomainError::PoolExhausted { .. } => "POOL_EXHAUSTED",
                DomainError::AddressNotFree(_) => "ADDRESS_NOT_FREE",
                DomainError::AddressNotInSubnet(_) => "ADDRESS_NOT_IN_SUBNET",
                DomainError::AddressNotActive(_) => "ADDRESS_NOT_ACTIVE",
            },
            Self::Repository(_) => "INTERNAL_ERROR",
        }
    }
}

/// API error response for HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UseCase(#[from] UseCaseError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

/// Error detail structure
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level error for validation errors
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            ApiError::UseCase(uc_error) => {
                let details = if let UseCaseError::Validation(errors) = uc_error {
                    Some(
                        errors
                            .iter()
                            .map(|e| FieldError {
                                field: String::new(),
                                message: e.clone(),
                            })
                            .collect(),
                    )
                } else {
                    None
                };
                (
                    uc_error.status_code(),
                    uc_error.error_code().to_string(),
                    uc_error.to_string(),
                    details,
                )
            }
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST".to_string(), msg.clone(), None)
            }
            ApiError::InvalidUuid(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_UUID".to_string(), msg.clone(), None)
            }
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR".to_string(),
                "An unexpected error occurred".to_string(),
                None,
            ),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code,
                message,
                details,
            },
            request_id: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<uuid::Error> for ApiError {
    fn from(err: uuid::Error) -> Self {
        ApiError::InvalidUuid(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message.as_ref().map_or("invalid", |m| m.as_ref())
                    )
                })
            })
            .collect();
        ApiError::UseCase(UseCaseError::Validation(messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_error_names_the_conflicting_subnet() {
        let err = DomainError::CidrOverlap {
            candidate: "10.0.1.128/25".to_string(),
            conflicting_id: "b5c7d9e1-0000-0000-0000-000000000000".to_string(),
            conflicting_cidr: "10.0.1.0/24".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("10.0.1.128/25"));
        assert!(msg.contains("10.0.1.0/24"));
    }

    #[test]
    fn status_codes_follow_the_taxonomy() {
        let overlap = UseCaseError::Domain(DomainError::CidrOverlap {
            candidate: String::new(),
            conflicting_id: String::new(),
            conflicting_cidr: String::new(),
        });
        assert_eq!(overlap.status_code(), StatusCode::CONFLICT);
        assert_eq!(overlap.error_code(), "CIDR_OVERLAP");

        let malformed = UseCaseError::Domain(DomainError::MalformedCidr("x".into()));
        assert_eq!(malformed.status_code(), StatusCode::BAD_REQUEST);

        let exhausted = UseCaseError::Domain(DomainError::PoolExhausted {
            subnet: "10.0.0.0/30".into(),
        });
        assert_eq!(exhausted.error_code(), "POOL_EXHAUSTED");
    }
}
