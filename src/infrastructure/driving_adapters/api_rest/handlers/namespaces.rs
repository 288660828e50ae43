//! Namespace Handlers
//!
//! HTTP handlers for namespace management and CIDR planning.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::application::use_cases::namespaces::CreateNamespaceInput;
use crate::domain::models::namespace::NamespaceId;
use crate::infrastructure::driving_adapters::api_rest::dto::namespace::{
    CreateNamespaceDto, NamespaceResponseDto, SuggestCidrResponseDto,
};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// Create the router for namespace endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_namespace))
        .route("/", get(list_namespaces))
        .route("/{id}", get(get_namespace))
        .route("/{id}/suggest-cidr", get(suggest_cidr))
}

/// POST /namespaces - Create a new namespace
///
/// # Responses
///
/// * 201 Created - Namespace created successfully
/// * 400 Bad Request - Validation error or malformed root CIDR
/// * 409 Conflict - Namespace with the same name already exists
#[axum::debug_handler]
async fn create_namespace(
    State(state): State<AppState>,
    Json(dto): Json<CreateNamespaceDto>,
) -> Result<(StatusCode, Json<NamespaceResponseDto>), ApiError> {
    dto.validate()?;

    let namespace = state
        .create_namespace_use_case
        .execute(CreateNamespaceInput {
            name: dto.name,
            root_cidr: dto.root_cidr,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(NamespaceResponseDto::from(namespace))))
}

/// GET /namespaces - List all namespaces
#[axum::debug_handler]
async fn list_namespaces(
    State(state): State<AppState>,
) -> Result<Json<Vec<NamespaceResponseDto>>, ApiError> {
    let namespaces = state.list_namespaces_use_case.execute().await?;

    let response: Vec<NamespaceResponseDto> =
        namespaces.into_iter().map(NamespaceResponseDto::from).collect();
    Ok(Json(response))
}

/// GET /namespaces/:id - Get a namespace by ID
///
/// # Responses
///
/// * 200 OK - Namespace found
/// * 404 Not Found - Namespace does not exist
#[axum::debug_handler]
async fn get_namespace(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NamespaceResponseDto>, ApiError> {
    let uuid = Uuid::parse_str(&id)?;
    let namespace_id = NamespaceId::from_uuid(uuid);

    let namespace = state.get_namespace_use_case.execute(&namespace_id).await?;

    Ok(Json(NamespaceResponseDto::from(namespace)))
}

#[derive(Debug, Deserialize)]
struct SuggestQuery {
    prefix: u8,
}

/// GET /namespaces/:id/suggest-cidr?prefix=N - Suggest the next free block
///
/// # Responses
///
/// * 200 OK - A free aligned block was found
/// * 400 Bad Request - Prefix outside 0-32
/// * 404 Not Found - Namespace missing or root range exhausted
#[axum::debug_handler]
async fn suggest_cidr(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SuggestQuery>,
) -> Result<Json<SuggestCidrResponseDto>, ApiError> {
    if query.prefix > 32 {
        return Err(ApiError::BadRequest(format!(
            "prefix /{} is outside the valid range 0-32",
            query.prefix
        )));
    }

    let uuid = Uuid::parse_str(&id)?;
    let namespace_id = NamespaceId::from_uuid(uuid);

    let cidr = state
        .suggest_cidr_use_case
        .execute(&namespace_id, query.prefix)
        .await?;

    Ok(Json(SuggestCidrResponseDto {
        namespace_id: namespace_id.to_string(),
        prefix: query.prefix,
        cidr: cidr.to_string(),
    }))
}
