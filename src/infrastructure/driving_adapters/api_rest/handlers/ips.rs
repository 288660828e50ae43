//! IP Address Handlers
//!
//! HTTP handlers addressing pool entries by their record ID.

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use uuid::Uuid;

use crate::domain::models::ip_address::IpAddressId;
use crate::infrastructure::driving_adapters::api_rest::dto::ip_address::IpResponseDto;
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// Create the router for IP record endpoints
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/release", post(release_ip))
}

/// POST /ips/:id/release - Return an address to the free pool
///
/// # Responses
///
/// * 200 OK - Address released, device link cleared
/// * 404 Not Found - No pool entry with this ID
/// * 409 Conflict - Address is already free
#[axum::debug_handler]
async fn release_ip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IpResponseDto>, ApiError> {
    let ip_id = IpAddressId::from_uuid(Uuid::parse_str(&id)?);

    let ip = state.release_ip_use_case.execute(&ip_id).await?;

    Ok(Json(IpResponseDto::from(ip)))
}
