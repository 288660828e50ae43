//! Subnet Handlers
//!
//! HTTP handlers for subnet registration, pool reads and the allocation
//! endpoints that operate on one subnet's pool.

use std::net::Ipv4Addr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::application::use_cases::subnets::CreateSubnetInput;
use crate::domain::models::ip_address::IpStatus;
use crate::domain::models::namespace::NamespaceId;
use crate::domain::models::subnet::SubnetId;
use crate::infrastructure::driving_adapters::api_rest::dto::ip_address::{
    AllocateIpDto, IpResponseDto, ReserveIpDto,
};
use crate::infrastructure::driving_adapters::api_rest::dto::subnet::{
    CreateSubnetDto, SubnetResponseDto, UtilizationResponseDto,
};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// Create the router for subnet endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_subnet))
        .route("/", get(list_subnets))
        .route("/{id}", get(get_subnet))
        .route("/{id}/utilization", get(get_utilization))
        .route("/{id}/allocate", post(allocate_ip))
        .route("/{id}/reserve", post(reserve_ip))
        .route("/{id}/ips", get(list_subnet_ips))
}

/// POST /subnets - Register a new subnet and materialize its pool
///
/// # Responses
///
/// * 201 Created - Subnet registered, pool created all-free
/// * 400 Bad Request - Validation error, malformed CIDR or invalid VLAN
/// * 404 Not Found - Namespace does not exist
/// * 409 Conflict - CIDR overlaps an existing subnet
/// * 422 Unprocessable Entity - CIDR outside the namespace root
#[axum::debug_handler]
async fn create_subnet(
    State(state): State<AppState>,
    Json(dto): Json<CreateSubnetDto>,
) -> Result<(StatusCode, Json<SubnetResponseDto>), ApiError> {
    dto.validate()?;

    let uuid = Uuid::parse_str(&dto.namespace_id)?;

    let subnet = state
        .create_subnet_use_case
        .execute(CreateSubnetInput {
            namespace_id: NamespaceId::from_uuid(uuid),
            cidr: dto.cidr,
            label: dto.label,
            vlan_id: dto.vlan_id,
            location: dto.location,
        })
        .await?;

    // freshly created pools are all free; read back the counters
    let (subnet, counts) = state.get_subnet_use_case.execute(subnet.id()).await?;
    Ok((StatusCode::CREATED, Json(SubnetResponseDto::from((subnet, counts)))))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListSubnetsQuery {
    namespace_id: Option<String>,
}

/// GET /subnets - List subnets, optionally filtered by namespace
#[axum::debug_handler]
async fn list_subnets(
    State(state): State<AppState>,
    Query(query): Query<ListSubnetsQuery>,
) -> Result<Json<Vec<SubnetResponseDto>>, ApiError> {
    let namespace_id = match query.namespace_id {
        Some(raw) => Some(NamespaceId::from_uuid(Uuid::parse_str(&raw)?)),
        None => None,
    };

    let subnets = state
        .list_subnets_use_case
        .execute(namespace_id.as_ref())
        .await?;

    let response: Vec<SubnetResponseDto> =
        subnets.into_iter().map(SubnetResponseDto::from).collect();
    Ok(Json(response))
}

/// GET /subnets/:id - Get a subnet with its pool counters
#[axum::debug_handler]
async fn get_subnet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubnetResponseDto>, ApiError> {
    let subnet_id = SubnetId::from_uuid(Uuid::parse_str(&id)?);

    let (subnet, counts) = state.get_subnet_use_case.execute(&subnet_id).await?;

    Ok(Json(SubnetResponseDto::from((subnet, counts))))
}

/// GET /subnets/:id/utilization - Pool counters and utilization percentage
#[axum::debug_handler]
async fn get_utilization(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UtilizationResponseDto>, ApiError> {
    let subnet_id = SubnetId::from_uuid(Uuid::parse_str(&id)?);

    let counts = state.get_utilization_use_case.execute(&subnet_id).await?;

    Ok(Json(UtilizationResponseDto::new(subnet_id.to_string(), counts)))
}

/// POST /subnets/:id/allocate - Allocate the lowest free address
///
/// # Responses
///
/// * 201 Created - Address allocated (optionally linked to a device)
/// * 404 Not Found - Subnet does not exist
/// * 409 Conflict - Pool exhausted
#[axum::debug_handler]
async fn allocate_ip(
    State(state): State<AppState>,
    Path(id): Path<String>,
    dto: Option<Json<AllocateIpDto>>,
) -> Result<(StatusCode, Json<IpResponseDto>), ApiError> {
    let dto = dto.map(|Json(d)| d).unwrap_or_default();
    dto.validate()?;

    let subnet_id = SubnetId::from_uuid(Uuid::parse_str(&id)?);

    let ip = state
        .allocate_ip_use_case
        .execute(&subnet_id, dto.hostname)
        .await?;

    Ok((StatusCode::CREATED, Json(IpResponseDto::from(ip))))
}

/// POST /subnets/:id/reserve - Reserve a specific or the lowest free address
///
/// # Responses
///
/// * 201 Created - Address reserved
/// * 400 Bad Request - Address is not a parseable IPv4 address
/// * 404 Not Found - Subnet missing, or address not a usable host of it
/// * 409 Conflict - Address already taken, or pool exhausted
#[axum::debug_handler]
async fn reserve_ip(
    State(state): State<AppState>,
    Path(id): Path<String>,
    dto: Option<Json<ReserveIpDto>>,
) -> Result<(StatusCode, Json<IpResponseDto>), ApiError> {
    let dto = dto.map(|Json(d)| d).unwrap_or_default();
    dto.validate()?;

    let subnet_id = SubnetId::from_uuid(Uuid::parse_str(&id)?);

    let address = match dto.address {
        Some(raw) => Some(raw.parse::<Ipv4Addr>().map_err(|_| {
            ApiError::BadRequest(format!("'{raw}' is not a valid IPv4 address"))
        })?),
        None => None,
    };

    let ip = state
        .reserve_ip_use_case
        .execute(&subnet_id, address, dto.description)
        .await?;

    Ok((StatusCode::CREATED, Json(IpResponseDto::from(ip))))
}

#[derive(Debug, Deserialize)]
struct ListIpsQuery {
    status: Option<String>,
}

/// GET /subnets/:id/ips - List a subnet's pool entries in address order
///
/// # Responses
///
/// * 200 OK - Pool entries, optionally filtered by status
/// * 400 Bad Request - Unknown status value
/// * 404 Not Found - Subnet does not exist
#[axum::debug_handler]
async fn list_subnet_ips(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ListIpsQuery>,
) -> Result<Json<Vec<IpResponseDto>>, ApiError> {
    let subnet_id = SubnetId::from_uuid(Uuid::parse_str(&id)?);

    let status = match query.status {
        Some(raw) => Some(raw.parse::<IpStatus>().map_err(ApiError::BadRequest)?),
        None => None,
    };

    let ips = state
        .list_subnet_ips_use_case
        .execute(&subnet_id, status)
        .await?;

    let response: Vec<IpResponseDto> = ips.into_iter().map(IpResponseDto::from).collect();
    Ok(Json(response))
}
