//! REST API Module
//!
//! Contains HTTP handlers, DTOs, and middleware for the REST API.

pub mod dto;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use crate::application::use_cases::addresses::{
    AllocateIpUseCase, ListSubnetIpsUseCase, ReleaseIpUseCase, ReserveIpUseCase,
};
use crate::application::use_cases::namespaces::{
    CreateNamespaceUseCase, GetNamespaceUseCase, ListNamespacesUseCase, SuggestCidrUseCase,
};
use crate::application::use_cases::subnets::{
    CreateSubnetUseCase, GetSubnetUseCase, GetUtilizationUseCase, ListSubnetsUseCase,
};
use crate::infrastructure::driven_adapters::config::AppConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub create_namespace_use_case: Arc<CreateNamespaceUseCase>,
    pub get_namespace_use_case: Arc<GetNamespaceUseCase>,
    pub list_namespaces_use_case: Arc<ListNamespacesUseCase>,
    pub suggest_cidr_use_case: Arc<SuggestCidrUseCase>,
    pub create_subnet_use_case: Arc<CreateSubnetUseCase>,
    pub get_subnet_use_case: Arc<GetSubnetUseCase>,
    pub list_subnets_use_case: Arc<ListSubnetsUseCase>,
    pub get_utilization_use_case: Arc<GetUtilizationUseCase>,
    pub allocate_ip_use_case: Arc<AllocateIpUseCase>,
    pub reserve_ip_use_case: Arc<ReserveIpUseCase>,
    pub release_ip_use_case: Arc<ReleaseIpUseCase>,
    pub list_subnet_ips_use_case: Arc<ListSubnetIpsUseCase>,
}
