//! IPAM Core - Main Entry Point

use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ipam_core::application::coordinator::AllocationCoordinator;
use ipam_core::application::use_cases::addresses::{
    AllocateIpUseCase, ListSubnetIpsUseCase, ReleaseIpUseCase, ReserveIpUseCase,
};
use ipam_core::application::use_cases::namespaces::{
    CreateNamespaceUseCase, GetNamespaceUseCase, ListNamespacesUseCase, SuggestCidrUseCase,
};
use ipam_core::application::use_cases::subnets::{
    CreateSubnetUseCase, GetSubnetUseCase, GetUtilizationUseCase, ListSubnetsUseCase,
};
use ipam_core::infrastructure::driven_adapters::config::AppConfig;
use ipam_core::infrastructure::driven_adapters::store::InMemoryStore;
use ipam_core::infrastructure::driving_adapters::api_rest::handlers::{
    health, ips, namespaces, subnets,
};
use ipam_core::infrastructure::driving_adapters::api_rest::middleware::request_id_middleware;
use ipam_core::infrastructure::driving_adapters::api_rest::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ipam_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded successfully");

    // Create the store and the allocation coordinator
    let store = Arc::new(InMemoryStore::new());
    let coordinator = Arc::new(AllocationCoordinator::new());

    // Create use cases
    let create_namespace_use_case = Arc::new(CreateNamespaceUseCase::new(store.clone()));
    let get_namespace_use_case = Arc::new(GetNamespaceUseCase::new(store.clone()));
    let list_namespaces_use_case = Arc::new(ListNamespacesUseCase::new(store.clone()));
    let suggest_cidr_use_case = Arc::new(SuggestCidrUseCase::new(
        store.clone(),
        store.clone(),
        coordinator.clone(),
    ));
    let create_subnet_use_case = Arc::new(CreateSubnetUseCase::new(
        store.clone(),
        store.clone(),
        store.clone(),
        coordinator.clone(),
    ));
    let get_subnet_use_case = Arc::new(GetSubnetUseCase::new(store.clone(), store.clone()));
    let list_subnets_use_case = Arc::new(ListSubnetsUseCase::new(store.clone(), store.clone()));
    let get_utilization_use_case =
        Arc::new(GetUtilizationUseCase::new(store.clone(), store.clone()));
    let allocate_ip_use_case = Arc::new(AllocateIpUseCase::new(
        store.clone(),
        store.clone(),
        store.clone(),
        coordinator.clone(),
    ));
    let reserve_ip_use_case = Arc::new(ReserveIpUseCase::new(
        store.clone(),
        store.clone(),
        coordinator.clone(),
    ));
    let release_ip_use_case = Arc::new(ReleaseIpUseCase::new(store.clone(), coordinator.clone()));
    let list_subnet_ips_use_case =
        Arc::new(ListSubnetIpsUseCase::new(store.clone(), store.clone()));

    // Create application state
    let app_state = AppState {
        config: Arc::new(config.clone()),
        create_namespace_use_case,
        get_namespace_use_case,
        list_namespaces_use_case,
        suggest_cidr_use_case,
        create_subnet_use_case,
        get_subnet_use_case,
        list_subnets_use_case,
        get_utilization_use_case,
        allocate_ip_use_case,
        reserve_ip_use_case,
        release_ip_use_case,
        list_subnet_ips_use_case,
    };

    // Build router
    let app = Router::new()
        .nest("/namespaces", namespaces::router())
        .nest("/subnets", subnets::router())
        .nest("/ips", ips::router())
        .nest("/health", health::router())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
