//! Common test utilities for e2e tests
//!
//! Builds the full router over a fresh in-memory store, so every test runs
//! against its own isolated engine instance.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    middleware, Router,
};
use serde_json::Value;
use tower::util::ServiceExt;
use tower_http::trace::TraceLayer;

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
use ipam_core::infrastructure::driven_adapters::config::{AppConfig, ServerConfig};
use ipam_core::infrastructure::driven_adapters::store::InMemoryStore;
use ipam_core::infrastructure::driving_adapters::api_rest::handlers::{
    health, ips, namespaces, subnets,
};
use ipam_core::infrastructure::driving_adapters::api_rest::middleware::request_id_middleware;
use ipam_core::infrastructure::driving_adapters::api_rest::AppState;

/// Test application context
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let coordinator = Arc::new(AllocationCoordinator::new());

        let app_state = AppState {
            config: Arc::new(AppConfig {
                server: ServerConfig {
                    host: "127.0.0.1".to_string(),
                    port: 0,
                },
            }),
            create_namespace_use_case: Arc::new(CreateNamespaceUseCase::new(store.clone())),
            get_namespace_use_case: Arc::new(GetNamespaceUseCase::new(store.clone())),
            list_namespaces_use_case: Arc::new(ListNamespacesUseCase::new(store.clone())),
            suggest_cidr_use_case: Arc::new(SuggestCidrUseCase::new(
                store.clone(),
                store.clone(),
                coordinator.clone(),
            )),
            create_subnet_use_case: Arc::new(CreateSubnetUseCase::new(
                store.clone(),
                store.clone(),
                store.clone(),
                coordinator.clone(),
            )),
            get_subnet_use_case: Arc::new(GetSubnetUseCase::new(store.clone(), store.clone())),
            list_subnets_use_case: Arc::new(ListSubnetsUseCase::new(
                store.clone(),
                store.clone(),
            )),
            get_utilization_use_case: Arc::new(GetUtilizationUseCase::new(
                store.clone(),
                store.clone(),
            )),
            allocate_ip_use_case: Arc::new(AllocateIpUseCase::new(
                store.clone(),
                store.clone(),
                store.clone(),
                coordinator.clone(),
            )),
            reserve_ip_use_case: Arc::new(ReserveIpUseCase::new(
                store.clone(),
                store.clone(),
                coordinator.clone(),
            )),
            release_ip_use_case: Arc::new(ReleaseIpUseCase::new(
                store.clone(),
                coordinator.clone(),
            )),
            list_subnet_ips_use_case: Arc::new(ListSubnetIpsUseCase::new(
                store.clone(),
                store.clone(),
            )),
        };

        let router = Router::new()
            .nest("/namespaces", namespaces::router())
            .nest("/subnets", subnets::router())
            .nest("/ips", ips::router())
            .nest("/health", health::router())
            .layer(middleware::from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        Self { router }
    }

    /// Send a request with an optional JSON body and decode the JSON response
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        let request = match body {
            Some(json) => builder
                .body(Body::from(serde_json::to_string(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    /// Create a namespace and return its ID
    pub async fn create_namespace(&self, name: &str, root_cidr: &str) -> String {
        let (status, body) = self
            .post(
                "/namespaces",
                serde_json::json!({ "name": name, "rootCidr": root_cidr }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "namespace create failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }

    /// Register a subnet and return its ID
    pub async fn create_subnet(&self, namespace_id: &str, cidr: &str, label: &str) -> String {
        let (status, body) = self
            .post(
                "/subnets",
                serde_json::json!({
                    "namespaceId": namespace_id,
                    "cidr": cidr,
                    "label": label,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "subnet create failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }
}
