//! Create Namespace Use Case
//!
//! Creates a new isolation scope with its root address range.

use std::sync::Arc;

use crate::domain::gateways::NamespaceRepository;
use crate::domain::models::cidr::Cidr;
use crate::domain::models::namespace::{CreateNamespaceData, Namespace};
use crate::shared::errors::UseCaseError;

/// Input for namespace creation; the root CIDR arrives as text and is
/// validated here
#[derive(Debug, Clone)]
pub struct CreateNamespaceInput {
    pub name: String,
    pub root_cidr: String,
}

/// Use case for creating a new namespace
pub struct CreateNamespaceUseCase {
    namespace_repository: Arc<dyn NamespaceRepository>,
}

impl CreateNamespaceUseCase {
    /// Create a new CreateNamespaceUseCase
    #[must_use]
    pub fn new(namespace_repository: Arc<dyn NamespaceRepository>) -> Self {
        Self {
            namespace_repository,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Domain(MalformedCidr)` if the root CIDR does
    /// not parse. Returns `UseCaseError::DuplicateName` if a namespace with
    /// the same name exists.
    pub async fn execute(&self, input: CreateNamespaceInput) -> Result<Namespace, UseCaseError> {
        tracing::info!(name = %input.name, root_cidr = %input.root_cidr, "Creating namespace");

        let root_cidr = Cidr::parse(&input.root_cidr)?;

        if self
            .namespace_repository
            .find_by_name(&input.name)
            .await?
            .is_some()
        {
            tracing::warn!(name = %input.name, "Namespace name already taken");
            return Err(UseCaseError::DuplicateName {
                resource: "Namespace".to_string(),
                name: input.name,
            });
        }

        let namespace = Namespace::new(CreateNamespaceData {
            name: input.name,
            root_cidr,
        });
        let created = self.namespace_repository.create(&namespace).await?;

        tracing::info!(
            namespace_id = %created.id(),
            root_cidr = %created.root_cidr(),
            "Namespace created successfully"
        );

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::namespace::NamespaceId;
    use crate::shared::errors::{DomainError, RepositoryError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockNamespaceRepository {
        find_by_name_result: Mutex<Option<Result<Option<Namespace>, RepositoryError>>>,
    }

    impl MockNamespaceRepository {
        fn new() -> Self {
            Self {
                find_by_name_result: Mutex::new(None),
            }
        }

        fn with_find_by_name(self, result: Result<Option<Namespace>, RepositoryError>) -> Self {
            *self.find_by_name_result.lock().unwrap() = Some(result);
            self
        }
    }

    #[async_trait]
    impl NamespaceRepository for MockNamespaceRepository {
        async fn find_by_id(
            &self,
            _id: &NamespaceId,
        ) -> Result<Option<Namespace>, RepositoryError> {
            Ok(None)
        }

        async fn find_by_name(&self, _name: &str) -> Result<Option<Namespace>, RepositoryError> {
            self.find_by_name_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Ok(None))
        }

        async fn find_all(&self) -> Result<Vec<Namespace>, RepositoryError> {
            Ok(vec![])
        }

        async fn create(&self, namespace: &Namespace) -> Result<Namespace, RepositoryError> {
            Ok(namespace.clone())
        }
    }

    fn existing_namespace() -> Namespace {
        Namespace::new(CreateNamespaceData {
            name: "prod".to_string(),
            root_cidr: Cidr::parse("10.0.0.0/8").unwrap(),
        })
    }

    #[tokio::test]
    async fn should_create_namespace_when_name_is_free() {
        let repo = Arc::new(MockNamespaceRepository::new().with_find_by_name(Ok(None)));

        let use_case = CreateNamespaceUseCase::new(repo);
        let result = use_case
            .execute(CreateNamespaceInput {
                name: "prod".to_string(),
                root_cidr: "10.0.0.0/8".to_string(),
            })
            .await;

        let namespace = result.unwrap();
        assert_eq!(namespace.name(), "prod");
        assert_eq!(namespace.root_cidr().to_string(), "10.0.0.0/8");
    }

    #[tokio::test]
    async fn should_return_duplicate_name_when_name_exists() {
        let repo = Arc::new(
            MockNamespaceRepository::new().with_find_by_name(Ok(Some(existing_namespace()))),
        );

        let use_case = CreateNamespaceUseCase::new(repo);
        let result = use_case
            .execute(CreateNamespaceInput {
                name: "prod".to_string(),
                root_cidr: "10.0.0.0/8".to_string(),
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            UseCaseError::DuplicateName { .. }
        ));
    }

    #[tokio::test]
    async fn should_reject_malformed_root_cidr() {
        let repo = Arc::new(MockNamespaceRepository::new());

        let use_case = CreateNamespaceUseCase::new(repo);
        let result = use_case
            .execute(CreateNamespaceInput {
                name: "prod".to_string(),
                root_cidr: "10.0.0.0/40".to_string(),
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            UseCaseError::Domain(DomainError::MalformedCidr(_))
        ));
    }
}
