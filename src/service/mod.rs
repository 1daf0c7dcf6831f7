//! Entity services consumed by the generic controller.

mod base;

pub use base::BaseService;

use crate::entity::Entity;
use crate::paging::{Page, PageRequest};
use crate::repository::RepositoryError;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Operations the generic controller delegates to
///
/// Any error is reported by the controller as a failure of the operation that
/// called it.
#[async_trait]
pub trait EntityService<E: Entity>: Send + Sync + 'static {
    async fn find_all(&self) -> ServiceResult<Vec<E>>;

    async fn find_by_id(&self, id: i64) -> ServiceResult<E>;

    async fn save(&self, entity: E) -> ServiceResult<E>;

    /// `entity` already carries `id`
    async fn update(&self, id: i64, entity: E) -> ServiceResult<E>;

    async fn delete(&self, id: i64) -> ServiceResult<bool>;

    async fn find_page(&self, request: PageRequest) -> ServiceResult<Page<E>>;
}
