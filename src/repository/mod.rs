//! Storage capability consumed by [`BaseService`](crate::service::BaseService).

mod memory;

pub use memory::InMemoryRepository;

use crate::entity::Entity;
use crate::paging::{Page, PageRequest};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Unknown sort property: {0}")]
    InvalidSortProperty(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Every entity, ascending by identifier
    async fn find_all(&self) -> RepositoryResult<Vec<E>>;

    async fn find_page(&self, request: &PageRequest) -> RepositoryResult<Page<E>>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<E>>;

    async fn exists_by_id(&self, id: i64) -> RepositoryResult<bool>;

    /// Insert or replace
    ///
    /// An entity without an identifier, or with one that is not stored, is
    /// inserted under a freshly allocated identifier.
    async fn save(&self, entity: E) -> RepositoryResult<E>;

    /// Store `entity` under `id` only if `id` is already stored
    ///
    /// The existence check and the write happen atomically; `None` means
    /// nothing was stored under `id`.
    async fn replace(&self, id: i64, entity: E) -> RepositoryResult<Option<E>>;

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()>;
}
