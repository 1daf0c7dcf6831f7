use crate::entity::Entity;
use crate::paging::{Page, PageRequest};
use crate::repository::Repository;
use crate::service::{EntityService, ServiceError, ServiceResult};
use async_trait::async_trait;
use healthplan_macro::Injectable;
use std::sync::Arc;

/// Repository-backed [`EntityService`] shared by every entity
#[derive(Injectable)]
pub struct BaseService<E: Entity> {
    repository: Arc<dyn Repository<E>>,
}

impl<E: Entity> BaseService<E> {
    pub fn new(repository: Arc<dyn Repository<E>>) -> Self {
        Self { repository }
    }

    fn not_found(id: i64) -> ServiceError {
        let type_name = std::any::type_name::<E>();
        ServiceError::NotFound {
            entity: type_name.rsplit("::").next().unwrap_or(type_name),
            id,
        }
    }
}

#[async_trait]
impl<E: Entity> EntityService<E> for BaseService<E> {
    async fn find_all(&self) -> ServiceResult<Vec<E>> {
        Ok(self.repository.find_all().await?)
    }

    async fn find_by_id(&self, id: i64) -> ServiceResult<E> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn save(&self, entity: E) -> ServiceResult<E> {
        Ok(self.repository.save(entity).await?)
    }

    async fn update(&self, id: i64, entity: E) -> ServiceResult<E> {
        self.repository
            .replace(id, entity)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn delete(&self, id: i64) -> ServiceResult<bool> {
        if !self.repository.exists_by_id(id).await? {
            return Err(Self::not_found(id));
        }
        self.repository.delete_by_id(id).await?;
        tracing::debug!(entity = E::PATH, id, "Deleted entity");
        Ok(true)
    }

    async fn find_page(&self, request: PageRequest) -> ServiceResult<Page<E>> {
        Ok(self.repository.find_page(&request).await?)
    }
}
