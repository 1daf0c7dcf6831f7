//! Generic CRUD controller mounted once per entity type.

mod error;

pub use error::{Cause, ControllerError, ErrorPolicy, Operation};

use crate::config::{PagingConfig, ServerConfig};
use crate::di::{Container, Injectable};
use crate::entity::Entity;
use crate::hateoas::{CollectionModel, EntityModel, LinkBuilder};
use crate::paging::{PageParams, PageRequest};
use crate::service::EntityService;
use axum::{
    Json, Router,
    extract::{
        Path, Query,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::marker::PhantomData;
use std::sync::Arc;

/// List, get, create, update, delete and paged list over one entity type
///
/// Every operation delegates to `S` and answers with hypermedia views built
/// from the entity's route. Failures go through [`ControllerError`] using the
/// configured [`ErrorPolicy`].
pub struct EntityController<E, S> {
    service: Arc<S>,
    links: LinkBuilder,
    policy: ErrorPolicy,
    paging: PagingConfig,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S> EntityController<E, S>
where
    E: Entity,
    S: EntityService<E>,
{
    pub fn new(service: Arc<S>, config: &ServerConfig) -> Self {
        Self {
            service,
            links: LinkBuilder::for_entity::<E>(&config.public_url),
            policy: config.error_policy,
            paging: config.paging,
            _entity: PhantomData,
        }
    }

    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    /// `200` with a collection view, or `204` when there is nothing to list
    pub async fn get_all(&self) -> Response {
        self.try_get_all()
            .await
            .unwrap_or_else(|cause| self.fail(Operation::ListAll, cause))
    }

    pub async fn get_one(&self, id: i64) -> Response {
        self.try_get_one(id)
            .await
            .unwrap_or_else(|cause| self.fail(Operation::GetOne, cause))
    }

    /// `201` with a `Location` header pointing at the saved entity
    pub async fn save(&self, entity: E) -> Response {
        self.try_save(entity)
            .await
            .unwrap_or_else(|cause| self.fail(Operation::Create, cause))
    }

    /// Forces `id` onto the entity before delegating
    ///
    /// The response describes the submitted entity, not what the service
    /// returned.
    pub async fn update(&self, id: i64, entity: E) -> Response {
        self.try_update(id, entity)
            .await
            .unwrap_or_else(|cause| self.fail(Operation::Update, cause))
    }

    pub async fn delete(&self, id: i64) -> Response {
        self.try_delete(id)
            .await
            .unwrap_or_else(|cause| self.fail(Operation::Delete, cause))
    }

    /// The service's page, verbatim
    pub async fn get_paged(&self, request: PageRequest) -> Response {
        self.try_get_paged(request)
            .await
            .unwrap_or_else(|cause| self.fail(Operation::ListPaged, cause))
    }

    async fn try_get_all(&self) -> Result<Response, Cause> {
        let entities = self.service.find_all().await?;
        if entities.is_empty() {
            return Ok(StatusCode::NO_CONTENT.into_response());
        }

        let content = entities
            .into_iter()
            .map(|entity| self.to_model(entity))
            .collect::<Result<Vec<_>, _>>()?;
        let collection = CollectionModel::new(content, self.links.collection_links());

        Ok(Json(collection).into_response())
    }

    async fn try_get_one(&self, id: i64) -> Result<Response, Cause> {
        let entity = self.service.find_by_id(id).await?;
        Ok(Json(self.to_model(entity)?).into_response())
    }

    async fn try_save(&self, entity: E) -> Result<Response, Cause> {
        let saved = self.service.save(entity).await?;
        let id = saved.id().ok_or(Cause::MissingIdentifier)?;
        let location = self.links.item_href(id);
        let model = EntityModel::new(saved, self.links.entity_links(id));

        tracing::info!(entity = E::PATH, id, "Created entity");
        Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(model)).into_response())
    }

    async fn try_update(&self, id: i64, mut entity: E) -> Result<Response, Cause> {
        entity.set_id(id);
        let submitted = entity.clone();
        self.service.update(id, entity).await?;
        Ok(Json(self.to_model(submitted)?).into_response())
    }

    async fn try_delete(&self, id: i64) -> Result<Response, Cause> {
        let deleted = self.service.delete(id).await?;
        Ok(Json(deleted).into_response())
    }

    async fn try_get_paged(&self, request: PageRequest) -> Result<Response, Cause> {
        let page = self.service.find_page(request).await?;
        Ok(Json(page).into_response())
    }

    fn to_model(&self, entity: E) -> Result<EntityModel<E>, Cause> {
        let id = entity.id().ok_or(Cause::MissingIdentifier)?;
        Ok(EntityModel::new(entity, self.links.entity_links(id)))
    }

    fn fail(&self, operation: Operation, cause: Cause) -> Response {
        ControllerError {
            operation,
            entity: E::PATH,
            policy: self.policy,
            cause,
        }
        .into_response()
    }

    fn reject(&self, operation: Operation, message: String) -> Response {
        self.fail(operation, Cause::Rejected(message))
    }

    fn page_request(&self, query: Result<Query<PageParams>, QueryRejection>) -> Result<PageRequest, String> {
        let Query(params) = query.map_err(|rejection| rejection.body_text())?;
        PageRequest::from_params(&params, &self.paging).map_err(|e| e.to_string())
    }

    /// Routes under `E::PATH`: `/`, `/{id}` and `/paged`
    ///
    /// Unreadable paths, queries and bodies fail like the operation itself.
    pub fn router<St>(controller: Arc<Self>) -> Router<St>
    where
        St: Clone + Send + Sync + 'static,
    {
        let collection_route = controller.links.collection_route().to_string();
        let item_route = controller.links.item_route();
        let paged_route = controller.links.paged_route();

        Router::new()
            .route(
                &collection_route,
                get({
                    let controller = controller.clone();
                    move || {
                        let controller = controller.clone();
                        async move { controller.get_all().await }
                    }
                })
                .post({
                    let controller = controller.clone();
                    move |body: Result<Json<E>, JsonRejection>| {
                        let controller = controller.clone();
                        async move {
                            match body {
                                Ok(Json(entity)) => controller.save(entity).await,
                                Err(rejection) => {
                                    controller.reject(Operation::Create, rejection.body_text())
                                }
                            }
                        }
                    }
                }),
            )
            .route(
                &paged_route,
                get({
                    let controller = controller.clone();
                    move |query: Result<Query<PageParams>, QueryRejection>| {
                        let controller = controller.clone();
                        async move {
                            match controller.page_request(query) {
                                Ok(request) => controller.get_paged(request).await,
                                Err(message) => controller.reject(Operation::ListPaged, message),
                            }
                        }
                    }
                }),
            )
            .route(
                &item_route,
                get({
                    let controller = controller.clone();
                    move |id: Result<Path<i64>, PathRejection>| {
                        let controller = controller.clone();
                        async move {
                            match id {
                                Ok(Path(id)) => controller.get_one(id).await,
                                Err(rejection) => {
                                    controller.reject(Operation::GetOne, rejection.body_text())
                                }
                            }
                        }
                    }
                })
                .put({
                    let controller = controller.clone();
                    move |id: Result<Path<i64>, PathRejection>,
                          body: Result<Json<E>, JsonRejection>| {
                        let controller = controller.clone();
                        async move {
                            match (id, body) {
                                (Ok(Path(id)), Ok(Json(entity))) => {
                                    controller.update(id, entity).await
                                }
                                (Err(rejection), _) => {
                                    controller.reject(Operation::Update, rejection.body_text())
                                }
                                (_, Err(rejection)) => {
                                    controller.reject(Operation::Update, rejection.body_text())
                                }
                            }
                        }
                    }
                })
                .delete({
                    let controller = controller.clone();
                    move |id: Result<Path<i64>, PathRejection>| {
                        let controller = controller.clone();
                        async move {
                            match id {
                                Ok(Path(id)) => controller.delete(id).await,
                                Err(rejection) => {
                                    controller.reject(Operation::Delete, rejection.body_text())
                                }
                            }
                        }
                    }
                }),
            )
    }
}

impl<E, S> Injectable for EntityController<E, S>
where
    E: Entity,
    S: EntityService<E>,
{
    fn inject(container: &Container) -> crate::Result<Self> {
        let service = container.resolve::<S>()?;
        let config = container.resolve::<ServerConfig>()?;
        Ok(Self::new(service, &config))
    }
}
