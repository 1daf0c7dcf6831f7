//! # healthplan
//!
//! Health plan management over HTTP, built from one generic CRUD controller.
//!
//! An [`EntityController`](controller::EntityController) serves list, get,
//! create, update, delete and paged list for any [`Entity`], delegating to an
//! [`EntityService`](service::EntityService) and answering with HAL views
//! (`_links`, `_embedded`). Services, repositories and controllers are wired
//! through a small dependency injection container.
//!
//! ## Wiring an entity
//!
//! ```rust,ignore
//! use healthplan::prelude::*;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, Entity)]
//! #[resource(path = "/api/v1/healthplans")]
//! pub struct HealthPlan {
//!     pub id: Option<i64>,
//!     pub name: String,
//! }
//!
//! pub type HealthPlanRepository = InMemoryRepository<HealthPlan>;
//! pub type HealthPlanService = BaseService<HealthPlan>;
//! pub type HealthPlanController = EntityController<HealthPlan, HealthPlanService>;
//!
//! #[module(
//!     bindings = [(dyn Repository<HealthPlan> => HealthPlanRepository)],
//!     providers = [HealthPlanRepository, HealthPlanService],
//!     controllers = [HealthPlanController],
//! )]
//! pub struct HealthPlanModule;
//!
//! let mut container = ContainerBuilder::new()
//!     .register(ServerConfig::default())
//!     .build();
//! HealthPlanModule::register(&mut container)?;
//!
//! let controller = container.resolve::<HealthPlanController>()?;
//! let router: Router = HealthPlanController::router(controller);
//! ```

extern crate self as healthplan;

pub mod app;
pub mod common;
pub mod config;
pub mod controller;
pub mod di;
pub mod entity;
pub mod error;
pub mod hateoas;
pub mod health_plan;
pub mod lifecycle;
pub mod module;
pub mod paging;
pub mod repository;
pub mod service;

// Re-export core types
pub use di::{Container, ContainerBuilder, HasContainer, Inject, Injectable};
pub use entity::Entity;
pub use error::{HealthPlanError, Result};
pub use module::Module;

// Re-export macros
pub use healthplan_macro::{Entity as DeriveEntity, Injectable as DeriveInjectable, module};

pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use healthplan::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ConfigService, ServerConfig};
    pub use crate::controller::{EntityController, ErrorPolicy};
    pub use crate::di::{Container, ContainerBuilder, HasContainer, Inject, Injectable};
    pub use crate::entity::Entity;
    pub use crate::error::{HealthPlanError, Result};
    pub use crate::hateoas::{CollectionModel, EntityModel, LinkBuilder};
    pub use crate::lifecycle::shutdown_signal;
    pub use crate::module::Module;
    pub use crate::paging::{Page, PageRequest};
    pub use crate::repository::{InMemoryRepository, Repository};
    pub use crate::service::{BaseService, EntityService, ServiceError, ServiceResult};
    pub use crate::{DeriveEntity as Entity, DeriveInjectable as Injectable, module};
    pub use async_trait::async_trait;
    pub use axum::{
        Json, Router,
        extract::{Path, Query, State},
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
