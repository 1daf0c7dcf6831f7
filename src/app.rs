//! Application assembly: container bootstrap and the HTTP router.

use crate::config::{ConfigService, ServerConfig};
use crate::di::{Container, ContainerBuilder, HasContainer, Inject};
use crate::error::Result;
use crate::health_plan::{HealthPlanController, HealthPlanModule};
use crate::module::Module;
use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub container: Arc<Container>,
}

impl HasContainer for AppState {
    fn container(&self) -> &Container {
        &self.container
    }
}

/// Read `ServerConfig` from the environment and `.env`
pub fn load_config() -> Result<ServerConfig> {
    Ok(ServerConfig::from_config(&ConfigService::from_env())?)
}

/// Register the configuration, then every module
pub fn bootstrap(config: ServerConfig) -> Result<Container> {
    let mut container = ContainerBuilder::new().register(config).build();
    HealthPlanModule::register(&mut container)?;

    tracing::debug!(services = container.len(), "Container ready");
    Ok(container)
}

/// Mount `/health` and every entity controller
pub fn build_router(container: Arc<Container>) -> Result<Router> {
    let config = container.resolve::<ServerConfig>()?;
    let health_plans = container.resolve::<HealthPlanController>()?;

    let state = AppState { container };

    Ok(Router::new()
        .route("/health", get(health))
        .merge(HealthPlanController::router(health_plans))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

async fn health(Inject(config): Inject<ServerConfig>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "errorPolicy": config.error_policy,
    }))
}
