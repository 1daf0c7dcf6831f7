#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use http_body_util::BodyExt;
use tower::ServiceExt;

use healthplan::app::{bootstrap, build_router};
use healthplan::config::ServerConfig;
use healthplan::controller::{EntityController, ErrorPolicy};
use healthplan::health_plan::HealthPlan;
use healthplan::paging::{Page, PageRequest};
use healthplan::repository::RepositoryError;
use healthplan::service::{EntityService, ServiceError, ServiceResult};

pub const PUBLIC_URL: &str = "http://localhost:8080";
pub const BASE: &str = "/api/v1/healthplans";

pub const GENERIC_ERROR: &str = "An error occurred, please try again later.";

/// Build a test `ServerConfig` pointing links at `PUBLIC_URL`.
pub fn test_config(error_policy: ErrorPolicy) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        public_url: PUBLIC_URL.to_string(),
        error_policy,
        ..ServerConfig::default()
    }
}

/// Build the full application router, exactly as `main.rs` does.
pub fn build_test_app() -> Router {
    build_test_app_with(ErrorPolicy::Collapsed)
}

pub fn build_test_app_with(error_policy: ErrorPolicy) -> Router {
    let container = bootstrap(test_config(error_policy)).unwrap();
    build_router(Arc::new(container)).unwrap()
}

/// Mount a controller over a stub service, without the container.
pub fn stub_app<S: EntityService<HealthPlan>>(service: Arc<S>, error_policy: ErrorPolicy) -> Router {
    let controller = EntityController::new(service, &test_config(error_policy));
    EntityController::router(Arc::new(controller))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Send a request whose body is the given raw text.
pub async fn send_raw(app: &Router, method: Method, uri: &str, raw: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn plan_json(name: &str, provider: &str, monthly_fee: f64) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "provider": provider,
        "monthlyFee": monthly_fee,
        "active": true
    })
}

/// Create a plan through the API and return its assigned id.
pub async fn create_plan(app: &Router, name: &str, provider: &str, monthly_fee: f64) -> i64 {
    let response = send(app, Method::POST, BASE, Some(plan_json(name, provider, monthly_fee))).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// What a [`FailingService`] fails with.
#[derive(Clone, Copy)]
pub enum Failure {
    NotFound,
    Validation,
    Conflict,
    Storage,
}

impl Failure {
    fn error(self, id: i64) -> ServiceError {
        match self {
            Failure::NotFound => ServiceError::NotFound {
                entity: "HealthPlan",
                id,
            },
            Failure::Validation => ServiceError::Validation("name must not be blank".into()),
            Failure::Conflict => ServiceError::Conflict("plan name already taken".into()),
            Failure::Storage => {
                RepositoryError::Unavailable("connection refused by db-primary:5432".into()).into()
            }
        }
    }
}

/// Fails every operation.
pub struct FailingService(pub Failure);

#[async_trait]
impl EntityService<HealthPlan> for FailingService {
    async fn find_all(&self) -> ServiceResult<Vec<HealthPlan>> {
        Err(self.0.error(0))
    }

    async fn find_by_id(&self, id: i64) -> ServiceResult<HealthPlan> {
        Err(self.0.error(id))
    }

    async fn save(&self, _entity: HealthPlan) -> ServiceResult<HealthPlan> {
        Err(self.0.error(0))
    }

    async fn update(&self, id: i64, _entity: HealthPlan) -> ServiceResult<HealthPlan> {
        Err(self.0.error(id))
    }

    async fn delete(&self, id: i64) -> ServiceResult<bool> {
        Err(self.0.error(id))
    }

    async fn find_page(&self, _request: PageRequest) -> ServiceResult<Page<HealthPlan>> {
        Err(self.0.error(0))
    }
}

/// Records the arguments it receives and answers with canned values.
#[derive(Default)]
pub struct RecordingService {
    pub updates: Mutex<Vec<(i64, HealthPlan)>>,
    pub page_requests: Mutex<Vec<PageRequest>>,
    pub deleted: Mutex<Vec<i64>>,
}

#[async_trait]
impl EntityService<HealthPlan> for RecordingService {
    async fn find_all(&self) -> ServiceResult<Vec<HealthPlan>> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, id: i64) -> ServiceResult<HealthPlan> {
        let mut plan = HealthPlan::new("Recorded", "Stub Health", 10.0);
        plan.id = Some(id);
        Ok(plan)
    }

    async fn save(&self, mut entity: HealthPlan) -> ServiceResult<HealthPlan> {
        entity.id = Some(1);
        Ok(entity)
    }

    async fn update(&self, id: i64, entity: HealthPlan) -> ServiceResult<HealthPlan> {
        self.updates.lock().unwrap().push((id, entity));
        // Deliberately different from what was submitted
        let mut stored = HealthPlan::new("Stored Name", "Stored Provider", 0.0);
        stored.id = Some(id);
        Ok(stored)
    }

    async fn delete(&self, id: i64) -> ServiceResult<bool> {
        self.deleted.lock().unwrap().push(id);
        Ok(true)
    }

    async fn find_page(&self, request: PageRequest) -> ServiceResult<Page<HealthPlan>> {
        self.page_requests.lock().unwrap().push(request.clone());
        let mut plan = HealthPlan::new("Paged", "Stub Health", 25.0);
        plan.id = Some(3);
        Ok(Page::new(vec![plan], &request, 41))
    }
}
