//! Controller behaviour over stub services: failure mapping under both error
//! policies, argument forwarding and verbatim pages.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{BASE, Failure, FailingService, GENERIC_ERROR, PUBLIC_URL, RecordingService, body_json, plan_json, send, stub_app};
use healthplan::controller::ErrorPolicy;
use healthplan::paging::{Order, PageRequest};

/// Every route, with the status its failures collapse to.
fn routes() -> Vec<(Method, String, Option<serde_json::Value>, StatusCode)> {
    vec![
        (Method::GET, BASE.to_string(), None, StatusCode::NOT_FOUND),
        (Method::GET, format!("{BASE}/1"), None, StatusCode::NOT_FOUND),
        (Method::GET, format!("{BASE}/paged"), None, StatusCode::NOT_FOUND),
        (
            Method::POST,
            BASE.to_string(),
            Some(plan_json("Basic", "Acme Health", 49.9)),
            StatusCode::BAD_REQUEST,
        ),
        (
            Method::PUT,
            format!("{BASE}/1"),
            Some(plan_json("Basic", "Acme Health", 49.9)),
            StatusCode::BAD_REQUEST,
        ),
        (Method::DELETE, format!("{BASE}/1"), None, StatusCode::BAD_REQUEST),
    ]
}

// ---------------------------------------------------------------------------
// Test: collapsed policy maps every failure to 404 (reads) or 400 (writes)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn collapsed_policy_uses_operation_status_and_generic_payload() {
    for failure in [Failure::NotFound, Failure::Conflict, Failure::Storage] {
        let app = stub_app(Arc::new(FailingService(failure)), ErrorPolicy::Collapsed);

        for (method, uri, body, expected) in routes() {
            let response = send(&app, method.clone(), &uri, body).await;
            assert_eq!(response.status(), expected, "{method} {uri}");
            assert_eq!(body_json(response).await, json!({ "error": GENERIC_ERROR }));
        }
    }
}

// ---------------------------------------------------------------------------
// Test: typed policy maps not-found to 404 NOT_FOUND on every route
// ---------------------------------------------------------------------------

#[tokio::test]
async fn typed_policy_not_found() {
    let app = stub_app(Arc::new(FailingService(Failure::NotFound)), ErrorPolicy::Typed);

    let response = send(&app, Method::DELETE, &format!("{BASE}/8"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "HealthPlan with id 8 not found");
    assert_eq!(json["statusCode"], 404);
    assert!(json["timestamp"].is_string());
}

// ---------------------------------------------------------------------------
// Test: typed policy maps validation to 400 and conflict to 409
// ---------------------------------------------------------------------------

#[tokio::test]
async fn typed_policy_validation_and_conflict() {
    let app = stub_app(Arc::new(FailingService(Failure::Validation)), ErrorPolicy::Typed);
    let response = send(&app, Method::POST, BASE, Some(plan_json("", "Acme Health", 1.0))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "name must not be blank");

    let app = stub_app(Arc::new(FailingService(Failure::Conflict)), ErrorPolicy::Typed);
    let response = send(&app, Method::GET, BASE, None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Test: typed policy hides storage details behind a 500
// ---------------------------------------------------------------------------

#[tokio::test]
async fn typed_policy_sanitizes_storage_errors() {
    let app = stub_app(Arc::new(FailingService(Failure::Storage)), ErrorPolicy::Typed);
    let response = send(&app, Method::GET, &format!("{BASE}/paged"), None).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("db-primary"));
}

// ---------------------------------------------------------------------------
// Test: typed policy reports unreadable requests as BAD_REQUEST
// ---------------------------------------------------------------------------

#[tokio::test]
async fn typed_policy_rejected_requests() {
    let app = stub_app(Arc::new(RecordingService::default()), ErrorPolicy::Typed);
    let response = send(&app, Method::GET, &format!("{BASE}/not-a-number"), None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Test: update passes the path id to the service and echoes the submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_forwards_path_id_and_echoes_submitted_entity() {
    let service = Arc::new(RecordingService::default());
    let app = stub_app(service.clone(), ErrorPolicy::Collapsed);

    let mut body = plan_json("Submitted", "Acme Health", 42.0);
    body["id"] = json!(99);
    let response = send(&app, Method::PUT, &format!("{BASE}/5"), Some(body)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], 5);
    assert_eq!(json["name"], "Submitted");
    assert_eq!(json["_links"]["self"]["href"], format!("{PUBLIC_URL}{BASE}/5"));

    let updates = service.updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, 5);
    assert_eq!(updates[0].1.id, Some(5));
}

// ---------------------------------------------------------------------------
// Test: update without an id in the body still targets the path id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_assigns_id_when_body_has_none() {
    let service = Arc::new(RecordingService::default());
    let app = stub_app(service.clone(), ErrorPolicy::Collapsed);

    let response = send(&app, Method::PUT, &format!("{BASE}/12"), Some(plan_json("Gold", "Acme Health", 120.0))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(service.updates.lock().unwrap()[0].1.id, Some(12));
}

// ---------------------------------------------------------------------------
// Test: list-all with an empty service result is 204
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_list_is_no_content() {
    let app = stub_app(Arc::new(RecordingService::default()), ErrorPolicy::Collapsed);
    let response = send(&app, Method::GET, BASE, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Test: paged returns the service page verbatim and forwards the request
// ---------------------------------------------------------------------------

#[tokio::test]
async fn paged_returns_service_page_verbatim() {
    let service = Arc::new(RecordingService::default());
    let app = stub_app(service.clone(), ErrorPolicy::Collapsed);

    let response = send(&app, Method::GET, &format!("{BASE}/paged?page=2&size=5&sort=name,provider,desc"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["totalElements"], 41);
    assert_eq!(json["totalPages"], 9);
    assert_eq!(json["number"], 2);
    assert_eq!(json["content"][0]["name"], "Paged");

    let requests = service.page_requests.lock().unwrap();
    assert_eq!(
        requests[0],
        PageRequest::of(2, 5)
            .sorted_by(Order::desc("name"))
            .sorted_by(Order::desc("provider"))
    );
}

// ---------------------------------------------------------------------------
// Test: paged applies default page and size
// ---------------------------------------------------------------------------

#[tokio::test]
async fn paged_defaults() {
    let service = Arc::new(RecordingService::default());
    let app = stub_app(service.clone(), ErrorPolicy::Collapsed);

    let response = send(&app, Method::GET, &format!("{BASE}/paged"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(service.page_requests.lock().unwrap()[0], PageRequest::of(0, 20));
}

// ---------------------------------------------------------------------------
// Test: delete forwards the id and returns the service's answer
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_forwards_id() {
    let service = Arc::new(RecordingService::default());
    let app = stub_app(service.clone(), ErrorPolicy::Collapsed);

    let response = send(&app, Method::DELETE, &format!("{BASE}/31"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!(true));
    assert_eq!(*service.deleted.lock().unwrap(), vec![31]);
}
