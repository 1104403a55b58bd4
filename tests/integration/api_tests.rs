//! API integration tests
//!
//! Drive the real router in-process against freshly seeded collections.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use telecomdm_server::{
    api,
    config::{AppConfig, AuthMode},
    services::notifications::TracingSink,
    AppState,
};

async fn app_with(mode: AuthMode) -> Router {
    let mut config = AppConfig::default();
    config.auth.sign_in_delay_ms = 0;
    config.auth.mode = mode;
    let state = AppState::build(config, Arc::new(TracingSink))
        .await
        .expect("Failed to build state");
    api::create_router(state)
}

async fn app() -> Router {
    app_with(AuthMode::Demo).await
}

/// Send a request and return status, Location header and JSON body
async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(format!("/api/v1{}", uri));
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, location, body)
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    let (status, _, body) = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    (status, body)
}

async fn admin_token(app: &Router) -> String {
    let (status, body) = login(app, "admin@telecom.demo", "demo123456").await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

/// Register and sign in an account (registry mode)
async fn registered_token(app: &Router, email: &str, role: &str) -> String {
    let (status, _, _) = send(
        app,
        Method::POST,
        "/auth/signup",
        None,
        Some(json!({ "email": email, "password": "secret123", "role": role })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = login(app, email, "secret123").await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app().await;
    let (status, _, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_demo_login_gives_admin_session() {
    let app = app().await;
    let (status, body) = login(&app, "admin@telecom.demo", "demo123456").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["session"]["user"]["role"], "admin");
    assert_eq!(body["notification"]["kind"], "success");

    let (status, _, body) = send(&app, Method::POST, "/auth/demo", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["user"]["email"], "admin@telecom.demo");
}

#[tokio::test]
async fn test_wrong_credentials_leave_no_session() {
    let app = app().await;
    let (status, body) = login(&app, "admin@telecom.demo", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("token").is_none());
    assert_eq!(body["redirect"], "/login");
}

#[tokio::test]
async fn test_guard_redirects_signed_out_caller_to_login() {
    let app = app().await;
    let (status, location, _) = send(&app, Method::GET, "/devices", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(location.as_deref(), Some("/login"));

    let (status, location, _) =
        send(&app, Method::GET, "/devices", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_technician_cannot_manage_devices() {
    let app = app_with(AuthMode::Registry).await;
    let token = registered_token(&app, "field.tech@telecom.demo", "technician").await;

    let (status, _, body) = send(&app, Method::GET, "/devices", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);

    let (status, location, _) = send(
        &app,
        Method::POST,
        "/devices",
        Some(&token),
        Some(json!({
            "name": "Router RT-003",
            "type": "router",
            "serial_number": "RT003-2024-003",
            "model": "Cisco ISR 4351",
            "purchase_date": "2024-05-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(location.as_deref(), Some("/unauthorized"));

    let (status, _, _) = send(&app, Method::GET, "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_navigate_reports_guard_decisions() {
    let app = app().await;
    let token = admin_token(&app).await;

    let (_, _, body) = send(&app, Method::GET, "/navigate?path=/admin", Some(&token), None).await;
    assert_eq!(body["decision"], "render");

    let (_, _, body) =
        send(&app, Method::GET, "/navigate?path=/manager", Some(&token), None).await;
    assert_eq!(body["decision"], "redirect_to_unauthorized");
    assert_eq!(body["location"], "/unauthorized");

    let (_, _, body) = send(&app, Method::GET, "/navigate?path=/dashboard", None, None).await;
    assert_eq!(body["decision"], "redirect_to_login");

    let (_, _, body) = send(&app, Method::GET, "/navigation", Some(&token), None).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["title"].as_str())
        .collect();
    assert!(titles.contains(&"Admin Panel"));
}

#[tokio::test]
async fn test_device_filters() {
    let app = app().await;
    let token = admin_token(&app).await;

    let (status, _, body) =
        send(&app, Method::GET, "/devices?type=router", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Router RT-001", "Router RT-002"]);

    let (_, _, body) = send(
        &app,
        Method::GET,
        "/devices?status=maintenance&type=all",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["serial_number"], "MD001-2024-001");

    let (status, _, body) =
        send(&app, Method::GET, "/devices?status=broken", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4);
    assert_eq!(body["error"], "ValidationFailure");
    assert!(body["message"].as_str().unwrap().contains("broken"));
}

#[tokio::test]
async fn test_unknown_device_type_is_a_validation_failure() {
    let app = app().await;
    let token = admin_token(&app).await;

    let (status, location, body) = send(
        &app,
        Method::POST,
        "/devices",
        Some(&token),
        Some(json!({
            "name": "Laptop LP-001",
            "type": "laptop",
            "serial_number": "LP001-2024-001",
            "model": "ThinkPad T14",
            "purchase_date": "2024-05-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(location.is_none());
    assert_eq!(body["code"], 4);
    assert_eq!(body["error"], "ValidationFailure");
    assert!(body["message"].as_str().unwrap().contains("laptop"));

    let (_, _, devices) = send(&app, Method::GET, "/devices", Some(&token), None).await;
    assert_eq!(devices.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_malformed_json_body_is_a_validation_failure() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "ValidationFailure");
}

#[tokio::test]
async fn test_unsupported_method_is_not_allowed() {
    let app = app().await;
    let token = admin_token(&app).await;

    let (status, location, _) =
        send(&app, Method::PATCH, "/devices/dev-1", Some(&token), None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(location.is_none());
}

#[tokio::test]
async fn test_location_device_count_defaults_to_zero() {
    let app = app().await;
    let token = admin_token(&app).await;

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/locations",
        Some(&token),
        Some(json!({
            "name": "North Depot",
            "address": "10 Harbor Road",
            "city": "Seattle",
            "country": "USA"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["device_count"], 0);
    assert_eq!(body["notification"]["message"], "Location added successfully");
}

#[tokio::test]
async fn test_resolve_alert_once() {
    let app = app().await;
    let token = admin_token(&app).await;

    let (status, _, body) =
        send(&app, Method::POST, "/alerts/1/resolve", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "resolved");
    assert_eq!(body["data"]["resolved_by"], "admin@telecom.demo");
    assert!(body["data"]["resolved_at"].is_string());
    assert_eq!(body["data"]["can_resolve"], false);

    let (status, _, _) = send(&app, Method::POST, "/alerts/1/resolve", Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, _, body) = send(&app, Method::GET, "/alerts/1", Some(&token), None).await;
    assert_eq!(body["can_resolve"], false);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let app = app().await;
    let token = admin_token(&app).await;

    let (status, _, body) = send(&app, Method::DELETE, "/devices/2", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Deletion must be confirmed");
    let (status, _, _) = send(&app, Method::GET, "/devices/2", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = send(
        &app,
        Method::DELETE,
        "/devices/2?confirm=true",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Device deleted successfully");
    let (status, _, _) = send(&app, Method::GET, "/devices/2", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cannot_delete_own_account() {
    let app = app().await;
    let token = admin_token(&app).await;

    let (status, _, body) = send(
        &app,
        Method::DELETE,
        "/users/a1b2c3d4-e5f6-7890-1234-567890abcdef?confirm=true",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "You cannot delete your own account");
}

#[tokio::test]
async fn test_user_email_is_fixed() {
    let app = app().await;
    let token = admin_token(&app).await;

    let (status, _, _) = send(
        &app,
        Method::PUT,
        "/users/2",
        Some(&token),
        Some(json!({ "email": "someone.else@telecom.demo", "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, _, body) = send(&app, Method::GET, "/users/2", Some(&token), None).await;
    assert_eq!(body["role"], "manager");
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let app = app().await;
    let token = admin_token(&app).await;

    let (status, _, _) = send(&app, Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = send(&app, Method::POST, "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "success");

    let (status, location, _) = send(&app, Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(location.as_deref(), Some("/login"));

    // Signing out again still succeeds
    let (status, _, _) = send(&app, Method::POST, "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_signup_disabled_in_demo_mode() {
    let app = app().await;
    let (status, _, body) = send(
        &app,
        Method::POST,
        "/auth/signup",
        None,
        Some(json!({ "email": "new@telecom.demo", "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Sign up is disabled in demo mode");
}

#[tokio::test]
async fn test_registry_signup_rejects_taken_email() {
    let app = app_with(AuthMode::Registry).await;
    registered_token(&app, "ops.manager@telecom.demo", "manager").await;

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/auth/signup",
        None,
        Some(json!({ "email": "OPS.Manager@telecom.demo", "password": "another1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_technician_logs_utilization_under_own_email() {
    let app = app_with(AuthMode::Registry).await;
    let token = registered_token(&app, "night.shift@telecom.demo", "technician").await;

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/utilization",
        Some(&token),
        Some(json!({
            "device_id": "4",
            "hours_used": 12.5,
            "log_date": "2024-07-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["created_by"], "night.shift@telecom.demo");
    assert_eq!(body["data"]["device_name"], "Router RT-002");

    // Editing logs is reserved to staff
    let (status, _, _) = send(
        &app,
        Method::PUT,
        "/utilization/1",
        Some(&token),
        Some(json!({ "hours_used": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deleted_user_session_is_revoked() {
    let app = app_with(AuthMode::Registry).await;
    let admin = admin_token(&app).await;
    let token = registered_token(&app, "leaving@telecom.demo", "manager").await;

    let (_, _, me) = send(&app, Method::GET, "/auth/me", Some(&token), None).await;
    let user_id = me["user"]["id"].as_str().unwrap().to_string();

    let (status, _, _) = send(
        &app,
        Method::DELETE,
        &format!("/users/{}?confirm=true", user_id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(&app, Method::GET, "/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_aggregates() {
    let app = app().await;
    let token = admin_token(&app).await;

    let (status, _, body) = send(&app, Method::GET, "/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["total_devices"], 4);
    assert_eq!(body["stats"]["active_alerts"], 3);
    assert_eq!(body["recent_alerts"].as_array().unwrap().len(), 4);
    assert_eq!(body["monthly_usage"][0]["month"], "Jun 2024");
}
