//! Alert API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        alert::{AlertFilter, CreateAlert, UpdateAlert},
        AlertView, Notification, NotifiedAlert,
    },
    AppState,
};

use super::{AuthenticatedUser, DeleteParams, Json, Query};

/// List alerts with the actions the caller may take
#[utoipa::path(
    get,
    path = "/alerts",
    tag = "alerts",
    security(("bearer_auth" = [])),
    params(AlertFilter),
    responses(
        (status = 200, description = "Filtered alert list", body = Vec<AlertView>)
    )
)]
pub async fn list_alerts(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Query(filter): Query<AlertFilter>,
) -> AppResult<Json<Vec<AlertView>>> {
    let alerts = state.services.alerts.list(&filter, session.role()).await?;
    Ok(Json(alerts))
}

/// Get alert by ID
#[utoipa::path(
    get,
    path = "/alerts/{id}",
    tag = "alerts",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Alert ID")),
    responses(
        (status = 200, description = "Alert details", body = AlertView),
        (status = 404, description = "Alert not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_alert(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<AlertView>> {
    let alert = state.services.alerts.get_by_id(&id, session.role()).await?;
    Ok(Json(alert))
}

/// Create alert
#[utoipa::path(
    post,
    path = "/alerts",
    tag = "alerts",
    security(("bearer_auth" = [])),
    request_body = CreateAlert,
    responses(
        (status = 201, description = "Alert created", body = NotifiedAlert),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Device not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_alert(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(data): Json<CreateAlert>,
) -> AppResult<(StatusCode, Json<NotifiedAlert>)> {
    data.validate()?;
    let created = state.services.alerts.create(&session, data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update alert
#[utoipa::path(
    put,
    path = "/alerts/{id}",
    tag = "alerts",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Alert ID")),
    request_body = UpdateAlert,
    responses(
        (status = 200, description = "Alert updated", body = NotifiedAlert),
        (status = 404, description = "Alert or device not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_alert(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<String>,
    Json(data): Json<UpdateAlert>,
) -> AppResult<Json<NotifiedAlert>> {
    data.validate()?;
    let updated = state.services.alerts.update(&session, &id, data).await?;
    Ok(Json(updated))
}

/// Mark an alert resolved
#[utoipa::path(
    post,
    path = "/alerts/{id}/resolve",
    tag = "alerts",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Alert ID")),
    responses(
        (status = 200, description = "Alert resolved", body = NotifiedAlert),
        (status = 404, description = "Alert not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Alert already resolved", body = crate::error::ErrorResponse)
    )
)]
pub async fn resolve_alert(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<NotifiedAlert>> {
    let resolved = state.services.alerts.resolve(&session, &id).await?;
    Ok(Json(resolved))
}

/// Delete alert
#[utoipa::path(
    delete,
    path = "/alerts/{id}",
    tag = "alerts",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Alert ID"),
        DeleteParams
    ),
    responses(
        (status = 200, description = "Alert deleted", body = Notification),
        (status = 400, description = "Deletion not confirmed", body = crate::error::ErrorResponse),
        (status = 404, description = "Alert not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<Notification>> {
    params.require_confirmation()?;
    let notification = state.services.alerts.delete(&id).await?;
    Ok(Json(notification))
}
