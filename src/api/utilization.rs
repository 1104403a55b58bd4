//! Utilization log API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        utilization::{CreateUtilizationLog, UpdateUtilizationLog, UtilizationFilter},
        Notification, NotifiedUtilization, UtilizationEntry,
    },
    AppState,
};

use super::{AuthenticatedUser, DeleteParams, Json, Query};

/// List utilization logs with device names
#[utoipa::path(
    get,
    path = "/utilization",
    tag = "utilization",
    security(("bearer_auth" = [])),
    params(UtilizationFilter),
    responses(
        (status = 200, description = "Filtered log entries", body = Vec<UtilizationEntry>)
    )
)]
pub async fn list_logs(
    State(state): State<AppState>,
    Query(filter): Query<UtilizationFilter>,
) -> AppResult<Json<Vec<UtilizationEntry>>> {
    let entries = state.services.utilization.list(&filter).await?;
    Ok(Json(entries))
}

/// Get utilization log by ID
#[utoipa::path(
    get,
    path = "/utilization/{id}",
    tag = "utilization",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Log ID")),
    responses(
        (status = 200, description = "Log entry", body = UtilizationEntry),
        (status = 404, description = "Log not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UtilizationEntry>> {
    let entry = state.services.utilization.get_by_id(&id).await?;
    Ok(Json(entry))
}

/// Log device hours as the current user
#[utoipa::path(
    post,
    path = "/utilization",
    tag = "utilization",
    security(("bearer_auth" = [])),
    request_body = CreateUtilizationLog,
    responses(
        (status = 201, description = "Hours logged", body = NotifiedUtilization),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Device not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_log(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(data): Json<CreateUtilizationLog>,
) -> AppResult<(StatusCode, Json<NotifiedUtilization>)> {
    data.validate()?;
    let created = state.services.utilization.create(&session, data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update utilization log
#[utoipa::path(
    put,
    path = "/utilization/{id}",
    tag = "utilization",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Log ID")),
    request_body = UpdateUtilizationLog,
    responses(
        (status = 200, description = "Log updated", body = NotifiedUtilization),
        (status = 404, description = "Log or device not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateUtilizationLog>,
) -> AppResult<Json<NotifiedUtilization>> {
    data.validate()?;
    let updated = state.services.utilization.update(&id, data).await?;
    Ok(Json(updated))
}

/// Delete utilization log
#[utoipa::path(
    delete,
    path = "/utilization/{id}",
    tag = "utilization",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Log ID"),
        DeleteParams
    ),
    responses(
        (status = 200, description = "Log deleted", body = Notification),
        (status = 400, description = "Deletion not confirmed", body = crate::error::ErrorResponse),
        (status = 404, description = "Log not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<Notification>> {
    params.require_confirmation()?;
    let notification = state.services.utilization.delete(&id).await?;
    Ok(Json(notification))
}
