//! Device API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        device::{CreateDevice, DeviceFilter, UpdateDevice},
        Device, Notification, NotifiedDevice,
    },
    AppState,
};

use super::{DeleteParams, Json, Query};

/// List devices
#[utoipa::path(
    get,
    path = "/devices",
    tag = "devices",
    security(("bearer_auth" = [])),
    params(DeviceFilter),
    responses(
        (status = 200, description = "Filtered device list", body = Vec<Device>),
        (status = 400, description = "Unknown filter value", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_devices(
    State(state): State<AppState>,
    Query(filter): Query<DeviceFilter>,
) -> AppResult<Json<Vec<Device>>> {
    let devices = state.services.devices.list(&filter).await?;
    Ok(Json(devices))
}

/// Get device by ID
#[utoipa::path(
    get,
    path = "/devices/{id}",
    tag = "devices",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Device details", body = Device),
        (status = 404, description = "Device not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Device>> {
    let device = state.services.devices.get_by_id(&id).await?;
    Ok(Json(device))
}

/// Create device
#[utoipa::path(
    post,
    path = "/devices",
    tag = "devices",
    security(("bearer_auth" = [])),
    request_body = CreateDevice,
    responses(
        (status = 201, description = "Device created", body = NotifiedDevice),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Location not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_device(
    State(state): State<AppState>,
    Json(data): Json<CreateDevice>,
) -> AppResult<(StatusCode, Json<NotifiedDevice>)> {
    data.validate()?;
    let created = state.services.devices.create(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update device
#[utoipa::path(
    put,
    path = "/devices/{id}",
    tag = "devices",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Device ID")),
    request_body = UpdateDevice,
    responses(
        (status = 200, description = "Device updated", body = NotifiedDevice),
        (status = 404, description = "Device or location not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateDevice>,
) -> AppResult<Json<NotifiedDevice>> {
    data.validate()?;
    let updated = state.services.devices.update(&id, data).await?;
    Ok(Json(updated))
}

/// Delete device
#[utoipa::path(
    delete,
    path = "/devices/{id}",
    tag = "devices",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Device ID"),
        DeleteParams
    ),
    responses(
        (status = 200, description = "Device deleted", body = Notification),
        (status = 400, description = "Deletion not confirmed", body = crate::error::ErrorResponse),
        (status = 404, description = "Device not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<Notification>> {
    params.require_confirmation()?;
    let notification = state.services.devices.delete(&id).await?;
    Ok(Json(notification))
}
