//! Location API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        location::{CreateLocation, LocationFilter, UpdateLocation},
        Location, Notification, NotifiedLocation,
    },
    AppState,
};

use super::{DeleteParams, Json, Query};

/// List locations
#[utoipa::path(
    get,
    path = "/locations",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(LocationFilter),
    responses(
        (status = 200, description = "Filtered location list", body = Vec<Location>)
    )
)]
pub async fn list_locations(
    State(state): State<AppState>,
    Query(filter): Query<LocationFilter>,
) -> AppResult<Json<Vec<Location>>> {
    let locations = state.services.locations.list(&filter).await?;
    Ok(Json(locations))
}

/// Get location by ID
#[utoipa::path(
    get,
    path = "/locations/{id}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location details", body = Location),
        (status = 404, description = "Location not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Location>> {
    let location = state.services.locations.get_by_id(&id).await?;
    Ok(Json(location))
}

/// Create location
#[utoipa::path(
    post,
    path = "/locations",
    tag = "locations",
    security(("bearer_auth" = [])),
    request_body = CreateLocation,
    responses(
        (status = 201, description = "Location created", body = NotifiedLocation),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_location(
    State(state): State<AppState>,
    Json(data): Json<CreateLocation>,
) -> AppResult<(StatusCode, Json<NotifiedLocation>)> {
    data.validate()?;
    let created = state.services.locations.create(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update location
#[utoipa::path(
    put,
    path = "/locations/{id}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Location ID")),
    request_body = UpdateLocation,
    responses(
        (status = 200, description = "Location updated", body = NotifiedLocation),
        (status = 404, description = "Location not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateLocation>,
) -> AppResult<Json<NotifiedLocation>> {
    data.validate()?;
    let updated = state.services.locations.update(&id, data).await?;
    Ok(Json(updated))
}

/// Delete location
#[utoipa::path(
    delete,
    path = "/locations/{id}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Location ID"),
        DeleteParams
    ),
    responses(
        (status = 200, description = "Location deleted", body = Notification),
        (status = 400, description = "Deletion not confirmed", body = crate::error::ErrorResponse),
        (status = 404, description = "Location not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<Notification>> {
    params.require_confirmation()?;
    let notification = state.services.locations.delete(&id).await?;
    Ok(Json(notification))
}
