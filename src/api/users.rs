//! User management API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        user::{CreateUser, UpdateUser, UserFilter},
        Notification, NotifiedUser, User,
    },
    AppState,
};

use super::{AuthenticatedUser, DeleteParams, Json, Query};

/// List users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    params(UserFilter),
    responses(
        (status = 200, description = "Filtered user list", body = Vec<User>)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> AppResult<Json<Vec<User>>> {
    let users = state.services.users.list(&filter).await?;
    Ok(Json(users))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let user = state.services.users.get_by_id(&id).await?;
    Ok(Json(user))
}

/// Create user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = NotifiedUser),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(data): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<NotifiedUser>)> {
    data.validate()?;
    let created = state.services.users.create(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update user role; the email cannot change
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = NotifiedUser),
        (status = 400, description = "Email change attempted", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateUser>,
) -> AppResult<Json<NotifiedUser>> {
    let updated = state.services.users.update(&id, data).await?;
    Ok(Json(updated))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID"),
        DeleteParams
    ),
    responses(
        (status = 200, description = "User deleted", body = Notification),
        (status = 400, description = "Deletion not confirmed", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Own account", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<Notification>> {
    params.require_confirmation()?;
    let notification = state.services.users.delete(&session, &id).await?;
    Ok(Json(notification))
}
