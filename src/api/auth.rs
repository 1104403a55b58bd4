//! Authentication endpoints

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{Notification, NotifiedUser, Role, Session},
    services::auth::SignedIn,
    AppState,
};

use super::{bearer_token, AuthenticatedUser, Json};

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    /// User email
    pub email: String,
    /// User password
    pub password: String,
}

/// Sign-up request
#[derive(Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Defaults to technician
    pub role: Option<Role>,
}

/// Login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT access token
    pub token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    pub session: Session,
    pub notification: Notification,
}

impl From<SignedIn> for LoginResponse {
    fn from(signed_in: SignedIn) -> Self {
        Self {
            token: signed_in.token,
            token_type: "Bearer".to_string(),
            session: signed_in.session,
            notification: signed_in.notification,
        }
    }
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let signed_in = state
        .services
        .auth
        .sign_in(&request.email, &request.password)
        .await?;
    Ok(Json(signed_in.into()))
}

/// Sign in with the configured demo account
#[utoipa::path(
    post,
    path = "/auth/demo",
    tag = "auth",
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Demo account unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn demo_login(State(state): State<AppState>) -> AppResult<Json<LoginResponse>> {
    let signed_in = state.services.auth.demo_sign_in().await?;
    Ok(Json(signed_in.into()))
}

/// Register a new account (registry mode only)
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = NotifiedUser),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse),
        (status = 422, description = "Sign up disabled", body = crate::error::ErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<NotifiedUser>)> {
    request.validate()?;
    let created = state
        .services
        .auth
        .sign_up(
            &request.email,
            &request.password,
            request.role.unwrap_or(Role::Technician),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// End the current session; succeeds even without one
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Signed out", body = Notification)
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<Notification> {
    let token = bearer_token(&headers);
    Json(state.services.auth.sign_out(token).await)
}

/// Get current session
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current session", body = Session),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn me(AuthenticatedUser(session): AuthenticatedUser) -> Json<Session> {
    Json(session)
}
