//! API handlers for TelecomDM REST endpoints

pub mod alerts;
pub mod auth;
pub mod dashboard;
pub mod devices;
pub mod health;
pub mod locations;
pub mod navigation;
pub mod openapi;
pub mod users;
pub mod utilization;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, MatchedPath, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    guard,
    models::Session,
    AppState,
};

const API_PREFIX: &str = "/api/v1";

/// Bearer token from the Authorization header, if present
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// JSON body extractor and response; malformed bodies become validation errors
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Query string extractor; unknown filter values become validation errors
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

/// Session admitted by the route guard
pub struct AuthenticatedUser(pub Session);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| AppError::Authentication("Sign in required".to_string()))
    }
}

/// Session on a public route, when the caller presented a live token
pub struct CurrentSession(pub Option<Session>);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentSession(parts.extensions.get::<Session>().cloned()))
    }
}

/// Route guard: resolve the session, evaluate the capability table, and
/// either pass the request on with its session or turn it away.
pub async fn require_access(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| {
            let path = matched.as_str();
            path.strip_prefix(API_PREFIX).unwrap_or(path).to_string()
        })
        .unwrap_or_default();

    // Handlers are only registered for guarded verbs; the router answers 405
    if guard::Verb::of(request.method()).is_none() {
        return Ok(next.run(request).await);
    }

    let session = match bearer_token(request.headers()) {
        Some(token) => state.services.auth.current_session(token).await,
        None => None,
    };

    let Some(access) = guard::api_access(request.method(), &route) else {
        tracing::warn!(method = %request.method(), route = %route, "Route missing from capability table");
        return Err(AppError::Authorization(
            "Your role does not grant access to this resource".to_string(),
        ));
    };

    let decision = guard::evaluate(session.as_ref().map(Session::role), access);
    if let Err(e) = decision.into_result() {
        tracing::debug!(route = %route, ?decision, "Request turned away by guard");
        return Err(e);
    }

    if let Some(session) = session {
        request.extensions_mut().insert(session);
    }
    Ok(next.run(request).await)
}

/// Deletion confirmation, `?confirm=true`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteParams {
    pub confirm: Option<bool>,
}

impl DeleteParams {
    pub fn require_confirmation(&self) -> AppResult<()> {
        if self.confirm.unwrap_or(false) {
            Ok(())
        } else {
            Err(AppError::Validation("Deletion must be confirmed".to_string()))
        }
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/demo", post(auth::demo_login))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        // Navigation
        .route("/navigate", get(navigation::navigate))
        .route("/navigation", get(navigation::sidebar))
        // Dashboard
        .route("/dashboard", get(dashboard::get_dashboard))
        // Devices
        .route("/devices", get(devices::list_devices))
        .route("/devices", post(devices::create_device))
        .route("/devices/:id", get(devices::get_device))
        .route("/devices/:id", put(devices::update_device))
        .route("/devices/:id", delete(devices::delete_device))
        // Locations
        .route("/locations", get(locations::list_locations))
        .route("/locations", post(locations::create_location))
        .route("/locations/:id", get(locations::get_location))
        .route("/locations/:id", put(locations::update_location))
        .route("/locations/:id", delete(locations::delete_location))
        // Utilization
        .route("/utilization", get(utilization::list_logs))
        .route("/utilization", post(utilization::create_log))
        .route("/utilization/:id", get(utilization::get_log))
        .route("/utilization/:id", put(utilization::update_log))
        .route("/utilization/:id", delete(utilization::delete_log))
        // Alerts
        .route("/alerts", get(alerts::list_alerts))
        .route("/alerts", post(alerts::create_alert))
        .route("/alerts/:id", get(alerts::get_alert))
        .route("/alerts/:id", put(alerts::update_alert))
        .route("/alerts/:id", delete(alerts::delete_alert))
        .route("/alerts/:id/resolve", post(alerts::resolve_alert))
        // Users
        .route("/users", get(users::list_users))
        .route("/users", post(users::create_user))
        .route("/users/:id", get(users::get_user))
        .route("/users/:id", put(users::update_user))
        .route("/users/:id", delete(users::delete_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_access))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest(API_PREFIX, api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
