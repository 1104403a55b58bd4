//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{alerts, auth, dashboard, devices, health, locations, navigation, users, utilization};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TelecomDM API",
        version = "0.3.0",
        description = "Telecom device management dashboard REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::demo_login,
        auth::signup,
        auth::logout,
        auth::me,
        // Navigation
        navigation::navigate,
        navigation::sidebar,
        // Dashboard
        dashboard::get_dashboard,
        // Devices
        devices::list_devices,
        devices::get_device,
        devices::create_device,
        devices::update_device,
        devices::delete_device,
        // Locations
        locations::list_locations,
        locations::get_location,
        locations::create_location,
        locations::update_location,
        locations::delete_location,
        // Utilization
        utilization::list_logs,
        utilization::get_log,
        utilization::create_log,
        utilization::update_log,
        utilization::delete_log,
        // Alerts
        alerts::list_alerts,
        alerts::get_alert,
        alerts::create_alert,
        alerts::update_alert,
        alerts::resolve_alert,
        alerts::delete_alert,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::SignupRequest,
            crate::models::Session,
            crate::models::Role,
            // Navigation
            navigation::NavigationDecision,
            crate::guard::Decision,
            crate::guard::Page,
            // Notifications
            crate::models::Notification,
            crate::models::NotificationKind,
            crate::models::NotifiedDevice,
            crate::models::NotifiedLocation,
            crate::models::NotifiedUtilization,
            crate::models::NotifiedAlert,
            crate::models::NotifiedUser,
            // Dashboard
            crate::models::dashboard::DashboardResponse,
            crate::models::dashboard::DashboardStats,
            crate::models::dashboard::DeviceTypeStats,
            crate::models::dashboard::MonthlyUsage,
            // Devices
            crate::models::Device,
            crate::models::DeviceType,
            crate::models::DeviceStatus,
            crate::models::device::CreateDevice,
            crate::models::device::UpdateDevice,
            // Locations
            crate::models::Location,
            crate::models::location::CreateLocation,
            crate::models::location::UpdateLocation,
            // Utilization
            crate::models::UtilizationLog,
            crate::models::UtilizationEntry,
            crate::models::utilization::CreateUtilizationLog,
            crate::models::utilization::UpdateUtilizationLog,
            // Alerts
            crate::models::Alert,
            crate::models::AlertView,
            crate::models::AlertType,
            crate::models::AlertSeverity,
            crate::models::AlertStatus,
            crate::models::alert::CreateAlert,
            crate::models::alert::UpdateAlert,
            // Users
            crate::models::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Health
            health::HealthResponse,
            health::ReadinessResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Sign-in, sign-out and sign-up"),
        (name = "navigation", description = "Route guard decisions for client pages"),
        (name = "dashboard", description = "Dashboard aggregates"),
        (name = "devices", description = "Device inventory"),
        (name = "locations", description = "Sites"),
        (name = "utilization", description = "Device utilization logs"),
        (name = "alerts", description = "Maintenance and system alerts"),
        (name = "users", description = "User management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
