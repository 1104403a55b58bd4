//! Route guard
//!
//! Every API route and client page is declared once below with the
//! capability it requires, and every capability lists the roles allowed to
//! use it. The guard middleware resolves the session and evaluates the
//! matching entry on each request; handlers never re-check roles.

use axum::http::Method;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult, LOGIN_PAGE, UNAUTHORIZED_PAGE},
    models::Role,
};

const EVERYONE: &[Role] = &[Role::Admin, Role::Manager, Role::Technician];
const STAFF: &[Role] = &[Role::Admin, Role::Manager];
const ADMINS: &[Role] = &[Role::Admin];
const MANAGERS: &[Role] = &[Role::Manager];
const TECHNICIANS: &[Role] = &[Role::Technician];

/// Named permission a route requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Any signed-in account
    Session,
    ViewDashboard,
    ViewDevices,
    ManageDevices,
    ViewLocations,
    ManageLocations,
    ViewUtilization,
    LogUtilization,
    ManageUtilization,
    ViewAlerts,
    ManageAlerts,
    ResolveAlerts,
    ManageUsers,
    AdminPanel,
    ManagerPanel,
    TechnicianPanel,
}

impl Capability {
    /// Explicit allow-list; roles never inherit each other's capabilities
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Capability::Session
            | Capability::ViewDashboard
            | Capability::ViewDevices
            | Capability::ViewLocations
            | Capability::ViewUtilization
            | Capability::LogUtilization
            | Capability::ViewAlerts => EVERYONE,
            Capability::ManageDevices
            | Capability::ManageLocations
            | Capability::ManageUtilization
            | Capability::ManageAlerts
            | Capability::ResolveAlerts => STAFF,
            Capability::ManageUsers | Capability::AdminPanel => ADMINS,
            Capability::ManagerPanel => MANAGERS,
            Capability::TechnicianPanel => TECHNICIANS,
        }
    }

    pub fn permits(self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Requires(Capability),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub fn of(method: &Method) -> Option<Self> {
        if *method == Method::GET || *method == Method::HEAD {
            Some(Verb::Get)
        } else if *method == Method::POST {
            Some(Verb::Post)
        } else if *method == Method::PUT {
            Some(Verb::Put)
        } else if *method == Method::DELETE {
            Some(Verb::Delete)
        } else {
            None
        }
    }
}

/// One API endpoint, path in router syntax relative to `/api/v1`
#[derive(Debug, Clone, Copy)]
pub struct ApiRoute {
    pub verb: Verb,
    pub path: &'static str,
    pub access: Access,
}

const fn api(verb: Verb, path: &'static str, access: Access) -> ApiRoute {
    ApiRoute { verb, path, access }
}

use Access::{Public, Requires};
use Capability::*;
use Verb::{Delete, Get, Post, Put};

pub const API_ROUTES: &[ApiRoute] = &[
    api(Get, "/health", Public),
    api(Get, "/ready", Public),
    // Session
    api(Post, "/auth/login", Public),
    api(Post, "/auth/demo", Public),
    api(Post, "/auth/signup", Public),
    api(Post, "/auth/logout", Public),
    api(Get, "/auth/me", Requires(Session)),
    // Navigation
    api(Get, "/navigate", Public),
    api(Get, "/navigation", Requires(Session)),
    // Dashboard
    api(Get, "/dashboard", Requires(ViewDashboard)),
    // Devices
    api(Get, "/devices", Requires(ViewDevices)),
    api(Post, "/devices", Requires(ManageDevices)),
    api(Get, "/devices/:id", Requires(ViewDevices)),
    api(Put, "/devices/:id", Requires(ManageDevices)),
    api(Delete, "/devices/:id", Requires(ManageDevices)),
    // Locations
    api(Get, "/locations", Requires(ViewLocations)),
    api(Post, "/locations", Requires(ManageLocations)),
    api(Get, "/locations/:id", Requires(ViewLocations)),
    api(Put, "/locations/:id", Requires(ManageLocations)),
    api(Delete, "/locations/:id", Requires(ManageLocations)),
    // Utilization
    api(Get, "/utilization", Requires(ViewUtilization)),
    api(Post, "/utilization", Requires(LogUtilization)),
    api(Get, "/utilization/:id", Requires(ViewUtilization)),
    api(Put, "/utilization/:id", Requires(ManageUtilization)),
    api(Delete, "/utilization/:id", Requires(ManageUtilization)),
    // Alerts
    api(Get, "/alerts", Requires(ViewAlerts)),
    api(Post, "/alerts", Requires(ManageAlerts)),
    api(Get, "/alerts/:id", Requires(ViewAlerts)),
    api(Put, "/alerts/:id", Requires(ManageAlerts)),
    api(Delete, "/alerts/:id", Requires(ManageAlerts)),
    api(Post, "/alerts/:id/resolve", Requires(ResolveAlerts)),
    // Users
    api(Get, "/users", Requires(ManageUsers)),
    api(Post, "/users", Requires(ManageUsers)),
    api(Get, "/users/:id", Requires(ManageUsers)),
    api(Put, "/users/:id", Requires(ManageUsers)),
    api(Delete, "/users/:id", Requires(ManageUsers)),
];

/// Client page known to the guard
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct Page {
    pub path: &'static str,
    pub title: &'static str,
    #[serde(skip)]
    pub access: Access,
    /// Listed in the sidebar when the role may open it
    #[serde(skip)]
    pub in_menu: bool,
}

const fn page(path: &'static str, title: &'static str, access: Access, in_menu: bool) -> Page {
    Page {
        path,
        title,
        access,
        in_menu,
    }
}

pub const PAGES: &[Page] = &[
    page(LOGIN_PAGE, "Sign In", Public, false),
    page("/signup", "Sign Up", Public, false),
    page(UNAUTHORIZED_PAGE, "Unauthorized", Public, false),
    page("/", "Home", Requires(ViewDashboard), false),
    page("/dashboard", "Dashboard", Requires(ViewDashboard), true),
    page("/devices", "Devices", Requires(ViewDevices), true),
    page("/locations", "Locations", Requires(ViewLocations), true),
    page("/utilization", "Utilization Logs", Requires(ViewUtilization), true),
    page("/alerts", "Alerts", Requires(ViewAlerts), true),
    page("/admin", "Admin Panel", Requires(AdminPanel), true),
    page("/manager", "Manager", Requires(ManagerPanel), false),
    page("/user", "Technician", Requires(TechnicianPanel), false),
];

/// Outcome of evaluating a route for the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Render,
    RedirectToLogin,
    RedirectToUnauthorized,
}

impl Decision {
    /// Page to send the caller to, if not rendering
    pub fn location(self) -> Option<&'static str> {
        match self {
            Decision::Render => None,
            Decision::RedirectToLogin => Some(LOGIN_PAGE),
            Decision::RedirectToUnauthorized => Some(UNAUTHORIZED_PAGE),
        }
    }

    pub fn into_result(self) -> AppResult<()> {
        match self {
            Decision::Render => Ok(()),
            Decision::RedirectToLogin => {
                Err(AppError::Authentication("Sign in required".to_string()))
            }
            Decision::RedirectToUnauthorized => Err(AppError::Authorization(
                "Your role does not grant access to this resource".to_string(),
            )),
        }
    }
}

/// Decide for a caller with `role` (`None` when signed out)
pub fn evaluate(role: Option<Role>, access: Access) -> Decision {
    match (access, role) {
        (Access::Public, _) => Decision::Render,
        (Access::Requires(_), None) => Decision::RedirectToLogin,
        (Access::Requires(capability), Some(role)) if capability.permits(role) => {
            Decision::Render
        }
        (Access::Requires(_), Some(_)) => Decision::RedirectToUnauthorized,
    }
}

/// Access rule for an API request, by matched router path
pub fn api_access(method: &Method, path: &str) -> Option<Access> {
    let verb = Verb::of(method)?;
    API_ROUTES
        .iter()
        .find(|route| route.verb == verb && route.path == path)
        .map(|route| route.access)
}

/// Access rule for a client page
pub fn page_access(path: &str) -> Option<Access> {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    PAGES.iter().find(|p| p.path == path).map(|p| p.access)
}

/// Sidebar entries a role may open, in declaration order
pub fn menu(role: Role) -> Vec<Page> {
    PAGES
        .iter()
        .filter(|p| p.in_menu && evaluate(Some(role), p.access) == Decision::Render)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_rules() -> impl Iterator<Item = Access> {
        API_ROUTES
            .iter()
            .map(|r| r.access)
            .chain(PAGES.iter().map(|p| p.access))
    }

    #[test]
    fn test_access_granted_iff_role_in_allow_list() {
        for access in all_rules() {
            for &role in Role::ALL {
                let decision = evaluate(Some(role), access);
                match access {
                    Access::Public => assert_eq!(decision, Decision::Render),
                    Access::Requires(cap) => {
                        let allowed = cap.allowed_roles().contains(&role);
                        assert_eq!(decision == Decision::Render, allowed, "{cap:?} {role}");
                        if !allowed {
                            assert_eq!(decision.location(), Some(UNAUTHORIZED_PAGE));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_signed_out_redirects_to_login() {
        for access in all_rules() {
            if let Access::Requires(_) = access {
                let decision = evaluate(None, access);
                assert_eq!(decision, Decision::RedirectToLogin);
                assert!(decision.into_result().is_err());
            }
        }
    }

    #[test]
    fn test_admin_has_no_implicit_manager_or_technician_pages() {
        assert_eq!(
            evaluate(Some(Role::Admin), page_access("/manager").unwrap()),
            Decision::RedirectToUnauthorized
        );
        assert_eq!(
            evaluate(Some(Role::Admin), page_access("/user").unwrap()),
            Decision::RedirectToUnauthorized
        );
        assert_eq!(
            evaluate(Some(Role::Technician), page_access("/user").unwrap()),
            Decision::Render
        );
    }

    #[test]
    fn test_api_lookup_by_method_and_path() {
        assert_eq!(
            api_access(&Method::DELETE, "/devices/:id"),
            Some(Access::Requires(Capability::ManageDevices))
        );
        assert_eq!(api_access(&Method::POST, "/auth/login"), Some(Access::Public));
        assert_eq!(api_access(&Method::PATCH, "/devices/:id"), None);
        assert_eq!(api_access(&Method::GET, "/nowhere"), None);
    }

    #[test]
    fn test_routes_declared_once() {
        for (i, a) in API_ROUTES.iter().enumerate() {
            for b in &API_ROUTES[i + 1..] {
                assert!(!(a.verb == b.verb && a.path == b.path), "{} declared twice", a.path);
            }
        }
    }

    #[test]
    fn test_menu_only_lists_admin_panel_for_admins() {
        let titles = |role| menu(role).iter().map(|p| p.title).collect::<Vec<_>>();
        assert!(titles(Role::Admin).contains(&"Admin Panel"));
        assert!(!titles(Role::Manager).contains(&"Admin Panel"));
        assert_eq!(
            titles(Role::Technician),
            vec!["Dashboard", "Devices", "Locations", "Utilization Logs", "Alerts"]
        );
    }

    #[test]
    fn test_page_lookup_ignores_trailing_slash() {
        assert_eq!(page_access("/devices/"), page_access("/devices"));
        assert!(page_access("/").is_some());
        assert!(page_access("/reports").is_none());
    }
}
