//! Client navigation endpoints

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    guard::{self, Decision, Page},
    models::Session,
};

use super::{AuthenticatedUser, CurrentSession, Query};

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NavigateQuery {
    /// Client page path, e.g. `/devices`
    pub path: String,
}

/// Guard decision for a client page
#[derive(Serialize, ToSchema)]
pub struct NavigationDecision {
    pub path: String,
    pub decision: Decision,
    /// Page to redirect to when the decision is not `render`
    pub location: Option<String>,
}

/// Evaluate whether the caller may open a client page
#[utoipa::path(
    get,
    path = "/navigate",
    tag = "navigation",
    params(NavigateQuery),
    responses(
        (status = 200, description = "Guard decision", body = NavigationDecision),
        (status = 404, description = "Unknown page", body = crate::error::ErrorResponse)
    )
)]
pub async fn navigate(
    CurrentSession(session): CurrentSession,
    Query(query): Query<NavigateQuery>,
) -> AppResult<Json<NavigationDecision>> {
    let access = guard::page_access(&query.path)
        .ok_or_else(|| AppError::NotFound(format!("Page {} not found", query.path)))?;
    let decision = guard::evaluate(session.as_ref().map(Session::role), access);

    Ok(Json(NavigationDecision {
        path: query.path,
        decision,
        location: decision.location().map(str::to_string),
    }))
}

/// Sidebar entries visible to the current role
#[utoipa::path(
    get,
    path = "/navigation",
    tag = "navigation",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sidebar entries", body = Vec<Page>)
    )
)]
pub async fn sidebar(AuthenticatedUser(session): AuthenticatedUser) -> Json<Vec<Page>> {
    Json(guard::menu(session.role()))
}
