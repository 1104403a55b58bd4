//! Alert model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{
    enums::{AlertSeverity, AlertStatus, AlertType},
    filter::{self, Filter},
};
use crate::{
    error::{AppError, AppResult},
    repository::Entity,
};

/// Alert record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub status: AlertStatus,
    pub device_id: Option<String>,
    /// Set together with `resolved_by` when the alert is resolved
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    pub fn is_active(&self) -> bool {
        self.status == AlertStatus::Active
    }
}

/// Create alert request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAlert {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub device_id: Option<String>,
}

/// Update alert request. Status only changes through resolution.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAlert {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub alert_type: Option<AlertType>,
    pub severity: Option<AlertSeverity>,
    /// An empty string detaches the alert from its device
    pub device_id: Option<String>,
}

/// Mutation applied to a stored alert
#[derive(Debug)]
pub enum AlertChange {
    Edit(UpdateAlert),
    Resolve { by: String },
}

impl Entity for Alert {
    type Create = CreateAlert;
    type Update = AlertChange;

    const KIND: &'static str = "Alert";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(id: String, data: CreateAlert, now: DateTime<Utc>) -> Self {
        Alert {
            id,
            title: data.title,
            description: data.description,
            alert_type: data.alert_type,
            severity: data.severity,
            status: AlertStatus::Active,
            device_id: data.device_id.filter(|d| !d.is_empty()),
            resolved_at: None,
            resolved_by: None,
            created_at: now,
        }
    }

    fn apply(&mut self, change: AlertChange, now: DateTime<Utc>) -> AppResult<()> {
        match change {
            AlertChange::Edit(data) => {
                if let Some(title) = data.title {
                    self.title = title;
                }
                if let Some(description) = data.description {
                    self.description = description;
                }
                if let Some(alert_type) = data.alert_type {
                    self.alert_type = alert_type;
                }
                if let Some(severity) = data.severity {
                    self.severity = severity;
                }
                if let Some(device_id) = data.device_id {
                    self.device_id = Some(device_id).filter(|d| !d.is_empty());
                }
            }
            AlertChange::Resolve { by } => {
                if !self.is_active() {
                    return Err(AppError::Conflict(format!(
                        "Alert {} is already resolved",
                        self.id
                    )));
                }
                self.status = AlertStatus::Resolved;
                self.resolved_at = Some(now);
                self.resolved_by = Some(by);
            }
        }
        Ok(())
    }
}

/// Alert as presented to a caller, with the actions their role allows
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AlertView {
    #[serde(flatten)]
    pub alert: Alert,
    /// True only for active alerts when the caller may resolve alerts
    pub can_resolve: bool,
}

/// Alert list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AlertFilter {
    #[serde(default, deserialize_with = "filter::choice")]
    pub status: Option<AlertStatus>,
    #[serde(default, deserialize_with = "filter::choice")]
    pub severity: Option<AlertSeverity>,
    #[serde(default, rename = "type", deserialize_with = "filter::choice")]
    pub alert_type: Option<AlertType>,
    /// Matched against title and description
    pub search: Option<String>,
}

impl Filter<Alert> for AlertFilter {
    fn matches(&self, alert: &Alert) -> bool {
        if self.status.is_some_and(|s| s != alert.status) {
            return false;
        }
        if self.severity.is_some_and(|s| s != alert.severity) {
            return false;
        }
        if self.alert_type.is_some_and(|t| t != alert.alert_type) {
            return false;
        }
        match filter::needle(&self.search) {
            Some(needle) => {
                filter::contains(&alert.title, &needle)
                    || filter::contains(&alert.description, &needle)
            }
            None => true,
        }
    }
}
