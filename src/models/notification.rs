//! User-visible notifications produced by mutations

use serde::Serialize;
use utoipa::ToSchema;

use super::{AlertView, Device, Location, User, UtilizationEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient message shown to the user after an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Mutation result paired with its notification
#[derive(Debug, Serialize, ToSchema)]
#[aliases(
    NotifiedDevice = Notified<Device>,
    NotifiedLocation = Notified<Location>,
    NotifiedUtilization = Notified<UtilizationEntry>,
    NotifiedAlert = Notified<AlertView>,
    NotifiedUser = Notified<User>
)]
pub struct Notified<T> {
    pub data: T,
    pub notification: Notification,
}
