//! Notification sink

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Notification, NotificationKind, Notified},
};

/// Receives every user-visible operation outcome
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Default sink: one tracing event per notification
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Success => {
                tracing::info!(text = %notification.message, "Notification")
            }
            NotificationKind::Error => {
                tracing::warn!(text = %notification.message, "Notification")
            }
        }
    }
}

/// Turns mutation results into notifications and forwards them to the sink
#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn NotificationSink>,
}

impl Notifier {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    pub fn success(&self, message: &str) -> Notification {
        let notification = Notification::success(message);
        self.sink.notify(&notification);
        notification
    }

    pub fn error(&self, message: &str) -> Notification {
        let notification = Notification::error(message);
        self.sink.notify(&notification);
        notification
    }

    /// Notify the outcome of a mutation returning a record
    pub fn report<T>(&self, result: AppResult<T>, success: &str, failure: &str) -> AppResult<Notified<T>> {
        match result {
            Ok(data) => Ok(Notified {
                data,
                notification: self.success(success),
            }),
            Err(e) => {
                self.error(&format!("{}: {}", failure, e.message()));
                Err(e)
            }
        }
    }

    /// Notify the outcome of a mutation with no payload (deletes)
    pub fn report_done(&self, result: AppResult<()>, success: &str, failure: &str) -> AppResult<Notification> {
        match result {
            Ok(()) => Ok(self.success(success)),
            Err(e) => {
                self.error(&format!("{}: {}", failure, e.message()));
                Err(e)
            }
        }
    }
}
