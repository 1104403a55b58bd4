//! Alert service

use crate::{
    error::AppResult,
    guard::Capability,
    models::{
        alert::{AlertChange, AlertFilter, CreateAlert, UpdateAlert},
        Alert, AlertView, Filter, Notification, Notified, Role, Session,
    },
    repository::Repository,
    services::notifications::Notifier,
};

#[derive(Clone)]
pub struct AlertsService {
    repository: Repository,
    notifier: Notifier,
}

/// Alert with the resolve action offered only when it is active and the role may resolve
pub fn view(alert: Alert, role: Role) -> AlertView {
    let can_resolve = alert.is_active() && Capability::ResolveAlerts.permits(role);
    AlertView { alert, can_resolve }
}

impl AlertsService {
    pub fn new(repository: Repository, notifier: Notifier) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    pub async fn list(&self, filter: &AlertFilter, role: Role) -> AppResult<Vec<AlertView>> {
        Ok(filter
            .apply(self.repository.alerts.list().await?)
            .into_iter()
            .map(|alert| view(alert, role))
            .collect())
    }

    pub async fn get_by_id(&self, id: &str, role: Role) -> AppResult<AlertView> {
        Ok(view(self.repository.alerts.get(id).await?, role))
    }

    pub async fn create(&self, session: &Session, data: CreateAlert) -> AppResult<Notified<AlertView>> {
        let result = async {
            self.check_device(data.device_id.as_deref()).await?;
            self.repository.alerts.create(data).await
        }
        .await
        .map(|alert| view(alert, session.role()));
        self.notifier
            .report(result, "Alert created successfully", "Failed to create alert")
    }

    pub async fn update(
        &self,
        session: &Session,
        id: &str,
        data: UpdateAlert,
    ) -> AppResult<Notified<AlertView>> {
        let result = async {
            self.check_device(data.device_id.as_deref()).await?;
            self.repository
                .alerts
                .update(id, AlertChange::Edit(data))
                .await
        }
        .await
        .map(|alert| view(alert, session.role()));
        self.notifier
            .report(result, "Alert updated successfully", "Failed to update alert")
    }

    /// Mark an active alert resolved by the caller; resolving twice is a conflict
    pub async fn resolve(&self, session: &Session, id: &str) -> AppResult<Notified<AlertView>> {
        let result = self
            .repository
            .alerts
            .update(
                id,
                AlertChange::Resolve {
                    by: session.email().to_string(),
                },
            )
            .await
            .map(|alert| view(alert, session.role()));
        if result.is_ok() {
            tracing::info!(alert_id = %id, resolved_by = %session.email(), "Alert resolved");
        }
        self.notifier
            .report(result, "Alert marked as resolved", "Failed to resolve alert")
    }

    pub async fn delete(&self, id: &str) -> AppResult<Notification> {
        let result = self.repository.alerts.delete(id).await;
        self.notifier
            .report_done(result, "Alert deleted successfully", "Failed to delete alert")
    }

    async fn check_device(&self, device_id: Option<&str>) -> AppResult<()> {
        match device_id.filter(|id| !id.is_empty()) {
            Some(id) => self.repository.devices.get(id).await.map(|_| ()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::{
        error::AppError,
        models::{AlertSeverity, AlertStatus},
        repository::seed,
        services::notifications::MockNotificationSink,
    };

    fn service() -> AlertsService {
        let mut sink = MockNotificationSink::new();
        sink.expect_notify().return_const(());
        AlertsService::new(
            Repository::in_memory(true).unwrap(),
            Notifier::new(Arc::new(sink)),
        )
    }

    fn session_for(index: usize) -> Session {
        let now = Utc::now();
        Session {
            id: Uuid::new_v4(),
            user: seed::users().remove(index),
            created_at: now,
            expires_at: now + Duration::hours(1),
        }
    }

    #[tokio::test]
    async fn test_resolve_stamps_all_fields_once() {
        let service = service();
        let manager = session_for(1);

        let resolved = service.resolve(&manager, "1").await.unwrap().data;
        assert_eq!(resolved.alert.status, AlertStatus::Resolved);
        assert!(resolved.alert.resolved_at.is_some());
        assert_eq!(resolved.alert.resolved_by.as_deref(), Some("manager@telecom.demo"));
        assert!(!resolved.can_resolve);

        let err = service.resolve(&manager, "1").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_can_resolve_depends_on_role_and_status() {
        let service = service();
        let all = AlertFilter::default();

        let for_admin = service.list(&all, Role::Admin).await.unwrap();
        let flags: Vec<bool> = for_admin.iter().map(|a| a.can_resolve).collect();
        assert_eq!(flags, vec![true, true, true, false]);

        let for_technician = service.list(&all, Role::Technician).await.unwrap();
        assert!(for_technician.iter().all(|a| !a.can_resolve));
    }

    #[tokio::test]
    async fn test_filter_by_severity() {
        let filter = AlertFilter {
            severity: Some(AlertSeverity::Critical),
            ..Default::default()
        };
        let found = service().list(&filter, Role::Manager).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].alert.title, "Low cable inventory");
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_device() {
        let err = service()
            .update(
                &session_for(0),
                "2",
                UpdateAlert {
                    device_id: Some("99".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
