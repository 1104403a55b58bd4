//! Device service

use crate::{
    error::AppResult,
    models::{
        device::{CreateDevice, DeviceFilter, UpdateDevice},
        Device, Filter, Notification, Notified,
    },
    repository::Repository,
    services::notifications::Notifier,
};

#[derive(Clone)]
pub struct DevicesService {
    repository: Repository,
    notifier: Notifier,
}

impl DevicesService {
    pub fn new(repository: Repository, notifier: Notifier) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    pub async fn list(&self, filter: &DeviceFilter) -> AppResult<Vec<Device>> {
        Ok(filter.apply(self.repository.devices.list().await?))
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Device> {
        self.repository.devices.get(id).await
    }

    pub async fn create(&self, data: CreateDevice) -> AppResult<Notified<Device>> {
        let result = async {
            self.check_location(data.location_id.as_deref()).await?;
            self.repository.devices.create(data).await
        }
        .await;
        self.notifier
            .report(result, "Device added successfully", "Failed to add device")
    }

    pub async fn update(&self, id: &str, data: UpdateDevice) -> AppResult<Notified<Device>> {
        let result = async {
            self.check_location(data.location_id.as_deref()).await?;
            self.repository.devices.update(id, data).await
        }
        .await;
        self.notifier
            .report(result, "Device updated successfully", "Failed to update device")
    }

    pub async fn delete(&self, id: &str) -> AppResult<Notification> {
        let result = self.repository.devices.delete(id).await;
        self.notifier
            .report_done(result, "Device deleted successfully", "Failed to delete device")
    }

    /// A non-empty location id must name an existing location
    async fn check_location(&self, location_id: Option<&str>) -> AppResult<()> {
        match location_id.filter(|id| !id.is_empty()) {
            Some(id) => self.repository.locations.get(id).await.map(|_| ()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::{
        error::AppError,
        models::{DeviceStatus, DeviceType, NotificationKind},
        services::notifications::MockNotificationSink,
    };

    fn service_with(sink: MockNotificationSink) -> DevicesService {
        DevicesService::new(
            Repository::in_memory(true).unwrap(),
            Notifier::new(Arc::new(sink)),
        )
    }

    fn service() -> DevicesService {
        let mut sink = MockNotificationSink::new();
        sink.expect_notify().return_const(());
        service_with(sink)
    }

    fn new_device(location_id: Option<&str>) -> CreateDevice {
        CreateDevice {
            name: "Cable Spool CB-001".into(),
            device_type: DeviceType::Cable,
            status: None,
            serial_number: "CB001-2024-001".into(),
            model: "Cat6 305m".into(),
            location_id: location_id.map(str::to_string),
            purchase_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            warranty_expiry: None,
        }
    }

    #[tokio::test]
    async fn test_filter_by_status_keeps_order() {
        let filter = DeviceFilter {
            status: Some(DeviceStatus::InUse),
            ..Default::default()
        };
        let ids: Vec<String> = service()
            .list(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["2", "4"]);
    }

    #[tokio::test]
    async fn test_create_notifies_success() {
        let mut sink = MockNotificationSink::new();
        sink.expect_notify()
            .withf(|n| n.kind == NotificationKind::Success && n.message == "Device added successfully")
            .times(1)
            .return_const(());
        let service = service_with(sink);

        let created = service.create(new_device(Some("1"))).await.unwrap();
        assert_eq!(created.data.status, DeviceStatus::Available);
        assert_eq!(service.list(&DeviceFilter::default()).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_create_with_unknown_location_leaves_collection_unchanged() {
        let mut sink = MockNotificationSink::new();
        sink.expect_notify()
            .withf(|n| n.kind == NotificationKind::Error)
            .times(1)
            .return_const(());
        let service = service_with(sink);

        let err = service.create(new_device(Some("99"))).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(service.list(&DeviceFilter::default()).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_update_with_empty_location_detaches() {
        let updated = service()
            .update(
                "1",
                UpdateDevice {
                    location_id: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.data.location_id, None);
    }

    #[tokio::test]
    async fn test_delete_unknown_device() {
        assert!(matches!(
            service().delete("99").await,
            Err(AppError::NotFound(_))
        ));
    }
}
