//! Utilization log service

use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::{
        utilization::{CreateUtilizationLog, NewUtilizationLog, UpdateUtilizationLog, UtilizationFilter},
        Filter, Notification, Notified, Session, UtilizationEntry, UtilizationLog,
    },
    repository::Repository,
    services::notifications::Notifier,
};

/// Shown in place of the name of a device that no longer exists
pub const UNKNOWN_DEVICE: &str = "Unknown Device";

#[derive(Clone)]
pub struct UtilizationService {
    repository: Repository,
    notifier: Notifier,
}

impl UtilizationService {
    pub fn new(repository: Repository, notifier: Notifier) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Filtered log entries with their device names
    pub async fn list(&self, filter: &UtilizationFilter) -> AppResult<Vec<UtilizationEntry>> {
        let logs = filter.apply(self.repository.utilization.list().await?);
        let names = self.device_names().await?;
        Ok(logs.into_iter().map(|log| entry(log, &names)).collect())
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<UtilizationEntry> {
        let log = self.repository.utilization.get(id).await?;
        Ok(entry(log, &self.device_names().await?))
    }

    /// Record hours for a device, stamped with the caller's email
    pub async fn create(
        &self,
        session: &Session,
        data: CreateUtilizationLog,
    ) -> AppResult<Notified<UtilizationEntry>> {
        let result: AppResult<UtilizationEntry> = async {
            self.check_device(&data.device_id).await?;
            let log = self
                .repository
                .utilization
                .create(NewUtilizationLog::new(data, session.email()))
                .await?;
            Ok(entry(log, &self.device_names().await?))
        }
        .await;
        self.notifier
            .report(result, "Utilization logged successfully", "Failed to log utilization")
    }

    pub async fn update(
        &self,
        id: &str,
        data: UpdateUtilizationLog,
    ) -> AppResult<Notified<UtilizationEntry>> {
        let result: AppResult<UtilizationEntry> = async {
            if let Some(device_id) = &data.device_id {
                self.check_device(device_id).await?;
            }
            let log = self.repository.utilization.update(id, data).await?;
            Ok(entry(log, &self.device_names().await?))
        }
        .await;
        self.notifier.report(
            result,
            "Utilization log updated successfully",
            "Failed to update utilization log",
        )
    }

    pub async fn delete(&self, id: &str) -> AppResult<Notification> {
        let result = self.repository.utilization.delete(id).await;
        self.notifier.report_done(
            result,
            "Utilization log deleted successfully",
            "Failed to delete utilization log",
        )
    }

    async fn check_device(&self, device_id: &str) -> AppResult<()> {
        self.repository.devices.get(device_id).await.map(|_| ())
    }

    async fn device_names(&self) -> AppResult<HashMap<String, String>> {
        Ok(self
            .repository
            .devices
            .list()
            .await?
            .into_iter()
            .map(|d| (d.id, d.name))
            .collect())
    }
}

fn entry(log: UtilizationLog, names: &HashMap<String, String>) -> UtilizationEntry {
    let device_name = names
        .get(&log.device_id)
        .cloned()
        .unwrap_or_else(|| UNKNOWN_DEVICE.to_string());
    UtilizationEntry { log, device_name }
}
