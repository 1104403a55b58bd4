//! Dashboard aggregates

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::{
    error::AppResult,
    models::{
        dashboard::{DashboardResponse, DashboardStats, DeviceTypeStats, MonthlyUsage},
        Alert, Device, DeviceStatus, DeviceType, UtilizationLog,
    },
    repository::Repository,
};

pub const RECENT_ALERTS: usize = 5;

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn overview(&self) -> AppResult<DashboardResponse> {
        let devices = self.repository.devices.list().await?;
        let alerts = self.repository.alerts.list().await?;
        let locations = self.repository.locations.list().await?;
        let logs = self.repository.utilization.list().await?;

        let count = |status: DeviceStatus| devices.iter().filter(|d| d.status == status).count();
        let stats = DashboardStats {
            total_devices: devices.len(),
            available_devices: count(DeviceStatus::Available),
            in_use_devices: count(DeviceStatus::InUse),
            maintenance_devices: count(DeviceStatus::Maintenance),
            decommissioned_devices: count(DeviceStatus::Decommissioned),
            active_alerts: alerts.iter().filter(|a| a.is_active()).count(),
            locations: locations.len(),
        };

        Ok(DashboardResponse {
            stats,
            device_types: device_types(&devices),
            monthly_usage: monthly_usage(&logs),
            recent_alerts: recent_alerts(alerts),
        })
    }
}

fn device_types(devices: &[Device]) -> Vec<DeviceTypeStats> {
    DeviceType::ALL
        .iter()
        .map(|t| DeviceTypeStats {
            device_type: t.label().to_string(),
            count: devices.iter().filter(|d| d.device_type == *t).count(),
        })
        .collect()
}

/// Hours summed per calendar month of `log_date`, oldest first
fn monthly_usage(logs: &[UtilizationLog]) -> Vec<MonthlyUsage> {
    let mut months: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for log in logs {
        *months
            .entry((log.log_date.year(), log.log_date.month()))
            .or_default() += log.hours_used;
    }
    months
        .into_iter()
        .filter_map(|((year, month), usage_hours)| {
            NaiveDate::from_ymd_opt(year, month, 1).map(|first| MonthlyUsage {
                month: first.format("%b %Y").to_string(),
                usage_hours,
            })
        })
        .collect()
}

fn recent_alerts(mut alerts: Vec<Alert>) -> Vec<Alert> {
    alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    alerts.truncate(RECENT_ALERTS);
    alerts
}
