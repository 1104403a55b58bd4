//! Dashboard aggregates

use serde::Serialize;
use utoipa::ToSchema;

use super::alert::Alert;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_devices: usize,
    pub available_devices: usize,
    pub in_use_devices: usize,
    pub maintenance_devices: usize,
    pub decommissioned_devices: usize,
    pub active_alerts: usize,
    pub locations: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeviceTypeStats {
    #[serde(rename = "type")]
    pub device_type: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyUsage {
    /// Short month label, e.g. "Jun 2024"
    pub month: String,
    pub usage_hours: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub device_types: Vec<DeviceTypeStats>,
    pub monthly_usage: Vec<MonthlyUsage>,
    pub recent_alerts: Vec<Alert>,
}
