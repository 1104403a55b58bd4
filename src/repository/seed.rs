//! Mock records loaded into the in-memory collections at start-up

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::models::{
    Alert, AlertSeverity, AlertStatus, AlertType, Device, DeviceStatus, DeviceType, Location,
    Role, User, UtilizationLog,
};

/// Id of the account the demo credentials sign in as
pub const DEMO_ADMIN_ID: &str = "a1b2c3d4-e5f6-7890-1234-567890abcdef";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 10, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn users() -> Vec<User> {
    [
        (DEMO_ADMIN_ID, "admin@telecom.demo", Role::Admin, 1),
        ("2", "manager@telecom.demo", Role::Manager, 2),
        ("3", "tech1@telecom.demo", Role::Technician, 3),
        ("4", "tech2@telecom.demo", Role::Technician, 4),
    ]
    .into_iter()
    .map(|(id, email, role, day)| User {
        id: id.to_string(),
        email: email.to_string(),
        role,
        created_at: at(2024, 1, day),
        updated_at: at(2024, 1, day),
    })
    .collect()
}

pub fn locations() -> Vec<Location> {
    [
        ("1", "Downtown Office", "123 Main Street", "New York", 24, 1),
        ("2", "West Side Branch", "456 Oak Avenue", "Los Angeles", 18, 2),
        ("3", "Tech Hub", "789 Innovation Drive", "San Francisco", 31, 3),
    ]
    .into_iter()
    .map(|(id, name, address, city, device_count, day)| Location {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        city: city.to_string(),
        country: "USA".to_string(),
        device_count,
        created_at: at(2024, 1, day),
        updated_at: at(2024, 1, day),
    })
    .collect()
}

pub fn devices() -> Vec<Device> {
    vec![
        Device {
            id: "1".into(),
            name: "Router RT-001".into(),
            device_type: DeviceType::Router,
            status: DeviceStatus::Available,
            serial_number: "RT001-2024-001".into(),
            model: "Cisco ISR 4321".into(),
            location_id: Some("1".into()),
            purchase_date: date(2024, 1, 15),
            warranty_expiry: Some(date(2027, 1, 15)),
            created_at: at(2024, 1, 15),
            updated_at: at(2024, 1, 15),
        },
        Device {
            id: "2".into(),
            name: "Switch SW-001".into(),
            device_type: DeviceType::Switch,
            status: DeviceStatus::InUse,
            serial_number: "SW001-2024-001".into(),
            model: "Juniper EX3400".into(),
            location_id: Some("2".into()),
            purchase_date: date(2024, 2, 10),
            warranty_expiry: Some(date(2027, 2, 10)),
            created_at: at(2024, 2, 10),
            updated_at: at(2024, 2, 10),
        },
        Device {
            id: "3".into(),
            name: "Modem MD-001".into(),
            device_type: DeviceType::Modem,
            status: DeviceStatus::Maintenance,
            serial_number: "MD001-2024-001".into(),
            model: "Arris SB8200".into(),
            location_id: Some("3".into()),
            purchase_date: date(2024, 1, 20),
            warranty_expiry: Some(date(2026, 1, 20)),
            created_at: at(2024, 1, 20),
            updated_at: at(2024, 1, 20),
        },
        Device {
            id: "4".into(),
            name: "Router RT-002".into(),
            device_type: DeviceType::Router,
            status: DeviceStatus::InUse,
            serial_number: "RT002-2024-002".into(),
            model: "Cisco ISR 4331".into(),
            location_id: None,
            purchase_date: date(2024, 3, 5),
            warranty_expiry: None,
            created_at: at(2024, 3, 5),
            updated_at: at(2024, 3, 5),
        },
    ]
}

pub fn utilization_logs() -> Vec<UtilizationLog> {
    vec![
        UtilizationLog {
            id: "1".into(),
            device_id: "1".into(),
            hours_used: 168.0,
            log_date: date(2024, 6, 1),
            notes: Some("Full month operation".into()),
            created_by: "tech1@telecom.com".into(),
            created_at: at(2024, 6, 1),
        },
        UtilizationLog {
            id: "2".into(),
            device_id: "2".into(),
            hours_used: 152.0,
            log_date: date(2024, 6, 1),
            notes: Some("Minor downtime for updates".into()),
            created_by: "tech2@telecom.com".into(),
            created_at: at(2024, 6, 1),
        },
    ]
}

/// Alert timestamps are relative to the moment of seeding
pub fn alerts() -> Vec<Alert> {
    let now = Utc::now();
    vec![
        Alert {
            id: "1".into(),
            title: "Router maintenance due".into(),
            description: "Cisco Router #RT-001 requires scheduled maintenance within 48 hours"
                .into(),
            alert_type: AlertType::Maintenance,
            severity: AlertSeverity::High,
            status: AlertStatus::Active,
            device_id: Some("1".into()),
            resolved_at: None,
            resolved_by: None,
            created_at: now - Duration::hours(2),
        },
        Alert {
            id: "2".into(),
            title: "Low cable inventory".into(),
            description: "Ethernet cables running critically low in main warehouse".into(),
            alert_type: AlertType::LowStock,
            severity: AlertSeverity::Critical,
            status: AlertStatus::Active,
            device_id: None,
            resolved_at: None,
            resolved_by: None,
            created_at: now - Duration::hours(4),
        },
        Alert {
            id: "3".into(),
            title: "Device warranty expiring".into(),
            description: "Switch #SW-012 warranty expires in 30 days".into(),
            alert_type: AlertType::EndOfLife,
            severity: AlertSeverity::Medium,
            status: AlertStatus::Active,
            device_id: Some("2".into()),
            resolved_at: None,
            resolved_by: None,
            created_at: now - Duration::days(1),
        },
        Alert {
            id: "4".into(),
            title: "System backup completed".into(),
            description: "Weekly system backup completed successfully".into(),
            alert_type: AlertType::System,
            severity: AlertSeverity::Low,
            status: AlertStatus::Resolved,
            device_id: None,
            resolved_at: Some(now - Duration::hours(12)),
            resolved_by: Some("admin@telecom.demo".into()),
            created_at: now - Duration::days(2),
        },
    ]
}
