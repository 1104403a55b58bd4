//! Device model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::{
    enums::{DeviceStatus, DeviceType},
    filter::{self, Filter},
};
use crate::{error::AppResult, repository::Entity};

/// Device record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub status: DeviceStatus,
    pub serial_number: String,
    pub model: String,
    pub location_id: Option<String>,
    pub purchase_date: NaiveDate,
    pub warranty_expiry: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create device request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_new_device_dates"))]
pub struct CreateDevice {
    #[validate(length(min = 1, message = "Device name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    /// Defaults to `available`
    pub status: Option<DeviceStatus>,
    #[validate(length(min = 1, message = "Serial number is required"))]
    pub serial_number: String,
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    pub location_id: Option<String>,
    pub purchase_date: NaiveDate,
    pub warranty_expiry: Option<NaiveDate>,
}

/// Update device request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDevice {
    #[validate(length(min = 1, message = "Device name is required"))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<DeviceType>,
    pub status: Option<DeviceStatus>,
    #[validate(length(min = 1, message = "Serial number is required"))]
    pub serial_number: Option<String>,
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: Option<String>,
    /// An empty string detaches the device from its location
    pub location_id: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
}

fn validate_new_device_dates(data: &CreateDevice) -> Result<(), ValidationError> {
    match data.warranty_expiry {
        Some(expiry) if expiry < data.purchase_date => {
            let mut err = ValidationError::new("warranty_expiry");
            err.message = Some("Warranty expiry cannot precede the purchase date".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

impl Entity for Device {
    type Create = CreateDevice;
    type Update = UpdateDevice;

    const KIND: &'static str = "Device";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(id: String, data: CreateDevice, now: DateTime<Utc>) -> Self {
        Device {
            id,
            name: data.name,
            device_type: data.device_type,
            status: data.status.unwrap_or(DeviceStatus::Available),
            serial_number: data.serial_number,
            model: data.model,
            location_id: data.location_id.filter(|l| !l.is_empty()),
            purchase_date: data.purchase_date,
            warranty_expiry: data.warranty_expiry,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, data: UpdateDevice, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(name) = data.name {
            self.name = name;
        }
        if let Some(device_type) = data.device_type {
            self.device_type = device_type;
        }
        if let Some(status) = data.status {
            self.status = status;
        }
        if let Some(serial_number) = data.serial_number {
            self.serial_number = serial_number;
        }
        if let Some(model) = data.model {
            self.model = model;
        }
        if let Some(location_id) = data.location_id {
            self.location_id = Some(location_id).filter(|l| !l.is_empty());
        }
        if let Some(purchase_date) = data.purchase_date {
            self.purchase_date = purchase_date;
        }
        if let Some(warranty_expiry) = data.warranty_expiry {
            self.warranty_expiry = Some(warranty_expiry);
        }
        self.updated_at = now;
        Ok(())
    }
}

/// Device list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DeviceFilter {
    /// Status, or `all`
    #[serde(default, deserialize_with = "filter::choice")]
    pub status: Option<DeviceStatus>,
    /// Device type, or `all`
    #[serde(default, rename = "type", deserialize_with = "filter::choice")]
    pub device_type: Option<DeviceType>,
    /// Matched against name, serial number and model
    pub search: Option<String>,
}

impl Filter<Device> for DeviceFilter {
    fn matches(&self, device: &Device) -> bool {
        if self.status.is_some_and(|s| s != device.status) {
            return false;
        }
        if self.device_type.is_some_and(|t| t != device.device_type) {
            return false;
        }
        match filter::needle(&self.search) {
            Some(needle) => {
                filter::contains(&device.name, &needle)
                    || filter::contains(&device.serial_number, &needle)
                    || filter::contains(&device.model, &needle)
            }
            None => true,
        }
    }
}
