//! Utilization log model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::filter::{self, Filter};
use crate::{error::AppResult, repository::Entity};

/// Hours a device was in service on a given date
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UtilizationLog {
    pub id: String,
    pub device_id: String,
    pub hours_used: f64,
    pub log_date: NaiveDate,
    pub notes: Option<String>,
    /// Email of the account that recorded the entry
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Log usage request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUtilizationLog {
    #[validate(length(min = 1, message = "Device is required"))]
    pub device_id: String,
    #[validate(range(min = 0.0, message = "Hours used cannot be negative"))]
    pub hours_used: f64,
    pub log_date: NaiveDate,
    pub notes: Option<String>,
}

/// Log entry as stored, stamped with its author
#[derive(Debug)]
pub struct NewUtilizationLog {
    pub device_id: String,
    pub hours_used: f64,
    pub log_date: NaiveDate,
    pub notes: Option<String>,
    pub created_by: String,
}

impl NewUtilizationLog {
    pub fn new(data: CreateUtilizationLog, created_by: &str) -> Self {
        Self {
            device_id: data.device_id,
            hours_used: data.hours_used,
            log_date: data.log_date,
            notes: data.notes.filter(|n| !n.trim().is_empty()),
            created_by: created_by.to_string(),
        }
    }
}

/// Update log request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUtilizationLog {
    #[validate(length(min = 1, message = "Device is required"))]
    pub device_id: Option<String>,
    #[validate(range(min = 0.0, message = "Hours used cannot be negative"))]
    pub hours_used: Option<f64>,
    pub log_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl Entity for UtilizationLog {
    type Create = NewUtilizationLog;
    type Update = UpdateUtilizationLog;

    const KIND: &'static str = "Utilization log";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(id: String, data: NewUtilizationLog, now: DateTime<Utc>) -> Self {
        UtilizationLog {
            id,
            device_id: data.device_id,
            hours_used: data.hours_used,
            log_date: data.log_date,
            notes: data.notes,
            created_by: data.created_by,
            created_at: now,
        }
    }

    fn apply(&mut self, data: UpdateUtilizationLog, _now: DateTime<Utc>) -> AppResult<()> {
        if let Some(device_id) = data.device_id {
            self.device_id = device_id;
        }
        if let Some(hours_used) = data.hours_used {
            self.hours_used = hours_used;
        }
        if let Some(log_date) = data.log_date {
            self.log_date = log_date;
        }
        if let Some(notes) = data.notes {
            self.notes = Some(notes).filter(|n| !n.trim().is_empty());
        }
        Ok(())
    }
}

/// Log entry joined with the name of its device
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UtilizationEntry {
    #[serde(flatten)]
    pub log: UtilizationLog,
    pub device_name: String,
}

/// Utilization list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct UtilizationFilter {
    pub device_id: Option<String>,
    /// Matched against notes and author
    pub search: Option<String>,
}

impl Filter<UtilizationLog> for UtilizationFilter {
    fn matches(&self, log: &UtilizationLog) -> bool {
        if let Some(device_id) = self
            .device_id
            .as_deref()
            .filter(|d| !d.is_empty() && !d.eq_ignore_ascii_case("all")) {
            if device_id != log.device_id {
                return false;
            }
        }
        match filter::needle(&self.search) {
            Some(needle) => {
                log.notes
                    .as_deref()
                    .is_some_and(|n| filter::contains(n, &needle))
                    || filter::contains(&log.created_by, &needle)
            }
            None => true,
        }
    }
}
