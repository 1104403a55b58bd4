//! Location model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::filter::{self, Filter};
use crate::{error::AppResult, repository::Entity};

/// Site where devices are installed or stored
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub device_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create location request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLocation {
    #[validate(length(min = 1, message = "Location name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
    /// Defaults to 0
    pub device_count: Option<u32>,
}

/// Update location request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLocation {
    #[validate(length(min = 1, message = "Location name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: Option<String>,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: Option<String>,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: Option<String>,
    pub device_count: Option<u32>,
}

impl Entity for Location {
    type Create = CreateLocation;
    type Update = UpdateLocation;

    const KIND: &'static str = "Location";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(id: String, data: CreateLocation, now: DateTime<Utc>) -> Self {
        Location {
            id,
            name: data.name,
            address: data.address,
            city: data.city,
            country: data.country,
            device_count: data.device_count.unwrap_or(0),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, data: UpdateLocation, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(name) = data.name {
            self.name = name;
        }
        if let Some(address) = data.address {
            self.address = address;
        }
        if let Some(city) = data.city {
            self.city = city;
        }
        if let Some(country) = data.country {
            self.country = country;
        }
        if let Some(device_count) = data.device_count {
            self.device_count = device_count;
        }
        self.updated_at = now;
        Ok(())
    }
}

/// Location list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct LocationFilter {
    /// Matched against name, address, city and country
    pub search: Option<String>,
}

impl Filter<Location> for LocationFilter {
    fn matches(&self, location: &Location) -> bool {
        match filter::needle(&self.search) {
            Some(needle) => [
                &location.name,
                &location.address,
                &location.city,
                &location.country,
            ]
            .iter()
            .any(|field| filter::contains(field, &needle)),
            None => true,
        }
    }
}
