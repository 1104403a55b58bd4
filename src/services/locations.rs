//! Location service

use crate::{
    error::AppResult,
    models::{
        location::{CreateLocation, LocationFilter, UpdateLocation},
        Filter, Location, Notification, Notified,
    },
    repository::Repository,
    services::notifications::Notifier,
};

#[derive(Clone)]
pub struct LocationsService {
    repository: Repository,
    notifier: Notifier,
}

impl LocationsService {
    pub fn new(repository: Repository, notifier: Notifier) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    pub async fn list(&self, filter: &LocationFilter) -> AppResult<Vec<Location>> {
        Ok(filter.apply(self.repository.locations.list().await?))
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Location> {
        self.repository.locations.get(id).await
    }

    pub async fn create(&self, data: CreateLocation) -> AppResult<Notified<Location>> {
        let result = self.repository.locations.create(data).await;
        self.notifier
            .report(result, "Location added successfully", "Failed to add location")
    }

    pub async fn update(&self, id: &str, data: UpdateLocation) -> AppResult<Notified<Location>> {
        let result = self.repository.locations.update(id, data).await;
        self.notifier
            .report(result, "Location updated successfully", "Failed to update location")
    }

    pub async fn delete(&self, id: &str) -> AppResult<Notification> {
        let result = self.repository.locations.delete(id).await;
        self.notifier
            .report_done(result, "Location deleted successfully", "Failed to delete location")
    }
}
