//! TelecomDM dashboard server
//!
//! REST JSON backend for tracking telecom equipment (devices, locations,
//! utilization logs and alerts) behind a role-based route guard.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the in-memory repository and services described by `config`
    pub async fn build(
        config: AppConfig,
        sink: Arc<dyn services::notifications::NotificationSink>,
    ) -> AppResult<Self> {
        let repository = repository::Repository::in_memory(config.data.seed)?;
        let services = services::Services::new(repository, config.auth.clone(), sink).await?;
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
