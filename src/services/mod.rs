//! Business logic services

pub mod alerts;
pub mod auth;
pub mod credentials;
pub mod dashboard;
pub mod devices;
pub mod locations;
pub mod notifications;
pub mod sessions;
pub mod users;
pub mod utilization;

use std::sync::Arc;

use crate::{
    config::{AuthConfig, AuthMode},
    error::AppResult,
    repository::Repository,
};

use credentials::{CredentialStore, DemoCredentials, RegistryCredentials};
use notifications::{NotificationSink, Notifier};
use sessions::SessionStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub users: users::UsersService,
    pub devices: devices::DevicesService,
    pub locations: locations::LocationsService,
    pub utilization: utilization::UtilizationService,
    pub alerts: alerts::AlertsService,
    pub dashboard: dashboard::DashboardService,
}

impl Services {
    /// Create all services with the given repository
    pub async fn new(
        repository: Repository,
        auth_config: AuthConfig,
        sink: Arc<dyn NotificationSink>,
    ) -> AppResult<Self> {
        let credentials: Arc<dyn CredentialStore> = match auth_config.mode {
            AuthMode::Demo => Arc::new(DemoCredentials::new(
                &auth_config.demo_email,
                &auth_config.demo_password,
                repository.users.clone(),
            )),
            AuthMode::Registry => {
                let registry = RegistryCredentials::new(repository.users.clone());
                registry
                    .bootstrap(&auth_config.demo_email, &auth_config.demo_password)
                    .await?;
                Arc::new(registry)
            }
        };
        tracing::info!(mode = ?auth_config.mode, "Credential store ready");

        let sessions = Arc::new(SessionStore::new(
            &auth_config.jwt_secret,
            auth_config.session_hours,
        ));
        let notifier = Notifier::new(sink);

        Ok(Self {
            auth: auth::AuthService::new(
                credentials.clone(),
                sessions.clone(),
                notifier.clone(),
                auth_config,
            ),
            users: users::UsersService::new(
                repository.clone(),
                credentials,
                sessions,
                notifier.clone(),
            ),
            devices: devices::DevicesService::new(repository.clone(), notifier.clone()),
            locations: locations::LocationsService::new(repository.clone(), notifier.clone()),
            utilization: utilization::UtilizationService::new(repository.clone(), notifier.clone()),
            alerts: alerts::AlertsService::new(repository.clone(), notifier),
            dashboard: dashboard::DashboardService::new(repository),
        })
    }
}
