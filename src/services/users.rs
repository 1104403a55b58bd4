//! User management service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        user::{normalize_email, CreateUser, UpdateUser, UserFilter},
        Filter, Notification, Notified, Session, User,
    },
    repository::Repository,
    services::{credentials::CredentialStore, notifications::Notifier, sessions::SessionStore},
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    credentials: Arc<dyn CredentialStore>,
    sessions: Arc<SessionStore>,
    notifier: Notifier,
}

impl UsersService {
    pub fn new(
        repository: Repository,
        credentials: Arc<dyn CredentialStore>,
        sessions: Arc<SessionStore>,
        notifier: Notifier,
    ) -> Self {
        Self {
            repository,
            credentials,
            sessions,
            notifier,
        }
    }

    pub async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        Ok(filter.apply(self.repository.users.list().await?))
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<User> {
        self.repository.users.get(id).await
    }

    /// Add a directory entry; emails are unique ignoring case
    pub async fn create(&self, data: CreateUser) -> AppResult<Notified<User>> {
        let result: AppResult<User> = async {
            let email = normalize_email(&data.email);
            let taken = self
                .repository
                .users
                .list()
                .await?
                .iter()
                .any(|u| u.email == email);
            if taken {
                return Err(AppError::Conflict(format!(
                    "A user with email {} already exists",
                    email
                )));
            }
            self.repository.users.create(data).await
        }
        .await;
        self.notifier
            .report(result, "User added successfully", "Failed to add user")
    }

    pub async fn update(&self, id: &str, data: UpdateUser) -> AppResult<Notified<User>> {
        let result = self.repository.users.update(id, data).await;
        self.notifier
            .report(result, "User updated successfully", "Failed to update user")
    }

    /// Delete another user's account and end their sessions
    pub async fn delete(&self, session: &Session, id: &str) -> AppResult<Notification> {
        let result: AppResult<()> = async {
            if id == session.user_id() {
                return Err(AppError::BusinessRule(
                    "You cannot delete your own account".to_string(),
                ));
            }
            self.repository.users.delete(id).await?;
            self.credentials.forget(id).await?;
            let revoked = self.sessions.revoke_user(id).await;
            tracing::info!(user_id = %id, revoked, "User deleted");
            Ok(())
        }
        .await;
        self.notifier
            .report_done(result, "User deleted successfully", "Failed to delete user")
    }
}
