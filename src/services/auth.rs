//! Authentication service: sign-in, sign-out and sign-up

use std::{sync::Arc, time::Duration};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{Notification, Notified, Role, Session, User},
    services::{credentials::CredentialStore, notifications::Notifier, sessions::SessionStore},
};

/// Result of a successful sign-in
#[derive(Debug)]
pub struct SignedIn {
    pub session: Session,
    pub token: String,
    pub notification: Notification,
}

#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    sessions: Arc<SessionStore>,
    notifier: Notifier,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        sessions: Arc<SessionStore>,
        notifier: Notifier,
        config: AuthConfig,
    ) -> Self {
        Self {
            credentials,
            sessions,
            notifier,
            config,
        }
    }

    /// Authenticate and open a session. On failure no session is created.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<SignedIn> {
        if self.config.sign_in_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.sign_in_delay_ms)).await;
        }

        let user = match self.credentials.authenticate(email, password).await {
            Ok(user) => user,
            Err(e) => {
                tracing::debug!("Sign-in rejected");
                self.notifier.error(e.message());
                return Err(e);
            }
        };

        let (session, token) = self.sessions.open(user).await?;
        tracing::info!(user_id = %session.user_id(), role = %session.role(), "Signed in");
        Ok(SignedIn {
            session,
            token,
            notification: self.notifier.success("Signed in successfully"),
        })
    }

    /// Sign in with the configured demo account
    pub async fn demo_sign_in(&self) -> AppResult<SignedIn> {
        self.sign_in(&self.config.demo_email, &self.config.demo_password)
            .await
    }

    /// End the session behind the token; always succeeds
    pub async fn sign_out(&self, token: Option<&str>) -> Notification {
        if let Some(token) = token {
            if let Some(session) = self.sessions.close(token).await {
                tracing::info!(user_id = %session.user_id(), "Signed out");
            }
        }
        self.notifier.success("Signed out successfully")
    }

    /// Register a new account. Does not sign the caller in.
    pub async fn sign_up(&self, email: &str, password: &str, role: Role) -> AppResult<Notified<User>> {
        let result = if self.credentials.accepts_sign_up() {
            self.credentials.register(email, password, role).await
        } else {
            Err(AppError::BusinessRule(
                "Sign up is disabled in demo mode".to_string(),
            ))
        };

        match result {
            Ok(user) => {
                tracing::info!(user_id = %user.id, role = %user.role, "Account registered");
                Ok(Notified {
                    data: user,
                    notification: self
                        .notifier
                        .success("Account created successfully. You can now sign in."),
                })
            }
            Err(e) => {
                self.notifier.error(e.message());
                Err(e)
            }
        }
    }

    /// Session behind a bearer token, if still live
    pub async fn current_session(&self, token: &str) -> Option<Session> {
        self.sessions.resolve(token).await
    }
}
