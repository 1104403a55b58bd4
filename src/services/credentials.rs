//! Credential stores backing sign-in and sign-up

use std::{collections::HashMap, sync::Arc};

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{
        user::{normalize_email, CreateUser},
        Role, User,
    },
    repository::{seed::DEMO_ADMIN_ID, DataSource},
};

pub const MIN_PASSWORD_LENGTH: usize = 6;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Source of truth for who may sign in
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Identity for a matching email/password pair
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User>;

    /// Register a new account and its directory record
    async fn register(&self, email: &str, password: &str, role: Role) -> AppResult<User>;

    /// Drop the credential attached to a deleted user
    async fn forget(&self, user_id: &str) -> AppResult<()>;

    fn accepts_sign_up(&self) -> bool;
}

/// Single hard-wired demo account
pub struct DemoCredentials {
    email: String,
    password: String,
    users: Arc<dyn DataSource<User>>,
}

impl DemoCredentials {
    pub fn new(email: &str, password: &str, users: Arc<dyn DataSource<User>>) -> Self {
        Self {
            email: normalize_email(email),
            password: password.to_string(),
            users,
        }
    }
}

#[async_trait]
impl CredentialStore for DemoCredentials {
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        if normalize_email(email) != self.email || password != self.password {
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        // The demo identity is always an administrator
        let now = Utc::now();
        let (created_at, updated_at) = match self.users.get(DEMO_ADMIN_ID).await {
            Ok(record) => (record.created_at, record.updated_at),
            Err(_) => (now, now),
        };
        Ok(User {
            id: DEMO_ADMIN_ID.to_string(),
            email: self.email.clone(),
            role: Role::Admin,
            created_at,
            updated_at,
        })
    }

    async fn register(&self, _email: &str, _password: &str, _role: Role) -> AppResult<User> {
        Err(AppError::BusinessRule(
            "Sign up is disabled in demo mode".to_string(),
        ))
    }

    async fn forget(&self, _user_id: &str) -> AppResult<()> {
        Ok(())
    }

    fn accepts_sign_up(&self) -> bool {
        false
    }
}

struct Credential {
    user_id: String,
    password_hash: String,
}

/// Self-registering credential list keyed by normalized email.
/// Roles are read from the user directory at sign-in.
pub struct RegistryCredentials {
    entries: RwLock<HashMap<String, Credential>>,
    users: Arc<dyn DataSource<User>>,
}

impl RegistryCredentials {
    pub fn new(users: Arc<dyn DataSource<User>>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            users,
        }
    }

    /// Attach a password to the demo account, creating its admin record if absent
    pub async fn bootstrap(&self, email: &str, password: &str) -> AppResult<()> {
        let email = normalize_email(email);
        let existing = self
            .users
            .list()
            .await?
            .into_iter()
            .find(|u| u.email == email);

        let user = match existing {
            Some(user) => user,
            None => {
                self.users
                    .create(CreateUser {
                        email: email.clone(),
                        role: Some(Role::Admin),
                    })
                    .await?
            }
        };

        let password_hash = hash_password(password)?;
        self.entries.write().await.insert(
            email,
            Credential {
                user_id: user.id,
                password_hash,
            },
        );
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for RegistryCredentials {
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let user_id = {
            let entries = self.entries.read().await;
            let credential = entries
                .get(&normalize_email(email))
                .ok_or_else(|| AppError::Authentication(INVALID_CREDENTIALS.to_string()))?;
            if !verify_password(&credential.password_hash, password)? {
                return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
            }
            credential.user_id.clone()
        };

        self.users
            .get(&user_id)
            .await
            .map_err(|_| AppError::Authentication(INVALID_CREDENTIALS.to_string()))
    }

    async fn register(&self, email: &str, password: &str, role: Role) -> AppResult<User> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let email = normalize_email(email);
        // Held across the directory insert so two sign-ups for one email cannot both pass
        let mut entries = self.entries.write().await;
        let taken = entries.contains_key(&email)
            || self.users.list().await?.iter().any(|u| u.email == email);
        if taken {
            return Err(AppError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(password)?;
        let user = self
            .users
            .create(CreateUser {
                email: email.clone(),
                role: Some(role),
            })
            .await?;
        entries.insert(
            email,
            Credential {
                user_id: user.id.clone(),
                password_hash,
            },
        );
        Ok(user)
    }

    async fn forget(&self, user_id: &str) -> AppResult<()> {
        self.entries
            .write()
            .await
            .retain(|_, credential| credential.user_id != user_id);
        Ok(())
    }

    fn accepts_sign_up(&self) -> bool {
        true
    }
}

/// Hash a password using Argon2
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{seed, MemoryStore};

    fn seeded_users() -> Arc<dyn DataSource<User>> {
        Arc::new(MemoryStore::with_records(seed::users()).unwrap())
    }

    #[tokio::test]
    async fn test_demo_accepts_only_configured_pair() {
        let store = DemoCredentials::new("admin@telecom.demo", "demo123456", seeded_users());

        let user = store
            .authenticate("admin@telecom.demo", "demo123456")
            .await
            .unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.id, DEMO_ADMIN_ID);

        assert!(matches!(
            store.authenticate("admin@telecom.demo", "wrong").await,
            Err(AppError::Authentication(_))
        ));
        assert!(matches!(
            store.authenticate("manager@telecom.demo", "demo123456").await,
            Err(AppError::Authentication(_))
        ));
    }

    #[tokio::test]
    async fn test_demo_refuses_sign_up() {
        let store = DemoCredentials::new("admin@telecom.demo", "demo123456", seeded_users());
        assert!(!store.accepts_sign_up());
        let err = store
            .register("new@telecom.demo", "secret1", Role::Technician)
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Sign up is disabled in demo mode");
    }

    #[tokio::test]
    async fn test_registry_round_trip_reads_role_from_directory() {
        let users = seeded_users();
        let store = RegistryCredentials::new(users.clone());

        let created = store
            .register("New.Tech@Telecom.demo", "secret1", Role::Technician)
            .await
            .unwrap();
        assert_eq!(created.email, "new.tech@telecom.demo");

        let user = store
            .authenticate("new.tech@telecom.demo", "secret1")
            .await
            .unwrap();
        assert_eq!(user.id, created.id);
        assert_eq!(user.role, Role::Technician);

        assert!(matches!(
            store.authenticate("new.tech@telecom.demo", "secret2").await,
            Err(AppError::Authentication(_))
        ));
    }

    #[tokio::test]
    async fn test_registry_rejects_short_password_and_taken_email() {
        let store = RegistryCredentials::new(seeded_users());

        assert!(matches!(
            store.register("short@telecom.demo", "12345", Role::Technician).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            store.register("Manager@telecom.demo", "secret1", Role::Technician).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_bootstrap_links_existing_admin_record() {
        let store = RegistryCredentials::new(seeded_users());
        store.bootstrap("admin@telecom.demo", "demo123456").await.unwrap();

        let user = store
            .authenticate("admin@telecom.demo", "demo123456")
            .await
            .unwrap();
        assert_eq!(user.id, DEMO_ADMIN_ID);
        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_forgotten_credential_no_longer_signs_in() {
        let store = RegistryCredentials::new(seeded_users());
        let user = store
            .register("gone@telecom.demo", "secret1", Role::Manager)
            .await
            .unwrap();
        store.forget(&user.id).await.unwrap();
        assert!(store.authenticate("gone@telecom.demo", "secret1").await.is_err());
    }
}
