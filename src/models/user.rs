//! User model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{
    filter::{self, Filter},
    role::Role,
};
use crate::{
    error::{AppError, AppResult},
    repository::Entity,
};

/// Dashboard account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    /// Natural key; fixed once the account exists
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Defaults to technician
    pub role: Option<Role>,
}

/// Update user request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    /// Accepted only when equal to the current email
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl Entity for User {
    type Create = CreateUser;
    type Update = UpdateUser;

    const KIND: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(id: String, data: CreateUser, now: DateTime<Utc>) -> Self {
        User {
            id,
            email: normalize_email(&data.email),
            role: data.role.unwrap_or(Role::Technician),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, data: UpdateUser, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(email) = data.email {
            if normalize_email(&email) != self.email {
                return Err(AppError::Validation(
                    "Email cannot be changed after creation".to_string(),
                ));
            }
        }
        if let Some(role) = data.role {
            self.role = role;
        }
        self.updated_at = now;
        Ok(())
    }
}

/// Emails compare case-insensitively and ignore surrounding whitespace
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// User list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct UserFilter {
    #[serde(default, deserialize_with = "filter::choice")]
    pub role: Option<Role>,
    /// Matched against email
    pub search: Option<String>,
}

impl Filter<User> for UserFilter {
    fn matches(&self, user: &User) -> bool {
        if self.role.is_some_and(|r| r != user.role) {
            return false;
        }
        match filter::needle(&self.search) {
            Some(needle) => filter::contains(&user.email, &needle),
            None => true,
        }
    }
}
