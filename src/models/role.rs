//! User roles

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Flat role set. No role implies another: admins only get what a route
/// explicitly lists for admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    /// Field technician; older clients call this role "user"
    #[serde(alias = "user")]
    Technician,
}

impl Role {
    pub const ALL: &'static [Role] = &[Role::Admin, Role::Manager, Role::Technician];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Technician => "technician",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "technician" | "user" => Ok(Role::Technician),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_is_an_alias_for_technician() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::Technician);
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::Technician);
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"technician\"");
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!("superuser".parse::<Role>().is_err());
    }
}
