//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Declares a string-backed enum with `as_str`, `Display` and `FromStr`
/// agreeing with its serde representation.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $value)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($value => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($name), s)),
                }
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

string_enum! {
    /// Kind of telecom equipment
    pub enum DeviceType {
        Router => "router",
        Switch => "switch",
        Modem => "modem",
        Cable => "cable",
    }
}

string_enum! {
    /// Lifecycle status of a device
    pub enum DeviceStatus {
        Available => "available",
        InUse => "in_use",
        Maintenance => "maintenance",
        Decommissioned => "decommissioned",
    }
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

string_enum! {
    pub enum AlertType {
        Maintenance => "maintenance",
        LowStock => "low_stock",
        EndOfLife => "end_of_life",
        System => "system",
        Security => "security",
    }
}

string_enum! {
    pub enum AlertSeverity {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
}

string_enum! {
    pub enum AlertStatus {
        Active => "active",
        /// Terminal; an alert never returns to active
        Resolved => "resolved",
    }
}

impl DeviceType {
    /// Capitalized label used by the dashboard charts
    pub fn label(&self) -> &'static str {
        match self {
            DeviceType::Router => "Router",
            DeviceType::Switch => "Switch",
            DeviceType::Modem => "Modem",
            DeviceType::Cable => "Cable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("IN_USE".parse::<DeviceStatus>().unwrap(), DeviceStatus::InUse);
        assert_eq!(" Router ".parse::<DeviceType>().unwrap(), DeviceType::Router);
        assert!("toaster".parse::<DeviceType>().is_err());
    }

    #[test]
    fn test_serde_matches_as_str() {
        for severity in AlertSeverity::ALL {
            let json = serde_json::to_string(severity).unwrap();
            assert_eq!(json, format!("\"{}\"", severity.as_str()));
        }
        let kind: AlertType = serde_json::from_str("\"low_stock\"").unwrap();
        assert_eq!(kind, AlertType::LowStock);
    }
}
