//! Data models for TelecomDM

pub mod alert;
pub mod dashboard;
pub mod device;
pub mod enums;
pub mod filter;
pub mod location;
pub mod notification;
pub mod role;
pub mod session;
pub mod user;
pub mod utilization;

// Re-export commonly used types
pub use alert::{Alert, AlertView};
pub use device::Device;
pub use enums::{AlertSeverity, AlertStatus, AlertType, DeviceStatus, DeviceType};
pub use filter::Filter;
pub use location::Location;
pub use notification::{
    Notification, NotificationKind, Notified, NotifiedAlert, NotifiedDevice, NotifiedLocation,
    NotifiedUser, NotifiedUtilization,
};
pub use role::Role;
pub use session::Session;
pub use user::User;
pub use utilization::{UtilizationEntry, UtilizationLog};
