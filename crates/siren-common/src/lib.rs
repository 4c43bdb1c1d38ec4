pub mod errors;
pub mod events;
pub mod id;
pub mod notifications;
pub mod types;

pub use errors::{ConfigError, SirenError};
pub use events::{Event, EventBus};
pub use id::SessionId;
pub use notifications::{Notification, NotificationQueue};
pub use types::{AccuracyHint, PermissionResult, PermissionStatus};

pub type Result<T> = std::result::Result<T, SirenError>;
