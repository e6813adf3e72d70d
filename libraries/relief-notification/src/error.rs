//! Error types for the notification presenter

use thiserror::Error;

/// Notification presenter errors
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The user did not allow notifications; nothing will be rendered
    #[error("Notification permission denied")]
    PermissionDenied,

    /// The presenter was disposed and can no longer post
    #[error("Notification presenter disposed")]
    Disposed,

    /// The platform backend failed
    #[error("Notification backend error: {0}")]
    Backend(#[from] relief_core::ReliefError),
}

/// Result type for notification operations
pub type Result<T> = std::result::Result<T, NotificationError>;
