//! Relief Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Relief Player.
//!
//! This crate provides the foundational building blocks shared by the playback
//! engine, the notification presenter and the front ends.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `SessionSnapshot`, `PlaybackStatus`, `NotificationContent`
//! - **Collaborator Traits**: `AudioEngine`, `NotificationBackend`, `WakeLock`, `AuthProvider`
//! - **Session Gate**: `AuthGate`, deciding whether the player is reachable at all
//! - **Error Handling**: Unified `ReliefError` and `Result` types
//!
//! Everything that touches the operating system (audio output, notification
//! rendering, keep-awake, identity providers) lives behind a trait so the
//! playback core stays testable without a device.
//!
//! # Example
//!
//! ```rust
//! use relief_core::{PlaybackStatus, SessionSnapshot};
//!
//! let snapshot = SessionSnapshot::idle(30);
//! assert_eq!(snapshot.status, PlaybackStatus::Idle);
//! assert_eq!(snapshot.remaining_seconds, 1800);
//! assert_eq!(snapshot.formatted_remaining(), "30:00");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use auth::{AuthGate, DemoAuthProvider};
pub use error::{ReliefError, Result};
pub use traits::{AudioEngine, AuthProvider, NotificationBackend, WakeLock};

pub use types::{
    // Audio types
    AssetRef, AudioOperation, LoadOptions, SoundHandle,
    // Notification types
    AndroidExtras, NotificationAction, NotificationContent, NotificationData, NotificationId,
    PermissionStatus, ProgressBar,
    // Playback types
    format_time, AppState, AppVisibility, PlaybackStatus, SessionSnapshot,
    // User
    AuthenticationResponse, User,
};
