//! Relief Player - Notification Presenter
//!
//! Mirrors a playback session into a persistent system notification while
//! the app is in the background, and renders the buttons whose taps come
//! back as `NotificationAction`s.
//!
//! The presenter never owns session state. It is handed a
//! `SessionSnapshot` each time it should render, and taps are routed by the
//! caller into the same entry points the in-app buttons use.
//!
//! # Example
//!
//! ```rust
//! use relief_core::{PlaybackStatus, SessionSnapshot};
//! use relief_notification::{content, NotificationConfig};
//!
//! let mut snapshot = SessionSnapshot::idle(30);
//! snapshot.status = PlaybackStatus::Playing;
//! snapshot.remaining_seconds = 1799;
//!
//! let rendered = content::render(&snapshot, &NotificationConfig::default());
//! assert_eq!(rendered.body, "Playing - 29:59 left");
//! ```

pub mod config;
pub mod content;
mod error;
mod presenter;

// Public exports
pub use config::{NotificationConfig, Platform};
pub use error::{NotificationError, Result};
pub use presenter::NotificationPresenter;
