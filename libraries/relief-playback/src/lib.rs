//! Relief Player - Playback Control
//!
//! Keeps the looping sound, the session countdown and the background
//! notification in step.
//!
//! This crate provides:
//! - The session state machine (idle / playing / paused) with a countdown
//! - A single periodic clock driving both the countdown and notification refresh
//! - Lifecycle handling (background shows the notification, foreground hides it)
//! - Notification taps routed through the same transitions as in-app buttons
//! - A task-based runtime that serializes commands and ticks
//!
//! # Architecture
//!
//! `relief-playback` is platform-agnostic. The audio engine, notification
//! renderer and wake lock are supplied through the traits in `relief-core`.
//! `PlaybackController` owns all session state; everything else reads
//! `SessionSnapshot`s from it.
//!
//! # Example: Duration choices
//!
//! ```rust
//! use relief_playback::PlayerConfig;
//!
//! let config = PlayerConfig::default();
//! assert_eq!(config.default_duration_minutes, 30);
//! assert!(config.check_duration(45).is_ok());
//! assert!(config.check_duration(47).is_err());
//! ```
//!
//! # Example: Running a player
//!
//! ```rust,no_run
//! use relief_playback::{PlaybackController, PlayerConfig, PlayerDeps, PlayerRuntime};
//! # use relief_core::{AudioEngine, WakeLock};
//! # use relief_notification::NotificationPresenter;
//! # async fn example(
//! #     audio: Box<dyn AudioEngine>,
//! #     presenter: NotificationPresenter,
//! #     wake_lock: Box<dyn WakeLock>,
//! # ) -> relief_playback::Result<()> {
//! let deps = PlayerDeps { audio, presenter, wake_lock };
//! let controller = PlaybackController::new(PlayerConfig::default(), deps)?;
//!
//! let (player, _events, task) = PlayerRuntime::spawn(controller);
//! player.set_duration(15).await?;
//! player.play().await?;
//! println!("{} left", player.snapshot().formatted_remaining());
//!
//! player.shutdown().await?;
//! task.await.ok();
//! # Ok(())
//! # }
//! ```

mod clock;
mod command;
mod config;
mod controller;
mod error;
mod events;
mod lifecycle;
mod runtime;
mod session;

// Public exports
pub use clock::Clock;
pub use command::PlayerCommand;
pub use config::PlayerConfig;
pub use controller::{PlaybackController, PlayerDeps};
pub use error::{PlaybackError, Result};
pub use events::{PlayerEvent, UserNotice};
pub use lifecycle::{LifecycleObserver, LifecycleTransition};
pub use runtime::{PlayerHandle, PlayerRuntime};
pub use session::{Session, TickOutcome};
